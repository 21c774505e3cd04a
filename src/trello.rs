//! Trello REST client.
//!
//! Single translation boundary between the gateway and Trello: credentials
//! ride as query parameters, remote error bodies are normalized into
//! [`Error::Remote`], and payloads are projected into the shapes in
//! [`crate::models`] before anything else sees them.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::Error;
use crate::models::{Board, Card, CardDetails, List};

const FETCH_BOARDS_FALLBACK: &str = "Failed to fetch Trello boards";
const FETCH_LISTS_FALLBACK: &str = "Failed to fetch Trello lists";
const FETCH_CARDS_FALLBACK: &str = "Failed to fetch Trello cards";
const CREATE_CARD_FALLBACK: &str = "Failed to create Trello card";
const UPDATE_CARD_FALLBACK: &str = "Failed to update Trello card";
const MOVE_CARD_FALLBACK: &str = "Failed to move Trello card";

/// Parameters for `get_trello_lists`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GetListsParams {
    pub board_id: Option<String>,
}

/// Parameters for `get_trello_cards`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GetCardsParams {
    pub list_id: Option<String>,
}

/// Parameters for `create_trello_card`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCardParams {
    pub list_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub due: Option<String>,
}

/// Parameters for `update_trello_card`.
///
/// `description` and `due` are double-optional so the outbound body can
/// distinguish "caller omitted the field" (outer `None`) from "caller
/// explicitly cleared it" (`Some(None)`). `name` deliberately stays a plain
/// option: the upstream contract includes it only when non-empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateCardParams {
    pub card_id: Option<String>,
    pub name: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub due: Option<Option<String>>,
}

/// Parameters for `move_trello_card`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MoveCardParams {
    pub card_id: Option<String>,
    pub list_id: Option<String>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Client for the Trello REST API.
#[derive(Debug, Clone)]
pub struct TrelloClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    api_token: String,
}

impl TrelloClient {
    /// Create a new Trello client from the gateway configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.trello_base_url.clone(),
            api_key: config.trello_api_key.clone(),
            api_token: config.trello_api_token.clone(),
        })
    }

    /// Get all boards for the authenticated member.
    pub async fn get_boards(&self) -> Result<Vec<Board>, Error> {
        let url = format!("{}/members/me/boards", self.base_url);
        let body = self
            .execute(self.client.get(&url), FETCH_BOARDS_FALLBACK)
            .await?;
        project(body, FETCH_BOARDS_FALLBACK)
    }

    /// Get all lists on a board.
    pub async fn get_lists(&self, params: GetListsParams) -> Result<Vec<List>, Error> {
        let board_id = required(params.board_id, "board_id is required")?;

        let url = format!("{}/boards/{board_id}/lists", self.base_url);
        let body = self
            .execute(self.client.get(&url), FETCH_LISTS_FALLBACK)
            .await?;
        project(body, FETCH_LISTS_FALLBACK)
    }

    /// Get all cards in a list.
    pub async fn get_cards(&self, params: GetCardsParams) -> Result<Vec<Card>, Error> {
        let list_id = required(params.list_id, "list_id is required")?;

        let url = format!("{}/lists/{list_id}/cards", self.base_url);
        let body = self
            .execute(self.client.get(&url), FETCH_CARDS_FALLBACK)
            .await?;
        project(body, FETCH_CARDS_FALLBACK)
    }

    /// Create a card in a list.
    pub async fn create_card(&self, params: CreateCardParams) -> Result<CardDetails, Error> {
        if empty(&params.list_id) || empty(&params.name) {
            return Err(Error::Validation("list_id and name are required".into()));
        }

        let body = build_create_body(&params);
        let outbound = Value::Object(body.clone());
        debug!(body = %outbound, "Creating Trello card");

        let url = format!("{}/cards", self.base_url);
        let response = self
            .execute(self.client.post(&url).json(&body), CREATE_CARD_FALLBACK)
            .await?;
        project(response, CREATE_CARD_FALLBACK)
    }

    /// Update a card's name, description, or due date.
    pub async fn update_card(&self, params: UpdateCardParams) -> Result<CardDetails, Error> {
        let card_id = required(params.card_id.clone(), "card_id is required")?;

        let body = build_update_body(&params);
        let outbound = Value::Object(body.clone());
        debug!(card_id = %card_id, body = %outbound, "Updating Trello card");

        let url = format!("{}/cards/{card_id}", self.base_url);
        let response = self
            .execute(self.client.put(&url).json(&body), UPDATE_CARD_FALLBACK)
            .await?;
        project(response, UPDATE_CARD_FALLBACK)
    }

    /// Move a card to a different list.
    pub async fn move_card(&self, params: MoveCardParams) -> Result<CardDetails, Error> {
        if empty(&params.card_id) || empty(&params.list_id) {
            return Err(Error::Validation("card_id and list_id are required".into()));
        }
        let card_id = params.card_id.unwrap_or_default();
        let list_id = params.list_id.unwrap_or_default();

        let url = format!("{}/cards/{card_id}", self.base_url);
        let body = serde_json::json!({ "idList": list_id });
        let response = self
            .execute(self.client.put(&url).json(&body), MOVE_CARD_FALLBACK)
            .await?;
        project(response, MOVE_CARD_FALLBACK)
    }

    /// Send one request with credentials attached and normalize the outcome.
    ///
    /// Non-success statuses become [`Error::Remote`] carrying the remote
    /// `message` field when the body is parseable JSON, else the operation's
    /// fallback string.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<Value, Error> {
        let response = request
            .query(&[
                ("key", self.api_key.as_str()),
                ("token", self.api_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Trello request failed to send");
                Error::Remote(fallback.to_string())
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read Trello response body");
            Error::Remote(fallback.to_string())
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("message")?.as_str().map(String::from))
                .unwrap_or_else(|| fallback.to_string());
            warn!(status = %status, message = %message, "Trello returned an error");
            return Err(Error::Remote(message));
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, "Trello returned a non-JSON success body");
            Error::Remote(fallback.to_string())
        })
    }
}

fn required(value: Option<String>, message: &str) -> Result<String, Error> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Validation(message.to_string()))
}

fn empty(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

fn project<T: serde::de::DeserializeOwned>(body: Value, fallback: &str) -> Result<T, Error> {
    serde_json::from_value(body).map_err(|e| {
        error!(error = %e, "Unexpected Trello payload shape");
        Error::Remote(fallback.to_string())
    })
}

/// Build the outbound body for card creation.
///
/// `desc` defaults to the empty string and `due` to null; an empty-string
/// `due` collapses to null, matching the upstream contract.
fn build_create_body(params: &CreateCardParams) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert(
        "idList".into(),
        Value::String(params.list_id.clone().unwrap_or_default()),
    );
    body.insert(
        "name".into(),
        Value::String(params.name.clone().unwrap_or_default()),
    );
    body.insert(
        "desc".into(),
        Value::String(params.description.clone().unwrap_or_default()),
    );
    body.insert(
        "due".into(),
        params
            .due
            .clone()
            .filter(|d| !d.is_empty())
            .map_or(Value::Null, Value::String),
    );
    body
}

/// Build the partial-update body for a card.
///
/// Asymmetric on purpose: `name` is included only when present and
/// non-empty, while `description` and `due` are included whenever the
/// caller supplied the key, explicit null or empty string included.
fn build_update_body(params: &UpdateCardParams) -> Map<String, Value> {
    let mut body = Map::new();

    if let Some(name) = params.name.as_deref().filter(|n| !n.is_empty()) {
        body.insert("name".into(), Value::String(name.to_string()));
    }
    if let Some(description) = &params.description {
        body.insert(
            "desc".into(),
            description.clone().map_or(Value::Null, Value::String),
        );
    }
    if let Some(due) = &params.due {
        body.insert("due".into(), due.clone().map_or(Value::Null, Value::String));
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update_params(value: Value) -> UpdateCardParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_update_body_empty_description_is_sent() {
        let params = update_params(json!({ "card_id": "C1", "description": "" }));
        let body = build_update_body(&params);

        assert_eq!(body.get("desc"), Some(&json!("")));
        assert!(!body.contains_key("name"));
        assert!(!body.contains_key("due"));
    }

    #[test]
    fn test_update_body_empty_name_is_dropped() {
        let params = update_params(json!({ "card_id": "C1", "name": "" }));
        let body = build_update_body(&params);

        assert!(body.is_empty());
    }

    #[test]
    fn test_update_body_explicit_null_due_is_sent() {
        let params = update_params(json!({ "card_id": "C1", "due": null }));
        let body = build_update_body(&params);

        assert_eq!(body.get("due"), Some(&Value::Null));
    }

    #[test]
    fn test_update_body_omitted_fields_stay_omitted() {
        let params = update_params(json!({ "card_id": "C1" }));
        let body = build_update_body(&params);

        assert!(body.is_empty());
    }

    #[test]
    fn test_update_body_full_update() {
        let params = update_params(json!({
            "card_id": "C1",
            "name": "Renamed",
            "description": "New text",
            "due": "2026-09-01T00:00:00.000Z"
        }));
        let body = build_update_body(&params);

        assert_eq!(body.get("name"), Some(&json!("Renamed")));
        assert_eq!(body.get("desc"), Some(&json!("New text")));
        assert_eq!(body.get("due"), Some(&json!("2026-09-01T00:00:00.000Z")));
    }

    #[test]
    fn test_create_body_defaults() {
        let params: CreateCardParams =
            serde_json::from_value(json!({ "list_id": "L1", "name": "Task" })).unwrap();
        let body = build_create_body(&params);

        assert_eq!(body.get("idList"), Some(&json!("L1")));
        assert_eq!(body.get("name"), Some(&json!("Task")));
        assert_eq!(body.get("desc"), Some(&json!("")));
        assert_eq!(body.get("due"), Some(&Value::Null));
    }

    #[test]
    fn test_create_body_empty_due_collapses_to_null() {
        let params: CreateCardParams =
            serde_json::from_value(json!({ "list_id": "L1", "name": "Task", "due": "" })).unwrap();
        let body = build_create_body(&params);

        assert_eq!(body.get("due"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_get_lists_requires_board_id() {
        let config = Config {
            port: 0,
            trello_api_key: "k".into(),
            trello_api_token: "t".into(),
            auth_token: "a".into(),
            trello_base_url: "http://127.0.0.1:1".into(),
        };
        let client = TrelloClient::new(&config).unwrap();

        let err = client.get_lists(GetListsParams::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "board_id is required");

        let err = client
            .get_lists(GetListsParams {
                board_id: Some(String::new()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "board_id is required");
    }

    #[tokio::test]
    async fn test_create_card_requires_list_id_and_name() {
        let config = Config {
            port: 0,
            trello_api_key: "k".into(),
            trello_api_token: "t".into(),
            auth_token: "a".into(),
            trello_base_url: "http://127.0.0.1:1".into(),
        };
        let client = TrelloClient::new(&config).unwrap();

        let err = client
            .create_card(CreateCardParams {
                list_id: Some("L1".into()),
                ..CreateCardParams::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "list_id and name are required");
    }
}
