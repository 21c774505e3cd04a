//! Request and response shapes for the gateway.
//!
//! Outward-facing field names are always the gateway's vocabulary
//! (`description`, `board_id`, `position`). Trello's native names (`desc`,
//! `idBoard`, `pos`) appear only on the deserialize side of these structs;
//! no other module sees them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inbound function-call envelope for `POST /mcp/v1`.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCall {
    /// Name of the function to invoke.
    pub function_name: String,
    /// Function parameters; defaults to an empty object when omitted.
    #[serde(default = "empty_object")]
    pub parameters: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// A Trello board, projected to the gateway's field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(rename(deserialize = "desc"), default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

/// A list on a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(rename(deserialize = "pos"), default)]
    pub position: f64,
    #[serde(rename(deserialize = "idBoard"), default)]
    pub board_id: String,
}

/// A card as returned by read operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(rename(deserialize = "desc"), default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default)]
    pub closed: bool,
    #[serde(rename(deserialize = "idList"), default)]
    pub list_id: String,
    #[serde(rename(deserialize = "idBoard"), default)]
    pub board_id: String,
}

/// The narrower card shape returned by create/update/move (no `closed`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    pub id: String,
    pub name: String,
    #[serde(rename(deserialize = "desc"), default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(rename(deserialize = "idList"), default)]
    pub list_id: String,
    #[serde(rename(deserialize = "idBoard"), default)]
    pub board_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_parameters_default_to_empty_object() {
        let call: FunctionCall =
            serde_json::from_value(json!({ "function_name": "get_trello_boards" })).unwrap();
        assert_eq!(call.function_name, "get_trello_boards");
        assert_eq!(call.parameters, json!({}));
    }

    #[test]
    fn test_board_projection_renames_fields() {
        let board: Board = serde_json::from_value(json!({
            "id": "B1",
            "name": "Roadmap",
            "desc": "Q3 planning",
            "url": "https://trello.com/b/B1",
            "closed": false,
            "idOrganization": "O1"
        }))
        .unwrap();

        let out = serde_json::to_value(&board).unwrap();
        assert_eq!(
            out,
            json!({
                "id": "B1",
                "name": "Roadmap",
                "description": "Q3 planning",
                "url": "https://trello.com/b/B1",
                "closed": false
            })
        );
    }

    #[test]
    fn test_list_projection_renames_fields() {
        let list: List = serde_json::from_value(json!({
            "id": "L1",
            "name": "Doing",
            "closed": false,
            "pos": 16384.0,
            "idBoard": "B1"
        }))
        .unwrap();

        let out = serde_json::to_value(&list).unwrap();
        assert_eq!(out["position"], json!(16384.0));
        assert_eq!(out["board_id"], json!("B1"));
        assert!(out.get("pos").is_none());
        assert!(out.get("idBoard").is_none());
    }

    #[test]
    fn test_card_details_omits_url_but_keeps_null_due() {
        let card: CardDetails = serde_json::from_value(json!({
            "id": "C1",
            "name": "Task",
            "desc": "",
            "due": null,
            "idList": "L1",
            "idBoard": "B1"
        }))
        .unwrap();

        let out = serde_json::to_value(&card).unwrap();
        assert_eq!(
            out,
            json!({
                "id": "C1",
                "name": "Task",
                "description": "",
                "due": null,
                "list_id": "L1",
                "board_id": "B1"
            })
        );
        assert!(out.get("url").is_none());
    }
}
