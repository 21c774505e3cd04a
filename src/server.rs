//! HTTP front door for the MCP gateway.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::{middleware, Router};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::auth::require_bearer;
use crate::config::Config;
use crate::error::Error;
use crate::manifest::{manifest, Function};
use crate::models::FunctionCall;
use crate::trello::TrelloClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Configuration.
    pub config: Config,
    /// Trello API client.
    pub trello: TrelloClient,
}

/// Build the HTTP router for the gateway.
///
/// Only the dispatch route sits behind the bearer-token middleware; the
/// manifest and health routes are open.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/mcp/v1",
            post(dispatch).layer(middleware::from_fn_with_state(
                state.clone(),
                require_bearer,
            )),
        )
        .route("/mcp/v1/manifest", get(manifest_handler))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Handle a function-call envelope.
///
/// Resolves the function name against the closed dispatch set, forwards the
/// parameters to the matching Trello operation, and serializes the projected
/// result. Every failure path goes through [`Error`], so exactly one
/// response is produced per request.
async fn dispatch(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, Error> {
    let call: FunctionCall = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Failed to parse function call envelope");
        Error::Validation(format!("invalid request body: {e}"))
    })?;

    let Some(function) = Function::from_name(&call.function_name) else {
        warn!(function = %call.function_name, "Unknown function requested");
        return Err(Error::UnknownFunction(call.function_name));
    };

    info!(function = function.name(), "Dispatching function call");

    let result = match function {
        Function::GetBoards => to_response(state.trello.get_boards().await?),
        Function::GetLists => {
            to_response(state.trello.get_lists(params(call.parameters)?).await?)
        }
        Function::GetCards => {
            to_response(state.trello.get_cards(params(call.parameters)?).await?)
        }
        Function::CreateCard => {
            to_response(state.trello.create_card(params(call.parameters)?).await?)
        }
        Function::UpdateCard => {
            to_response(state.trello.update_card(params(call.parameters)?).await?)
        }
        Function::MoveCard => {
            to_response(state.trello.move_card(params(call.parameters)?).await?)
        }
    }?;

    Ok(Json(result))
}

fn params<T: DeserializeOwned>(parameters: Value) -> Result<T, Error> {
    serde_json::from_value(parameters).map_err(|e| {
        warn!(error = %e, "Failed to parse function parameters");
        Error::Validation(format!("invalid parameters: {e}"))
    })
}

fn to_response<T: serde::Serialize>(value: T) -> Result<Value, Error> {
    serde_json::to_value(value).map_err(|e| {
        error!(error = %e, "Failed to serialize response");
        Error::Internal
    })
}

/// Serve the static manifest.
async fn manifest_handler() -> Json<Value> {
    Json(manifest())
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
