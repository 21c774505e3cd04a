//! MCP gateway for Trello.
//!
//! This crate provides:
//! - A function-call dispatch endpoint (`POST /mcp/v1`) routing to six
//!   Trello operations over boards, lists, and cards
//! - A static manifest endpoint describing the callable functions
//! - Bearer-token authentication on the dispatch endpoint
//! - A Trello REST client that projects remote payloads into the
//!   gateway's stable field vocabulary

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Async API methods can fail in the obvious ways

pub mod auth;
pub mod config;
pub mod error;
pub mod manifest;
pub mod models;
pub mod server;
pub mod trello;

pub use config::Config;
pub use error::Error;
pub use manifest::Function;
pub use trello::TrelloClient;
