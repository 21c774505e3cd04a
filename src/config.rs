//! Configuration for the MCP gateway.

use std::env;

use crate::error::Error;

/// Default Trello REST API base URL.
pub const DEFAULT_TRELLO_BASE_URL: &str = "https://api.trello.com/1";

const DEFAULT_PORT: u16 = 3000;

/// Gateway configuration, read from the environment once at startup.
///
/// Components receive this struct explicitly; nothing reads the process
/// environment after `from_env` returns.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port.
    pub port: u16,
    /// Trello API key, sent as a query parameter on every remote call.
    pub trello_api_key: String,
    /// Trello API token, sent alongside the key.
    pub trello_api_token: String,
    /// Static bearer token checked on the dispatch endpoint.
    pub auth_token: String,
    /// Trello API base URL (overridable for tests and proxies).
    pub trello_base_url: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Fails when any required secret (`TRELLO_API_KEY`, `TRELLO_API_TOKEN`,
    /// `MCP_AUTH_TOKEN`) is absent or empty; the error names every missing
    /// variable so a misconfigured deployment aborts before binding.
    pub fn from_env() -> Result<Self, Error> {
        let mut missing = Vec::new();

        let trello_api_key = require_var("TRELLO_API_KEY", &mut missing);
        let trello_api_token = require_var("TRELLO_API_TOKEN", &mut missing);
        let auth_token = require_var("MCP_AUTH_TOKEN", &mut missing);

        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a number, got '{raw}'")))?,
            Err(_) => DEFAULT_PORT,
        };

        let trello_base_url = env::var("TRELLO_API_BASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .map_or_else(
                || DEFAULT_TRELLO_BASE_URL.to_string(),
                |s| s.trim_end_matches('/').to_string(),
            );

        Ok(Self {
            port,
            trello_api_key,
            trello_api_token,
            auth_token,
            trello_base_url,
        })
    }
}

fn require_var(name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}
