//! Source configuration, resolved once at startup
//!
//! The upstream endpoint is a base URL plus two path templates. Templates
//! use `{query}` and `{player_id}` placeholders; values are URL-encoded when
//! rendered.

use crate::error::{FinderError, Result};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.pokemon-zone.com/api";
pub const DEFAULT_CATALOG_PATH: &str = "cards/search/?q={query}";
pub const DEFAULT_PLAYER_PATH: &str = "players/{player_id}/";
pub const DEFAULT_CATALOG_QUERY: &str = "sv06";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const QUERY_PLACEHOLDER: &str = "{query}";
const PLAYER_PLACEHOLDER: &str = "{player_id}";

/// Where and how card data is fetched
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub catalog_path: String,
    pub player_path: String,
    /// Relay service tried after direct fetches fail
    pub relay_url: Option<String>,
    /// Add a browser-header fetch strategy after the plain one
    pub browser_headers: bool,
    pub timeout: Duration,
    /// One catalog page is fetched per query
    pub catalog_queries: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            catalog_path: DEFAULT_CATALOG_PATH.to_string(),
            player_path: DEFAULT_PLAYER_PATH.to_string(),
            relay_url: None,
            browser_headers: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            catalog_queries: vec![DEFAULT_CATALOG_QUERY.to_string()],
        }
    }
}

impl SourceConfig {
    /// Check the configuration before any request is made
    pub fn validate(&self) -> Result<()> {
        if !is_http_url(&self.base_url) {
            return Err(FinderError::Config(format!(
                "base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }
        if let Some(relay) = &self.relay_url {
            if !is_http_url(relay) {
                return Err(FinderError::Config(format!(
                    "relay URL must start with http:// or https://: {}",
                    relay
                )));
            }
        }
        if !self.catalog_path.contains(QUERY_PLACEHOLDER) {
            return Err(FinderError::Config(format!(
                "catalog path must contain {}: {}",
                QUERY_PLACEHOLDER, self.catalog_path
            )));
        }
        if !self.player_path.contains(PLAYER_PLACEHOLDER) {
            return Err(FinderError::Config(format!(
                "player path must contain {}: {}",
                PLAYER_PLACEHOLDER, self.player_path
            )));
        }
        if self.catalog_queries.iter().all(|q| q.trim().is_empty()) {
            return Err(FinderError::Config(
                "at least one catalog query is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn catalog_path_for(&self, query: &str) -> String {
        render_path(&self.catalog_path, QUERY_PLACEHOLDER, query)
    }

    pub fn player_path_for(&self, player_id: &str) -> String {
        render_path(&self.player_path, PLAYER_PLACEHOLDER, player_id)
    }
}

/// Substitute an URL-encoded value for a template placeholder
pub fn render_path(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(placeholder, &urlencoding::encode(value))
}

/// Join a base URL and a relative path with exactly one slash
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
