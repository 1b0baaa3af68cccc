//! Fetch capabilities for catalog and player payloads
//!
//! The comparison core only sees [`CatalogSource`] and [`PlayerSource`].
//! Both are implemented by [`ApiSource`] over a [`Transport`], the piece that
//! actually talks HTTP. Several transports can be ranked so the first one that
//! gets through the site's anti-bot layer wins.

mod direct;
mod ranked;
mod relay;

pub use direct::{DirectTransport, HeaderProfile};
pub use ranked::RankedTransport;
pub use relay::RelayTransport;

use crate::config::SourceConfig;
use async_trait::async_trait;
use pocket_common::SourceError;
use std::sync::Arc;

/// Supplies raw card-search payloads
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog_page(&self, query: &str) -> Result<serde_json::Value, SourceError>;
}

/// Supplies raw player payloads
#[async_trait]
pub trait PlayerSource: Send + Sync {
    async fn fetch_player(&self, player_id: &str) -> Result<serde_json::Value, SourceError>;
}

/// One way of reaching the upstream JSON API
#[async_trait]
pub trait Transport: Send + Sync {
    /// Strategy name used in logs and failure reports
    fn name(&self) -> &str;

    /// GET a path (relative to the API root, query string included) as JSON
    async fn get_json(&self, path_and_query: &str) -> Result<serde_json::Value, SourceError>;
}

/// Catalog and player source backed by the site's REST paths
pub struct ApiSource {
    transport: Arc<dyn Transport>,
    config: SourceConfig,
}

impl ApiSource {
    pub fn new(transport: Arc<dyn Transport>, config: SourceConfig) -> Self {
        Self { transport, config }
    }

    /// Build the ranked transport list described by `config`
    pub fn from_config(config: &SourceConfig) -> Result<Self, SourceError> {
        let transport = build_transport(config)?;
        Ok(Self::new(Arc::new(transport), config.clone()))
    }
}

#[async_trait]
impl CatalogSource for ApiSource {
    async fn fetch_catalog_page(&self, query: &str) -> Result<serde_json::Value, SourceError> {
        let path = self.config.catalog_path_for(query);
        log::info!("Fetching catalog page via {}: {}", self.transport.name(), path);
        self.transport.get_json(&path).await
    }
}

#[async_trait]
impl PlayerSource for ApiSource {
    async fn fetch_player(&self, player_id: &str) -> Result<serde_json::Value, SourceError> {
        let path = self.config.player_path_for(player_id);
        log::info!("Fetching player via {}: {}", self.transport.name(), path);
        self.transport.get_json(&path).await
    }
}

/// Plain direct fetch first, then browser headers, then the relay
pub fn build_transport(config: &SourceConfig) -> Result<RankedTransport, SourceError> {
    let mut strategies: Vec<Arc<dyn Transport>> = vec![Arc::new(DirectTransport::new(
        &config.base_url,
        HeaderProfile::Plain,
        config.timeout,
    )?)];

    if config.browser_headers {
        strategies.push(Arc::new(DirectTransport::new(
            &config.base_url,
            HeaderProfile::Browser,
            config.timeout,
        )?));
    }

    if let Some(relay_url) = &config.relay_url {
        strategies.push(Arc::new(RelayTransport::new(relay_url, config.timeout)?));
    }

    let transport = RankedTransport::new(strategies);
    log::info!(
        "Fetch strategies in order: {}",
        transport.strategy_names().join(", ")
    );
    Ok(transport)
}

/// Turn an HTTP response into JSON, recognising anti-bot answers.
pub(crate) async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, SourceError> {
    let status = response.status();
    if status == reqwest::StatusCode::FORBIDDEN {
        return Err(SourceError::Blocked(format!(
            "HTTP {} from {}",
            status,
            response.url()
        )));
    }
    if !status.is_success() {
        return Err(SourceError::HttpStatus(status));
    }

    let text = response.text().await?;
    match serde_json::from_str(&text) {
        Ok(value) => Ok(value),
        Err(_) if is_challenge_page(&text) => Err(SourceError::Blocked(
            "anti-bot challenge page returned instead of JSON".to_string(),
        )),
        Err(_) => Err(SourceError::NotJson(snippet(&text, 200))),
    }
}

fn is_challenge_page(body: &str) -> bool {
    body.contains("Just a moment") || body.contains("challenge")
}

fn snippet(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
