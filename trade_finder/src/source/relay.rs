//! Fetch through a relay service
//!
//! The relay takes the API path in a `path` query parameter and forwards any
//! other query parameters untouched: `cards/search/?q=sv06` becomes
//! `{relay}?path=cards%2Fsearch%2F&q=sv06`.

use super::{read_json, Transport};
use async_trait::async_trait;
use pocket_common::SourceError;
use reqwest::header::{ACCEPT, USER_AGENT};
use std::time::Duration;

pub struct RelayTransport {
    client: reqwest::Client,
    relay_url: String,
}

impl RelayTransport {
    pub fn new(relay_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            relay_url: relay_url.to_string(),
        })
    }

    /// Relay URL for an API path
    pub fn relay_url_for(&self, path_and_query: &str) -> String {
        let (path, query) = match path_and_query.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path_and_query, None),
        };
        let separator = if self.relay_url.contains('?') { '&' } else { '?' };

        let mut url = format!(
            "{}{}path={}",
            self.relay_url,
            separator,
            urlencoding::encode(path.trim_start_matches('/'))
        );
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('&');
            url.push_str(query);
        }
        url
    }
}

#[async_trait]
impl Transport for RelayTransport {
    fn name(&self) -> &str {
        "relay"
    }

    async fn get_json(&self, path_and_query: &str) -> Result<serde_json::Value, SourceError> {
        let url = self.relay_url_for(path_and_query);
        log::debug!("[relay] GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, "trade_finder/0.1")
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        read_json(response).await
    }
}
