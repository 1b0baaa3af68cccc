//! Direct HTTP fetch against the upstream API

use super::{read_json, Transport};
use crate::config::join_url;
use async_trait::async_trait;
use pocket_common::SourceError;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER, USER_AGENT};
use std::time::Duration;

const APP_USER_AGENT: &str = "trade_finder/0.1";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36";

/// Header set sent with each request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderProfile {
    /// Identify as this tool and ask for JSON
    Plain,
    /// Look like a desktop browser navigating the site
    Browser,
}

impl HeaderProfile {
    fn strategy_name(&self) -> &'static str {
        match self {
            HeaderProfile::Plain => "direct",
            HeaderProfile::Browser => "direct-browser",
        }
    }
}

/// GETs `{base_url}/{path}` with a pooled client
pub struct DirectTransport {
    client: reqwest::Client,
    base_url: String,
    profile: HeaderProfile,
    /// Scheme + host of the base URL, sent as Origin/Referer by the browser profile
    site_origin: Option<String>,
}

impl DirectTransport {
    pub fn new(base_url: &str, profile: HeaderProfile, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let site_origin = reqwest::Url::parse(base_url)
            .ok()
            .map(|url| url.origin().ascii_serialization());

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            profile,
            site_origin,
        })
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let builder = self.client.get(url);
        match self.profile {
            HeaderProfile::Plain => builder
                .header(USER_AGENT, APP_USER_AGENT)
                .header(ACCEPT, "application/json"),
            HeaderProfile::Browser => {
                let mut builder = builder
                    .header(USER_AGENT, BROWSER_USER_AGENT)
                    .header(
                        ACCEPT,
                        "application/json, text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                    )
                    .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                    .header("Sec-Fetch-Mode", "cors")
                    .header("Sec-Fetch-Site", "same-origin");
                if let Some(origin) = &self.site_origin {
                    builder = builder
                        .header(ORIGIN, origin.as_str())
                        .header(REFERER, format!("{}/", origin));
                }
                builder
            }
        }
    }
}

#[async_trait]
impl Transport for DirectTransport {
    fn name(&self) -> &str {
        self.profile.strategy_name()
    }

    async fn get_json(&self, path_and_query: &str) -> Result<serde_json::Value, SourceError> {
        let url = join_url(&self.base_url, path_and_query);
        log::debug!("[{}] GET {}", self.name(), url);

        let response = self.request(&url).send().await?;
        read_json(response).await
    }
}
