//! Error taxonomy for fetching and normalizing card data

/// Failure of an external fetch strategy.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("Request blocked by anti-bot protection: {0}")]
    Blocked(String),

    #[error("Response is not valid JSON: {0}")]
    NotJson(String),

    #[error("All fetch strategies failed: {}", .0.join("; "))]
    Exhausted(Vec<String>),
}

/// Terminal failure of one comparison attempt (or one catalog load).
#[derive(Debug, thiserror::Error)]
pub enum TradeError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),

    #[error("Malformed catalog data: {0}")]
    MalformedCatalogData(String),

    #[error("Malformed player data: {0}")]
    MalformedPlayerData(String),

    #[error("Card catalog has not been loaded")]
    CatalogNotLoaded,

    #[error("Player id must not be empty")]
    InvalidPlayerId,
}

impl TradeError {
    /// Short machine-readable tag, used by the web API error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            TradeError::SourceUnavailable(_) => "source_unavailable",
            TradeError::MalformedCatalogData(_) => "malformed_catalog_data",
            TradeError::MalformedPlayerData(_) => "malformed_player_data",
            TradeError::CatalogNotLoaded => "catalog_not_loaded",
            TradeError::InvalidPlayerId => "invalid_player_id",
        }
    }
}
