//! Ordered fallback over several transports

use super::Transport;
use async_trait::async_trait;
use pocket_common::SourceError;
use std::sync::Arc;

/// Tries each strategy in order until one returns JSON
pub struct RankedTransport {
    strategies: Vec<Arc<dyn Transport>>,
}

impl RankedTransport {
    pub fn new(strategies: Vec<Arc<dyn Transport>>) -> Self {
        Self { strategies }
    }

    /// Strategy names in the order they are tried
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }
}

#[async_trait]
impl Transport for RankedTransport {
    fn name(&self) -> &str {
        "ranked"
    }

    async fn get_json(&self, path_and_query: &str) -> Result<serde_json::Value, SourceError> {
        let mut failures = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            match strategy.get_json(path_and_query).await {
                Ok(value) => {
                    if !failures.is_empty() {
                        log::info!(
                            "Strategy {} succeeded for {} after {} failure(s)",
                            strategy.name(),
                            path_and_query,
                            failures.len()
                        );
                    }
                    return Ok(value);
                }
                Err(e) => {
                    log::warn!("Strategy {} failed for {}: {}", strategy.name(), path_and_query, e);
                    failures.push(format!("{}: {}", strategy.name(), e));
                }
            }
        }

        Err(SourceError::Exhausted(failures))
    }
}
