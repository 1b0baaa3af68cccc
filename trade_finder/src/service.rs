//! Reconciliation service: one catalog slot, one comparison per request
//!
//! The catalog is swapped whole on refresh. A comparison takes a snapshot of
//! the catalog when it starts and uses only that snapshot, so a refresh that
//! lands mid-comparison affects the next comparison, not the running one.

use crate::catalog::Catalog;
use crate::config::SourceConfig;
use crate::profile::PlayerProfile;
use crate::reconcile::{reconcile, ReconciliationResult};
use crate::source::{ApiSource, CatalogSource, PlayerSource};
use pocket_common::{SourceError, TradeError};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub struct ReconciliationService {
    catalog_source: Arc<dyn CatalogSource>,
    player_source: Arc<dyn PlayerSource>,
    catalog_queries: Vec<String>,
    catalog: RwLock<Option<Arc<Catalog>>>,
    /// Held for a whole fetch-and-swap so refreshes install in start order
    refresh_guard: Mutex<()>,
}

impl ReconciliationService {
    pub fn new(
        catalog_source: Arc<dyn CatalogSource>,
        player_source: Arc<dyn PlayerSource>,
        catalog_queries: Vec<String>,
    ) -> Self {
        Self {
            catalog_source,
            player_source,
            catalog_queries,
            catalog: RwLock::new(None),
            refresh_guard: Mutex::new(()),
        }
    }

    /// Service whose catalog and player data both come from the configured API
    pub fn from_config(config: &SourceConfig) -> Result<Self, SourceError> {
        let source = Arc::new(ApiSource::from_config(config)?);
        let queries = config
            .catalog_queries
            .iter()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self::new(source.clone(), source, queries))
    }

    pub fn catalog_queries(&self) -> &[String] {
        &self.catalog_queries
    }

    /// Current catalog snapshot, if one has been loaded
    pub async fn catalog(&self) -> Option<Arc<Catalog>> {
        self.catalog.read().await.clone()
    }

    /// Fetch every catalog page and replace the loaded catalog.
    ///
    /// On any failure the previously loaded catalog stays in place.
    /// Concurrent refreshes run one after another.
    pub async fn load_catalog(&self) -> Result<Arc<Catalog>, TradeError> {
        let _refresh = self.refresh_guard.lock().await;

        let mut pages = Vec::with_capacity(self.catalog_queries.len());
        for query in &self.catalog_queries {
            let page = self.catalog_source.fetch_catalog_page(query).await.map_err(|e| {
                log::error!("Failed to fetch catalog page for query {}: {}", query, e);
                TradeError::from(e)
            })?;
            pages.push(page);
        }

        let catalog = Arc::new(Catalog::from_pages(&pages).map_err(|e| {
            log::error!("Failed to normalize catalog: {}", e);
            e
        })?);

        *self.catalog.write().await = Some(Arc::clone(&catalog));
        log::info!(
            "Loaded catalog: {} cards from {} query(ies)",
            catalog.len(),
            self.catalog_queries.len()
        );
        Ok(catalog)
    }

    /// Compare two players against the current catalog snapshot.
    ///
    /// Both player records are fetched concurrently; the first failure
    /// aborts the comparison and no partial result is produced.
    pub async fn compare(
        &self,
        player1_id: &str,
        player2_id: &str,
    ) -> Result<ReconciliationResult, TradeError> {
        let (player1_id, player2_id) = (player1_id.trim(), player2_id.trim());
        if player1_id.is_empty() || player2_id.is_empty() {
            return Err(TradeError::InvalidPlayerId);
        }

        let catalog = self.catalog().await.ok_or(TradeError::CatalogNotLoaded)?;

        log::info!("Comparing players {} and {}", player1_id, player2_id);
        let (raw1, raw2) = tokio::try_join!(
            self.player_source.fetch_player(player1_id),
            self.player_source.fetch_player(player2_id)
        )
        .map_err(|e| {
            log::error!("Failed to fetch player data: {}", e);
            TradeError::from(e)
        })?;

        let profile1 = PlayerProfile::from_payload(&raw1, &catalog)?;
        let profile2 = PlayerProfile::from_payload(&raw2, &catalog)?;

        Ok(reconcile(&catalog, &profile1, &profile2))
    }
}
