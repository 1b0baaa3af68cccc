//! Player profiles: owned counts and catalog-relative wishlist

use crate::catalog::Catalog;
use indexmap::{IndexMap, IndexSet};
use pocket_common::{PlayerData, PlayerResponse, TradeError};
use serde::Deserialize;

/// A player's collection as seen by one comparison run
#[derive(Debug, Clone)]
pub struct PlayerProfile {
    display_name: String,
    owned_counts: IndexMap<String, u64>,
    wishlist: IndexSet<String>,
}

impl PlayerProfile {
    /// Parse a raw player payload and build its profile against `catalog`.
    pub fn from_payload(payload: &serde_json::Value, catalog: &Catalog) -> Result<Self, TradeError> {
        let response = PlayerResponse::deserialize(payload)
            .map_err(|e| TradeError::MalformedPlayerData(e.to_string()))?;
        Ok(build_profile(response.data, catalog))
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Owned copies of a card; `None` when the player has none.
    pub fn owned(&self, card_id: &str) -> Option<u64> {
        self.owned_counts.get(card_id).copied()
    }

    /// Owned cards in upstream order
    pub fn owned_counts(&self) -> impl Iterator<Item = (&str, u64)> {
        self.owned_counts.iter().map(|(id, count)| (id.as_str(), *count))
    }

    pub fn owned_len(&self) -> usize {
        self.owned_counts.len()
    }

    pub fn wants(&self, card_id: &str) -> bool {
        self.wishlist.contains(card_id)
    }

    /// Wished cards in catalog order
    pub fn wishlist(&self) -> impl Iterator<Item = &str> {
        self.wishlist.iter().map(String::as_str)
    }

    pub fn wishlist_len(&self) -> usize {
        self.wishlist.len()
    }
}

/// Build a profile from a parsed player record.
///
/// Entries with a non-positive amount are dropped, so "owns 0" and "never
/// owned" look the same. Cards outside the catalog stay in the owned counts
/// but can never be wished for.
pub fn build_profile(data: PlayerData, catalog: &Catalog) -> PlayerProfile {
    let mut owned_counts: IndexMap<String, u64> = IndexMap::new();
    for card in data.cards {
        if card.amount > 0 {
            owned_counts.insert(card.card_id, card.amount as u64);
        }
    }

    let wishlist: IndexSet<String> = catalog
        .ids()
        .filter(|id| !owned_counts.contains_key(*id))
        .map(str::to_string)
        .collect();

    log::debug!(
        "Built profile for {}: {} owned, {} wished",
        data.player.name,
        owned_counts.len(),
        wishlist.len()
    );

    PlayerProfile {
        display_name: data.player.name,
        owned_counts,
        wishlist,
    }
}
