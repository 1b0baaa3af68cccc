//! Pairwise trade reconciliation
//!
//! A card is offered from giver G to receiver R when G owns more than one
//! copy and the card is on R's wishlist.

use crate::catalog::Catalog;
use crate::profile::PlayerProfile;
use pocket_common::rarity_rank;
use serde::Serialize;
use std::cmp::Ordering;

/// One directional trade candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOffer {
    pub card_id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub rarity_code: Option<String>,
    /// The giver's full owned count
    pub surplus_amount: u64,
}

/// Both offer directions of one comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    pub player1_name: String,
    pub player2_name: String,
    pub offers_from_player1: Vec<TradeOffer>,
    pub offers_from_player2: Vec<TradeOffer>,
}

/// Presentation order for offer lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OfferOrder {
    /// Giver's collection order, as reconciled
    #[default]
    Upstream,
    Id,
    Name,
    /// Rarity tier, then name; unknown codes last
    Rarity,
}

impl OfferOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "upstream" | "none" => Some(OfferOrder::Upstream),
            "id" => Some(OfferOrder::Id),
            "name" => Some(OfferOrder::Name),
            "rarity" => Some(OfferOrder::Rarity),
            _ => None,
        }
    }

    fn compare(&self, a: &TradeOffer, b: &TradeOffer) -> Ordering {
        match self {
            OfferOrder::Upstream => Ordering::Equal,
            OfferOrder::Id => a.card_id.cmp(&b.card_id),
            OfferOrder::Name => a
                .name
                .cmp(&b.name)
                .then_with(|| a.card_id.cmp(&b.card_id)),
            OfferOrder::Rarity => {
                let rank = |o: &TradeOffer| {
                    o.rarity_code
                        .as_deref()
                        .and_then(rarity_rank)
                        .unwrap_or(usize::MAX)
                };
                rank(a)
                    .cmp(&rank(b))
                    .then_with(|| a.name.cmp(&b.name))
                    .then_with(|| a.card_id.cmp(&b.card_id))
            }
        }
    }
}

impl ReconciliationResult {
    /// Re-order both offer lists. Sorting is stable, so `Upstream` is a no-op.
    pub fn sorted(mut self, order: OfferOrder) -> Self {
        if order != OfferOrder::Upstream {
            self.offers_from_player1.sort_by(|a, b| order.compare(a, b));
            self.offers_from_player2.sort_by(|a, b| order.compare(a, b));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.offers_from_player1.is_empty() && self.offers_from_player2.is_empty()
    }
}

/// Compute both offer directions between two profiles.
pub fn reconcile(
    catalog: &Catalog,
    player1: &PlayerProfile,
    player2: &PlayerProfile,
) -> ReconciliationResult {
    let offers_from_player1 = offers_between(catalog, player1, player2);
    let offers_from_player2 = offers_between(catalog, player2, player1);

    log::info!(
        "{} can offer {} card(s) to {}, {} can offer {} card(s) back",
        player1.display_name(),
        offers_from_player1.len(),
        player2.display_name(),
        player2.display_name(),
        offers_from_player2.len()
    );

    ReconciliationResult {
        player1_name: player1.display_name().to_string(),
        player2_name: player2.display_name().to_string(),
        offers_from_player1,
        offers_from_player2,
    }
}

/// Offers from `giver` to `receiver`, in the giver's collection order.
pub fn offers_between(
    catalog: &Catalog,
    giver: &PlayerProfile,
    receiver: &PlayerProfile,
) -> Vec<TradeOffer> {
    giver
        .owned_counts()
        .filter(|(card_id, amount)| *amount > 1 && receiver.wants(card_id))
        .map(|(card_id, amount)| make_offer(catalog, card_id, amount))
        .collect()
}

fn make_offer(catalog: &Catalog, card_id: &str, amount: u64) -> TradeOffer {
    match catalog.get(card_id) {
        Some(entry) => TradeOffer {
            card_id: card_id.to_string(),
            name: entry.display_name.clone(),
            image_url: Some(entry.image_url.clone()),
            rarity_code: Some(entry.rarity_code.clone()),
            surplus_amount: amount,
        },
        None => {
            log::warn!("Card {} missing from catalog, offering without details", card_id);
            TradeOffer {
                card_id: card_id.to_string(),
                name: card_id.to_string(),
                image_url: None,
                rarity_code: None,
                surplus_amount: amount,
            }
        }
    }
}
