//! Pocket Trade Finder - collection reconciliation for card trades
//!
//! Loads a card catalog from the card site, fetches two players' collections
//! and lists the cards each player holds spares of that the other is missing.

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod profile;
pub mod reconcile;
pub mod service;
pub mod source;
pub mod web;

pub use catalog::{normalize_catalog, Catalog, CatalogEntry};
pub use config::SourceConfig;
pub use error::{FinderError, Result};
pub use profile::{build_profile, PlayerProfile};
pub use reconcile::{reconcile, OfferOrder, ReconciliationResult, TradeOffer};
pub use service::ReconciliationService;
