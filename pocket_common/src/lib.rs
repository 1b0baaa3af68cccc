//! Shared types for Pocket card trading
//!
//! Wire shapes of the card site's JSON API, rarity helpers derived from card
//! image references, and the error taxonomy shared by every crate.

pub mod error;
pub mod payload;
pub mod rarity;

pub use error::{SourceError, TradeError};
pub use payload::{
    CardSearchData, CardSearchResponse, PlayerData, PlayerInfo, PlayerResponse, RawCard,
    RawOwnedCard,
};
pub use rarity::{rarity_code, rarity_rank, rarity_symbol, DEFAULT_RARITY};
