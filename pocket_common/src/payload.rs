//! JSON payload shapes returned by the card site's API
//!
//! Only the fields the trade finder reads are declared; everything else in
//! the upstream documents is ignored.

use serde::{Deserialize, Deserializer};

/// `GET cards/search/?q=...` response envelope
#[derive(Debug, Deserialize, Clone)]
pub struct CardSearchResponse {
    pub data: CardSearchData,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CardSearchData {
    pub results: Vec<RawCard>,
}

/// One card record of a search result
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawCard {
    pub card_def_key: String,
    pub name: String,
    pub display_image_url: String,
    /// Sent as a string by some endpoints and as a number by others
    #[serde(default, deserialize_with = "string_or_number")]
    pub expansion_id: Option<String>,
}

/// `GET players/{id}/` response envelope
#[derive(Debug, Deserialize, Clone)]
pub struct PlayerResponse {
    pub data: PlayerData,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlayerData {
    pub player: PlayerInfo,
    pub cards: Vec<RawOwnedCard>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlayerInfo {
    pub name: String,
}

/// One collection line of a player record
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawOwnedCard {
    pub card_id: String,
    pub amount: i64,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
