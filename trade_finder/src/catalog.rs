//! Card catalog normalization
//!
//! Turns card-search payloads into the keyed reference map that every
//! comparison runs against. A catalog is built whole and never patched: a
//! refresh produces a new `Catalog` that replaces the old one.

use indexmap::IndexMap;
use pocket_common::{rarity_code, CardSearchResponse, RawCard, TradeError};
use serde::{Deserialize, Serialize};

/// One row of the reference catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub display_name: String,
    pub image_url: String,
    pub rarity_code: String,
    pub expansion_id: Option<String>,
}

impl From<RawCard> for CatalogEntry {
    fn from(card: RawCard) -> Self {
        let rarity_code = rarity_code(&card.display_image_url);
        Self {
            id: card.card_def_key,
            display_name: card.name,
            image_url: card.display_image_url,
            rarity_code,
            expansion_id: card.expansion_id,
        }
    }
}

/// Card lookup by card id, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl Catalog {
    /// Normalize a single card-search payload.
    pub fn from_payload(payload: &serde_json::Value) -> Result<Self, TradeError> {
        Ok(normalize_catalog(parse_search_payload(payload)?))
    }

    /// Normalize several search pages into one catalog.
    ///
    /// Every page is validated before any entry is kept, so a malformed page
    /// yields an error and no catalog at all.
    pub fn from_pages(pages: &[serde_json::Value]) -> Result<Self, TradeError> {
        let mut records = Vec::new();
        for page in pages {
            records.extend(parse_search_payload(page)?);
        }
        Ok(normalize_catalog(records))
    }

    /// Build a catalog from already-normalized entries (last write wins).
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let entries = entries.into_iter().map(|e| (e.id.clone(), e)).collect();
        Self { entries }
    }

    /// Look up a card by id
    pub fn get(&self, card_id: &str) -> Option<&CatalogEntry> {
        self.entries.get(card_id)
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.entries.contains_key(card_id)
    }

    /// Get the number of cards
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all card ids
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }
}

/// Extract the card records from a search payload.
pub fn parse_search_payload(payload: &serde_json::Value) -> Result<Vec<RawCard>, TradeError> {
    CardSearchResponse::deserialize(payload)
        .map(|response| response.data.results)
        .map_err(|e| TradeError::MalformedCatalogData(e.to_string()))
}

/// Key raw card records by id.
///
/// Duplicate ids overwrite the earlier record; the card keeps the position
/// of its first occurrence.
pub fn normalize_catalog<I>(records: I) -> Catalog
where
    I: IntoIterator<Item = RawCard>,
{
    let mut entries: IndexMap<String, CatalogEntry> = IndexMap::new();
    for record in records {
        let entry = CatalogEntry::from(record);
        if let Some(previous) = entries.insert(entry.id.clone(), entry) {
            log::debug!("Duplicate card id in catalog, replacing: {}", previous.id);
        }
    }
    Catalog { entries }
}

#[cfg(test)]
pub use tests::make_test_entry;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Create a catalog entry whose image carries the given rarity code
    pub fn make_test_entry(id: &str, name: &str, rarity: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            display_name: name.to_string(),
            image_url: format!("https://cdn.example.com/{id}_{rarity}.webp"),
            rarity_code: rarity.to_string(),
            expansion_id: Some("A1".to_string()),
        }
    }

    fn raw_card(id: &str, name: &str, image: &str) -> serde_json::Value {
        json!({
            "cardDefKey": id,
            "name": name,
            "displayImageUrl": image,
            "expansionId": "A1"
        })
    }

    fn search_payload(cards: Vec<serde_json::Value>) -> serde_json::Value {
        json!({ "data": { "results": cards } })
    }

    #[test]
    fn from_payload_extracts_display_attributes() {
        let payload = search_payload(vec![
            raw_card("X", "Pikachu ex", "https://cdn.example.com/X_RR.webp"),
            raw_card("Y", "Caterpie", "https://cdn.example.com/Y.webp"),
        ]);

        let catalog = Catalog::from_payload(&payload).unwrap();
        assert_eq!(catalog.len(), 2);

        let x = catalog.get("X").unwrap();
        assert_eq!(x.display_name, "Pikachu ex");
        assert_eq!(x.image_url, "https://cdn.example.com/X_RR.webp");
        assert_eq!(x.rarity_code, "RR");
        assert_eq!(x.expansion_id.as_deref(), Some("A1"));

        assert_eq!(catalog.get("Y").unwrap().rarity_code, "C");
        assert!(catalog.get("Z").is_none());
    }

    #[test]
    fn duplicate_ids_last_write_wins() {
        let payload = search_payload(vec![
            raw_card("X", "Old Name", "x_C.webp"),
            raw_card("Y", "Other", "y_U.webp"),
            raw_card("X", "New Name", "x_AR.webp"),
        ]);

        let catalog = Catalog::from_payload(&payload).unwrap();
        assert_eq!(catalog.len(), 2);
        let x = catalog.get("X").unwrap();
        assert_eq!(x.display_name, "New Name");
        assert_eq!(x.rarity_code, "AR");
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["X", "Y"]);
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        let cases = vec![
            json!([]),
            json!({ "data": {} }),
            json!({ "results": [] }),
            json!({ "data": { "results": [ { "name": "missing key", "displayImageUrl": "a.webp" } ] } }),
        ];

        for payload in cases {
            match Catalog::from_payload(&payload) {
                Err(TradeError::MalformedCatalogData(_)) => {}
                other => panic!("Expected MalformedCatalogData for {payload}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn empty_results_give_empty_catalog() {
        let catalog = Catalog::from_payload(&search_payload(vec![])).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn from_pages_merges_in_order() {
        let pages = vec![
            search_payload(vec![raw_card("A", "First", "a_C.webp")]),
            search_payload(vec![
                raw_card("B", "Second", "b_R.webp"),
                raw_card("A", "First (reprint)", "a_SR.webp"),
            ]),
        ];

        let catalog = Catalog::from_pages(&pages).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("A").unwrap().display_name, "First (reprint)");
        assert_eq!(catalog.get("B").unwrap().rarity_code, "R");
    }

    #[test]
    fn from_pages_fails_whole_on_one_bad_page() {
        let pages = vec![
            search_payload(vec![raw_card("A", "First", "a_C.webp")]),
            json!({ "error": "Proxy error" }),
        ];

        assert!(matches!(
            Catalog::from_pages(&pages),
            Err(TradeError::MalformedCatalogData(_))
        ));
    }

    #[test]
    fn from_entries_builds_lookup() {
        let catalog = Catalog::from_entries(vec![
            make_test_entry("X", "Pikachu ex", "RR"),
            make_test_entry("Y", "Caterpie", "C"),
        ]);

        assert!(catalog.contains("X"));
        assert!(!catalog.contains("Q"));
        assert_eq!(catalog.iter().count(), 2);
    }
}
