//! In-memory sources shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pocket_common::SourceError;
use serde_json::{json, Value};
use tokio::sync::{Notify, Semaphore};
use trade_finder::source::{CatalogSource, PlayerSource};
use trade_finder::ReconciliationService;

/// Search payload with one `(id, name, rarity)` record per card
pub fn catalog_page(cards: &[(&str, &str, &str)]) -> Value {
    let results: Vec<Value> = cards
        .iter()
        .map(|(id, name, rarity)| {
            json!({
                "cardDefKey": id,
                "name": name,
                "displayImageUrl": format!("https://cdn.example.com/cards/{id}_{rarity}.webp"),
                "expansionId": "A1"
            })
        })
        .collect();
    json!({ "data": { "results": results } })
}

/// Player payload with one `(card id, amount)` line per owned card
pub fn player_record(name: &str, cards: &[(&str, i64)]) -> Value {
    let cards: Vec<Value> = cards
        .iter()
        .map(|(id, amount)| json!({ "cardId": id, "amount": amount }))
        .collect();
    json!({ "data": { "player": { "name": name }, "cards": cards } })
}

/// Catalog source serving one swappable page for every query
pub struct FakeCatalogSource {
    page: Mutex<Option<Value>>,
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    /// Highest number of fetches seen running at once
    pub max_in_flight: AtomicUsize,
}

impl FakeCatalogSource {
    pub fn new(page: Value) -> Arc<Self> {
        Arc::new(Self {
            page: Mutex::new(Some(page)),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }

    pub fn set_page(&self, page: Value) {
        *self.page.lock().unwrap() = Some(page);
    }

    /// Make every following fetch fail
    pub fn go_offline(&self) {
        *self.page.lock().unwrap() = None;
    }
}

#[async_trait]
impl CatalogSource for FakeCatalogSource {
    async fn fetch_catalog_page(&self, _query: &str) -> Result<Value, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.page
            .lock()
            .unwrap()
            .clone()
            .ok_or(SourceError::HttpStatus(reqwest::StatusCode::SERVICE_UNAVAILABLE))
    }
}

/// Player source answering from a map; unknown ids fail as blocked.
///
/// With a gate set, every fetch signals `started` and then waits for a gate
/// permit before answering.
pub struct FakePlayerSource {
    players: HashMap<String, Value>,
    gate: Option<Arc<Semaphore>>,
    pub started: Arc<Notify>,
}

impl FakePlayerSource {
    pub fn new(players: Vec<(&str, Value)>) -> Self {
        Self {
            players: players
                .into_iter()
                .map(|(id, record)| (id.to_string(), record))
                .collect(),
            gate: None,
            started: Arc::new(Notify::new()),
        }
    }

    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl PlayerSource for FakePlayerSource {
    async fn fetch_player(&self, player_id: &str) -> Result<Value, SourceError> {
        if let Some(gate) = &self.gate {
            self.started.notify_one();
            let _permit = gate.acquire().await.unwrap();
        }
        self.players
            .get(player_id)
            .cloned()
            .ok_or_else(|| SourceError::Blocked(format!("no such player: {player_id}")))
    }
}

/// Catalog {X: RR, Y: C}; ash owns X x3, misty owns nothing
pub fn scenario_a() -> (Arc<FakeCatalogSource>, FakePlayerSource) {
    let catalog = FakeCatalogSource::new(catalog_page(&[
        ("X", "Pikachu ex", "RR"),
        ("Y", "Caterpie", "C"),
    ]));
    let players = FakePlayerSource::new(vec![
        ("ash", player_record("Ash", &[("X", 3)])),
        ("misty", player_record("Misty", &[])),
    ]);
    (catalog, players)
}

pub fn service_with(
    catalog: Arc<FakeCatalogSource>,
    players: FakePlayerSource,
) -> Arc<ReconciliationService> {
    Arc::new(ReconciliationService::new(
        catalog,
        Arc::new(players),
        vec!["sv06".to_string()],
    ))
}
