//! Pocket Trade Finder
//!
//! Compares two player collections against the card catalog and prints the
//! cards each side could offer the other. With `--web-port` it serves the
//! same comparison as a web UI instead.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use trade_finder::config::{
    DEFAULT_BASE_URL, DEFAULT_CATALOG_PATH, DEFAULT_CATALOG_QUERY, DEFAULT_PLAYER_PATH,
    DEFAULT_TIMEOUT_SECS,
};
use trade_finder::export::export_result;
use trade_finder::format::{format_result, format_summary};
use trade_finder::{OfferOrder, ReconciliationService, SourceConfig};

/// Find trades between two players' card collections
#[derive(Parser, Debug)]
#[command(name = "trade_finder")]
#[command(version, about, long_about = None)]
struct Args {
    /// First player's id
    #[arg(long, env = "POCKET_PLAYER1")]
    player1: Option<String>,

    /// Second player's id
    #[arg(long, env = "POCKET_PLAYER2")]
    player2: Option<String>,

    /// Catalog search query, one page fetched per query (repeatable)
    #[arg(long = "catalog-query", default_value = DEFAULT_CATALOG_QUERY)]
    catalog_queries: Vec<String>,

    /// Base URL of the card site API
    #[arg(long, env = "POCKET_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Catalog path template, must contain {query}
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    catalog_path: String,

    /// Player path template, must contain {player_id}
    #[arg(long, default_value = DEFAULT_PLAYER_PATH)]
    player_path: String,

    /// Relay service tried when direct requests fail
    #[arg(long, env = "POCKET_RELAY_URL")]
    relay_url: Option<String>,

    /// Also try a request with desktop browser headers
    #[arg(long, default_value_t = false)]
    browser_headers: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Offer order: upstream, id, name or rarity
    #[arg(long, default_value = "upstream", value_parser = parse_order)]
    sort: OfferOrder,

    /// Write can_offer.csv and can_receive.csv into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Serve the web UI on this port instead of running one comparison
    #[arg(long)]
    web_port: Option<u16>,
}

fn parse_order(s: &str) -> Result<OfferOrder, String> {
    OfferOrder::parse(s).ok_or_else(|| format!("unknown sort order: {}", s))
}

impl Args {
    fn source_config(&self) -> SourceConfig {
        SourceConfig {
            base_url: self.base_url.clone(),
            catalog_path: self.catalog_path.clone(),
            player_path: self.player_path.clone(),
            relay_url: self.relay_url.clone().filter(|url| !url.trim().is_empty()),
            browser_headers: self.browser_headers,
            timeout: Duration::from_secs(self.timeout_secs),
            catalog_queries: self.catalog_queries.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Starting trade_finder...");

    let config = args.source_config();
    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }
    log::info!("Card API: {}", config.base_url);

    let service = match ReconciliationService::from_config(&config) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            log::error!("Failed to set up card sources: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(port) = args.web_port {
        // The UI reports a missing catalog and can retry via refresh
        if let Err(e) = service.load_catalog().await {
            log::warn!("Initial catalog load failed, serving without a catalog: {}", e);
        }
        if let Err(e) = trade_finder::web::serve(service, port).await {
            log::error!("Web server error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let (player1, player2) = match (&args.player1, &args.player2) {
        (Some(p1), Some(p2)) => (p1.as_str(), p2.as_str()),
        _ => {
            log::error!("Both --player1 and --player2 are required unless --web-port is set");
            std::process::exit(2);
        }
    };

    if let Err(e) = service.load_catalog().await {
        log::error!("Failed to load card catalog: {}", e);
        std::process::exit(1);
    }

    let result = match service.compare(player1, player2).await {
        Ok(result) => result.sorted(args.sort),
        Err(e) => {
            log::error!("Comparison failed ({}): {}", e.kind(), e);
            std::process::exit(1);
        }
    };

    print!("{}", format_result(&result));
    println!();
    println!("{}", format_summary(&result));

    if let Some(dir) = &args.export_dir {
        match export_result(&result, dir) {
            Ok(files) => log::info!(
                "Wrote {} and {}",
                files.can_offer.display(),
                files.can_receive.display()
            ),
            Err(e) => {
                log::error!("Failed to export trades: {}", e);
                std::process::exit(1);
            }
        }
    }
}
