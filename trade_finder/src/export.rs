//! CSV export of reconciliation results
//!
//! One table per direction. The `Check` column is a blank checkbox for
//! whoever works through the list in a spreadsheet.

use crate::error::{FinderError, Result};
use crate::reconcile::{ReconciliationResult, TradeOffer};
use csv::WriterBuilder;
use std::path::{Path, PathBuf};

pub const OFFER_HEADERS: [&str; 6] = ["Check", "Card ID", "Name", "Amount Owned", "Rarity", "Image URL"];

/// File written for player 1's offers to player 2
pub const CAN_OFFER_FILE: &str = "can_offer.csv";
/// File written for player 2's offers to player 1
pub const CAN_RECEIVE_FILE: &str = "can_receive.csv";

/// Paths written by [`export_result`]
#[derive(Debug, Clone)]
pub struct ExportedFiles {
    pub can_offer: PathBuf,
    pub can_receive: PathBuf,
}

fn offer_record(offer: &TradeOffer) -> [String; 6] {
    [
        "false".to_string(),
        offer.card_id.clone(),
        offer.name.clone(),
        offer.surplus_amount.to_string(),
        offer.rarity_code.clone().unwrap_or_default(),
        offer.image_url.clone().unwrap_or_default(),
    ]
}

/// Write one direction's offers as CSV
pub fn write_offers_csv<W: std::io::Write>(writer: W, offers: &[TradeOffer]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(OFFER_HEADERS)?;
    for offer in offers {
        wtr.write_record(offer_record(offer))?;
    }
    wtr.flush()?;
    Ok(())
}

/// One direction's offers as a CSV string
pub fn offers_to_csv(offers: &[TradeOffer]) -> Result<String> {
    let mut buffer = Vec::new();
    write_offers_csv(&mut buffer, offers)?;
    String::from_utf8(buffer).map_err(|e| FinderError::Export(e.to_string()))
}

/// Both directions in one table, with a leading `Direction` column
pub fn combined_csv(result: &ReconciliationResult) -> Result<String> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(vec![]);

    let mut header = vec!["Direction"];
    header.extend(OFFER_HEADERS);
    wtr.write_record(&header)?;

    let directions = [
        (
            format!("{} -> {}", result.player1_name, result.player2_name),
            &result.offers_from_player1,
        ),
        (
            format!("{} -> {}", result.player2_name, result.player1_name),
            &result.offers_from_player2,
        ),
    ];
    for (direction, offers) in &directions {
        for offer in offers.iter() {
            let mut record = vec![direction.clone()];
            record.extend(offer_record(offer));
            wtr.write_record(&record)?;
        }
    }

    let data = wtr
        .into_inner()
        .map_err(|e| FinderError::Io(e.into_error()))?;
    String::from_utf8(data).map_err(|e| FinderError::Export(e.to_string()))
}

/// Write both directions into `dir`, creating it if needed
pub fn export_result(result: &ReconciliationResult, dir: &Path) -> Result<ExportedFiles> {
    std::fs::create_dir_all(dir)?;

    let files = ExportedFiles {
        can_offer: dir.join(CAN_OFFER_FILE),
        can_receive: dir.join(CAN_RECEIVE_FILE),
    };

    write_offers_csv(
        std::fs::File::create(&files.can_offer)?,
        &result.offers_from_player1,
    )?;
    write_offers_csv(
        std::fs::File::create(&files.can_receive)?,
        &result.offers_from_player2,
    )?;

    log::info!(
        "Exported {} offer(s) to {} and {} offer(s) to {}",
        result.offers_from_player1.len(),
        files.can_offer.display(),
        result.offers_from_player2.len(),
        files.can_receive.display()
    );
    Ok(files)
}
