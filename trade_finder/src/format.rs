//! Plain-text trade report for the terminal

use crate::reconcile::{ReconciliationResult, TradeOffer};
use pocket_common::rarity_symbol;

const NO_TRADES: &str = "No clear trades.";

/// Text report with one section per direction
pub fn format_result(result: &ReconciliationResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} can offer {} ({} has more than one, {} is missing it):\n",
        result.player1_name, result.player2_name, result.player1_name, result.player2_name
    ));
    push_offers(&mut output, &result.offers_from_player1);

    output.push('\n');

    output.push_str(&format!(
        "{} can offer {} ({} has more than one, {} is missing it):\n",
        result.player2_name, result.player1_name, result.player2_name, result.player1_name
    ));
    push_offers(&mut output, &result.offers_from_player2);

    output
}

fn push_offers(output: &mut String, offers: &[TradeOffer]) {
    if offers.is_empty() {
        output.push_str(&format!("    {NO_TRADES}\n"));
        return;
    }

    let name_width = offers.iter().map(|o| o.name.chars().count()).max().unwrap_or(0);
    for offer in offers {
        let rarity = offer
            .rarity_code
            .as_deref()
            .map(rarity_symbol)
            .unwrap_or("?");
        output.push_str(&format!(
            "    {:<name_width$}  {:<6} owns {:>3}  [{}]\n",
            offer.name, rarity, offer.surplus_amount, offer.card_id
        ));
    }
}

/// One-line summary for logs and the CLI footer
pub fn format_summary(result: &ReconciliationResult) -> String {
    format!(
        "{} -> {}: {} offer(s), {} -> {}: {} offer(s)",
        result.player1_name,
        result.player2_name,
        result.offers_from_player1.len(),
        result.player2_name,
        result.player1_name,
        result.offers_from_player2.len()
    )
}
