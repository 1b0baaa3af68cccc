//! Rarity classification derived from card image references
//!
//! Card images are published as `<stem>_<CODE>.<ext>`, e.g. `..._RR.webp`.

use lazy_static::lazy_static;
use regex::Regex;

/// Rarity assigned when the image reference carries no code
pub const DEFAULT_RARITY: &str = "C";

lazy_static! {
    static ref RARITY_SUFFIX: Regex =
        Regex::new(r"_([A-Z]+)\.[A-Za-z0-9]+$").expect("rarity suffix pattern is valid");
}

/// Known rarity codes in ascending order, with their display symbols
const RARITY_TIERS: &[(&str, &str)] = &[
    ("C", "◇"),
    ("U", "◇◇"),
    ("R", "◇◇◇"),
    ("RR", "◇◇◇◇"),
    ("AR", "★"),
    ("SR", "★★"),
    ("IM", "★★★"),
    ("S", "⬢"),
    ("SSR", "⬢⬢"),
];

/// Extract the rarity code from an image URL.
///
/// Returns the `_`-separated run of uppercase ASCII letters directly before
/// the extension (`..._RR.webp`), or [`DEFAULT_RARITY`] when there is none.
pub fn rarity_code(image_url: &str) -> String {
    RARITY_SUFFIX
        .captures(image_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_RARITY.to_string())
}

/// Display symbol for a rarity code; unknown codes are shown as-is.
pub fn rarity_symbol(code: &str) -> &str {
    RARITY_TIERS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, symbol)| *symbol)
        .unwrap_or(code)
}

/// Position of a code in the rarity ladder (0 = most common).
pub fn rarity_rank(code: &str) -> Option<usize> {
    RARITY_TIERS.iter().position(|(c, _)| *c == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_trailing_code() {
        assert_eq!(
            rarity_code("https://cdn.example.com/cards/cPK_10_000010_00_PIKACHU_RR.webp"),
            "RR"
        );
        assert_eq!(rarity_code("img/A1_001_SSR.webp"), "SSR");
        assert_eq!(rarity_code("img/A1_001_U.png"), "U");
    }

    #[test]
    fn defaults_to_common_without_code() {
        assert_eq!(rarity_code("https://cdn.example.com/cards/card_001.webp"), "C");
        assert_eq!(rarity_code("https://cdn.example.com/cards/card_rr.webp"), "C");
        assert_eq!(rarity_code(""), "C");
    }

    #[test]
    fn code_must_end_the_stem() {
        // Uppercase run followed by more stem characters is not a code
        assert_eq!(rarity_code("img/A1_RR_001.webp"), "C");
        // Mixed-case token: only a full uppercase run after the separator counts
        assert_eq!(rarity_code("img/A1_xRR.webp"), "C");
    }

    #[test]
    fn code_needs_underscore_separator() {
        assert_eq!(rarity_code("img/cardRR.webp"), "C");
        assert_eq!(rarity_code("img/A1-RR.webp"), "C");
        // The extension itself may be any case
        assert_eq!(rarity_code("img/A1_RR.WEBP"), "RR");
    }

    #[test]
    fn symbols_for_known_and_unknown_codes() {
        assert_eq!(rarity_symbol("C"), "◇");
        assert_eq!(rarity_symbol("RR"), "◇◇◇◇");
        assert_eq!(rarity_symbol("SSR"), "⬢⬢");
        assert_eq!(rarity_symbol("PROMO"), "PROMO");
    }

    #[test]
    fn ranks_follow_the_ladder() {
        assert_eq!(rarity_rank("C"), Some(0));
        assert!(rarity_rank("RR") < rarity_rank("AR"));
        assert!(rarity_rank("IM") < rarity_rank("SSR"));
        assert_eq!(rarity_rank("PROMO"), None);
    }
}
