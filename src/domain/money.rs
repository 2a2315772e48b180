//! Monetary amount detection.
//!
//! Amounts are recognized next to a currency symbol or ISO code on either
//! side, with optional magnitude suffixes in several languages (`5M$`,
//! `14,5 Mio. EUR`, `100万円`), spelled currency words and Indian lakh
//! grouping.

use super::entity::EntityKind;
use super::PatternMatcher;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Currency symbols and codes recognized around an amount.
pub const CURRENCIES: &[&str] = &[
    // Symbols
    "$", "€", "£", "¥", "₹", "₽", "₿", "₣", "₩",
    // Codes
    "CHF", "USD", "EUR", "GBP", "JPY", "CNY", "INR", "RUB", "BTC", "AUD", "CAD", "NZD", "HKD",
    "SGD", "SEK", "DKK", "PLN", "NOK", "CZK", "ZAR",
];

/// Magnitude suffixes (English, German/Dutch, French, Spanish/Portuguese,
/// Italian, Scandinavian, Russian, Chinese/Japanese).
const SUFFIXES: &[&str] = &[
    r"[KkMmBbTt]n?\b", "thousand", "million", "billion", "trillion",
    r"Tsd\.?", r"Mio\.?", r"Mrd\.?", r"Bio\.?", r"Bil\.?",
    "k€?", "M€?", "Md€?", "Mds€?",
    "mil", "millón", "millones", "billón", "billones", "milhão", "milhões", "bilhão", "bilhões",
    "mila", r"mln\.?", r"mlrd\.?",
    "mkr", "mdkr", "tkr",
    r"тыс\.?", r"млн\.?", r"млрд\.?", r"трлн\.?",
    "万", "億", "兆",
];

/// Amount with optional thousands groups and two decimals, either separator.
const NUMBER: &str = r"\d+(?:[.,]\d{3})*(?:[.,]\d{2})?";

/// Plain decimal used in front of a magnitude suffix.
const SCALED: &str = r"\d+(?:[.,]\d+)?";

/// Matcher for monetary amounts.
#[derive(Debug, Clone, Default)]
pub struct MoneyMatcher;

impl MoneyMatcher {
    /// Creates a new money matcher.
    pub fn new() -> Self {
        Self
    }

    fn source() -> String {
        let suffix = SUFFIXES.join("|");
        let mut patterns = Vec::new();

        // Suffixed amounts first so `$5M` is not cut short at `$5`.
        for currency in CURRENCIES {
            let c = regex::escape(currency);
            patterns.push(format!(r"{c}\s*{SCALED}\s*(?:{suffix})"));
            patterns.push(format!(r"{SCALED}\s*(?:{suffix})\s*{c}"));
        }
        for currency in CURRENCIES {
            let c = regex::escape(currency);
            patterns.push(format!(r"{c}\s*{NUMBER}"));
            patterns.push(format!(r"{NUMBER}\s*{c}"));
        }

        patterns.push(format!(
            r"{NUMBER}\s*(?:dollars|euros|pounds|yen|yuan|rupees|rubles|francs|won)\b"
        ));
        patterns.push(format!(r"{NUMBER}(?:{suffix})?\s*[円元¥]"));
        patterns.push(format!(r"{NUMBER}(?:{suffix})?\s*ドル"));
        patterns.push(r"\d+(?:,\d{2})+(?:\.\d{2})?\s*(?:Rs\.?|₹)".to_string());

        patterns.join("|")
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            RegexBuilder::new(&MoneyMatcher::source())
                .case_insensitive(true)
                .size_limit(64 * (1 << 20))
                .build()
                .expect("Valid money regex")
        });
        &PATTERN
    }
}

impl PatternMatcher for MoneyMatcher {
    fn kind(&self) -> EntityKind {
        EntityKind::Money
    }

    fn pattern(&self) -> &Regex {
        Self::regex()
    }
}
