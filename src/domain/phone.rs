//! Phone number domain logic.
//!
//! Covers international (`+CC ...`), North American, European grouped and
//! trunk-prefixed regional (`030-12345678`) formats plus extensions. A match
//! is never allowed to touch another digit on either side, so fragments of
//! longer numeric runs are not reported.

use super::entity::EntityKind;
use super::{PatternMatch, PatternMatcher};
use once_cell::sync::Lazy;
use regex::Regex;

/// Phone number pattern matcher.
///
/// Supported formats include:
/// - +49 30 1234567
/// - (555) 123-4567, 555-123-4567, +1 555 123 4567
/// - +41 44 668 18 00
/// - 030-12345678, 089/1234567
/// - ext. 1234
#[derive(Debug, Clone)]
pub struct PhoneNumberMatcher;

impl PhoneNumberMatcher {
    /// Creates a new phone number matcher.
    pub fn new() -> Self {
        Self
    }

    /// Alternatives for a single phone number, without digit guards.
    fn alternatives() -> String {
        [
            // European grouped format
            r"\+\d{2}[-. ]?\d{2}[-. ]?\d{3}[-. ]?\d{2}[-. ]?\d{2}",
            // International format with country code
            r"\+\d{1,3}[-. ]?\(?\d{1,4}\)?[-. ]?\d{1,4}[-. ]?\d{1,9}",
            // North American format
            r"(?:\+?1[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}",
            // Trunk-prefixed regional format
            r"\(?0\d{2,4}\)?(?:[-. ]|/ ?)?\d{4,8}(?:[-. ]\d{2,6})?",
            // Extensions
            r"\b(?:ext|x|ext\.|extension)[-. ]?\d{1,5}",
        ]
        .join("|")
    }

    /// The guarded pattern. The number itself is the `phone` group; the
    /// surrounding non-digit characters are consumed by the outer match.
    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(&format!(
                r"(?:^|\D)(?P<phone>{})(?:\D|$)",
                PhoneNumberMatcher::alternatives()
            ))
            .expect("Valid phone number regex")
        });
        &PATTERN
    }
}

impl Default for PhoneNumberMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher for PhoneNumberMatcher {
    fn kind(&self) -> EntityKind {
        EntityKind::Phone
    }

    fn pattern(&self) -> &Regex {
        Self::regex()
    }

    fn find_all<'a>(&self, text: &'a str) -> Vec<PatternMatch<'a>> {
        let mut matches = Vec::new();
        let mut pos = 0;

        // Resume right after the number, not after the guard character, so
        // a single separator can serve as the guard of two adjacent numbers.
        while pos <= text.len() {
            let Some(phone) = self
                .pattern()
                .captures_at(text, pos)
                .and_then(|caps| caps.name("phone"))
            else {
                break;
            };
            matches.push(PatternMatch::from(phone));
            pos = phone.end();
        }

        matches
    }
}
