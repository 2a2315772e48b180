//! Date and time detection.
//!
//! Recognizes numeric dates (ISO, day-first, month-first), spelled months in
//! English, German, French, Spanish, Italian and Dutch, CJK and Hijri dates,
//! standalone years 1900-2100, fiscal quarter and half-year notations, clock
//! times with optional timezone, time ranges, and date+time combinations.
//!
//! Alternatives are ordered most specific first because the regex engine
//! reports the first alternative that matches at the leftmost position.

use super::entity::EntityKind;
use super::PatternMatcher;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

const MONTHS_EN: &str = "Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:tember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?";
const MONTHS_DE: &str = "Jan(?:uar)?|Feb(?:ruar)?|Mär(?:z)?|Apr(?:il)?|Mai|Jun(?:i)?|Jul(?:i)?|Aug(?:ust)?|Sep(?:tember)?|Okt(?:ober)?|Nov(?:ember)?|Dez(?:ember)?";
const MONTHS_FR: &str = "janv(?:ier)?|févr(?:ier)?|mars|avr(?:il)?|mai|juin|juil(?:let)?|août|sept(?:embre)?|oct(?:obre)?|nov(?:embre)?|déc(?:embre)?";
const MONTHS_ES: &str = "ene(?:ro)?|feb(?:rero)?|mar(?:zo)?|abr(?:il)?|may(?:o)?|jun(?:io)?|jul(?:io)?|ago(?:sto)?|sep(?:tiembre)?|oct(?:ubre)?|nov(?:iembre)?|dic(?:iembre)?";
const MONTHS_IT: &str = "gen(?:naio)?|feb(?:braio)?|mar(?:zo)?|apr(?:ile)?|mag(?:gio)?|giu(?:gno)?|lug(?:lio)?|ago(?:sto)?|set(?:tembre)?|ott(?:obre)?|nov(?:embre)?|dic(?:embre)?";
const MONTHS_NL: &str = "jan(?:uari)?|feb(?:ruari)?|maart|apr(?:il)?|mei|jun(?:i)?|jul(?:i)?|aug(?:ustus)?|sep(?:tember)?|okt(?:ober)?|nov(?:ember)?|dec(?:ember)?";

/// 12/24 hour clock time, or German `14 Uhr`.
const TIME: &str = r"(?:(?:[01]?\d|2[0-3]):[0-5]\d(?::[0-5]\d)?(?:\s*[AaPp][Mm])?|(?:[01]?\d|2[0-3])\s*[Uu][Hh][Rr])";

/// Timezone suffix. Case sensitive so ordinary words are not taken for zones.
const ZONE: &str = r"(?-i:GMT|UTC|EST|EDT|CST|CDT|MST|MDT|PST|PDT|[+-]\d{2}:?\d{2}|[A-Z]{3,5})";

/// Matcher for dates, times and related notations.
#[derive(Debug, Clone, Default)]
pub struct DateMatcher;

impl DateMatcher {
    /// Creates a new date matcher.
    pub fn new() -> Self {
        Self
    }

    fn source() -> String {
        let all_months = [MONTHS_EN, MONTHS_DE, MONTHS_FR, MONTHS_ES, MONTHS_IT, MONTHS_NL].join("|");
        let expand = |template: &str| {
            template
                .replace("%TIME%", TIME)
                .replace("%ZONE%", ZONE)
                .replace("%ALL%", &all_months)
                .replace("%DE%", MONTHS_DE)
                .replace("%FR%", MONTHS_FR)
                .replace("%ES%", MONTHS_ES)
                .replace("%IT%", MONTHS_IT)
                .replace("%NL%", MONTHS_NL)
        };

        [
            // Date + time combinations
            r"\b\d{4}[-/.]\d{1,2}[-/.]\d{1,2}[T ]\d{2}:\d{2}(?::\d{2})?(?:\.\d{1,3})?(?:Z|[+-]\d{2}:?\d{2})?\b",
            r"\b\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4}[,\s]+%TIME%\b",
            r"\b(?:%ALL%)\s+\d{1,2}(?:st|nd|rd|th)?(?:[,\s]+\d{2,4})?[,\s]+%TIME%\b",
            r"\b\d{4}年\s*\d{1,2}月\s*\d{1,2}日\s*%TIME%\b",
            // Time ranges and zoned times
            r"\b%TIME%\s*[-–—~to]+\s*%TIME%\b",
            r"\b%TIME%\s*%ZONE%\b",
            // ISO dates
            r"\b\d{4}[-/.]\d{1,2}[-/.]\d{1,2}\b",
            // Day-first and month-first numeric dates
            r"\b\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4}\b",
            // German (14. März 2024)
            r"\b\d{1,2}(?:\.|ter|e)?\s*(?:%DE%)\s*\d{2,4}\b",
            // French (14 mars 2024)
            r"\b\d{1,2}(?:er)?\s+(?:%FR%)\s+\d{2,4}\b",
            // Spanish (14 de marzo de 2024)
            r"\b\d{1,2}\s+(?:de\s+)?(?:%ES%)(?:\s+de)?\s+\d{2,4}\b",
            // Italian and Dutch
            r"\b\d{1,2}\s+(?:%IT%)\s+\d{2,4}\b",
            r"\b\d{1,2}\s+(?:%NL%)\s+\d{2,4}\b",
            // Month first (March 14, 2024) and year first (2024 March 14)
            r"\b(?:%ALL%)\s+\d{1,2}(?:st|nd|rd|th)?(?:[,\s]+\d{2,4})?\b",
            r"\b\d{4}\s+(?:%ALL%)\s+\d{1,2}(?:st|nd|rd|th)?\b",
            // Quarter and half-year notations
            r"\b(?:Q[1-4]|H[1-2]|[1-4]Q|[1-2]H)\s*/?\s*\d{4}\b",
            r"\b(?:Quartal\s*[1-4]|Halbjahr\s*[1-2])\s+\d{4}\b",
            r"\b(?:Trimestre\s*[1-4]|Semestre\s*[1-2])\s+\d{4}\b",
            // CJK (2024年3月14日)
            r"\b\d{4}年\s*\d{1,2}月\s*\d{1,2}日",
            // Hijri months
            r"\b\d{1,2}\s+(?:Muharram|Safar|Rabi\s*al-[aA]wwal|Rabi\s*al-[tT]hani|Jumada\s*al-[aA]wwal|Jumada\s*al-[tT]hani|Rajab|Sha'ban|Ramadan|Shawwal|Dhu\s*al-[qQ]adah|Dhu\s*al-[hH]ijjah)\s+\d{4}\b",
            // Standalone years
            r"\b(?:19\d{2}|20\d{2}|2100)\b",
            // Clock times
            r"\b%TIME%\b",
        ]
        .iter()
        .map(|template| expand(template))
        .collect::<Vec<_>>()
        .join("|")
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            RegexBuilder::new(&DateMatcher::source())
                .case_insensitive(true)
                .size_limit(64 * (1 << 20))
                .build()
                .expect("Valid date regex")
        });
        &PATTERN
    }
}

impl PatternMatcher for DateMatcher {
    fn kind(&self) -> EntityKind {
        EntityKind::Date
    }

    fn pattern(&self) -> &Regex {
        Self::regex()
    }
}
