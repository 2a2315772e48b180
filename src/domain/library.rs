//! The fixed set of structured entity patterns.

use super::date::DateMatcher;
use super::entity::{Entity, EntityKind};
use super::money::MoneyMatcher;
use super::phone::PhoneNumberMatcher;
use super::PatternMatcher;
use once_cell::sync::Lazy;
use regex::Regex;

/// Email address matcher (`local-part@domain.tld`).
#[derive(Debug, Clone, Default)]
pub struct EmailMatcher;

impl EmailMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl PatternMatcher for EmailMatcher {
    fn kind(&self) -> EntityKind {
        EntityKind::Email
    }

    fn pattern(&self) -> &Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
                .expect("Valid email regex")
        });
        &PATTERN
    }
}

/// Mapping from entity kind to its matcher, scanned in a fixed order:
/// `PHONE`, `EMAIL`, `MONEY`, `DATE`.
pub struct PatternLibrary {
    matchers: Vec<Box<dyn PatternMatcher>>,
}

impl PatternLibrary {
    /// The standard library with every built-in matcher.
    pub fn standard() -> Self {
        Self {
            matchers: vec![
                Box::new(PhoneNumberMatcher::new()),
                Box::new(EmailMatcher::new()),
                Box::new(MoneyMatcher::new()),
                Box::new(DateMatcher::new()),
            ],
        }
    }

    /// A library restricted to the given kinds, keeping the standard order.
    pub fn only(kinds: &[EntityKind]) -> Self {
        let mut library = Self::standard();
        library.matchers.retain(|m| kinds.contains(&m.kind()));
        library
    }

    pub fn matchers(&self) -> impl Iterator<Item = &dyn PatternMatcher> {
        self.matchers.iter().map(|m| m.as_ref())
    }

    /// Looks up the matcher for a kind.
    pub fn get(&self, kind: &EntityKind) -> Option<&dyn PatternMatcher> {
        self.matchers().find(|m| &m.kind() == kind)
    }

    /// Runs every matcher over `text`. Results are grouped by matcher in
    /// library order, each group in text order.
    pub fn scan(&self, text: &str) -> Vec<Entity> {
        self.matchers()
            .flat_map(|matcher| {
                let kind = matcher.kind();
                matcher
                    .find_all(text)
                    .into_iter()
                    .map(move |m| Entity::matched(m.text, kind.clone(), m.start))
            })
            .collect()
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::standard()
    }
}
