//! Domain models and business logic for entity resolution.
//!
//! This module turns a page's plain text and the classifier's tokens into an
//! ordered list of located entities: token reconstruction, pattern-based
//! extraction, and the merge of both.

pub mod date;
pub mod entity;
pub mod extractor;
pub mod library;
pub mod money;
pub mod phone;
pub mod reconstruct;
pub mod resolver;
pub mod token;

pub use date::DateMatcher;
pub use entity::{Entity, EntityKind};
pub use extractor::PatternExtractor;
pub use library::{EmailMatcher, PatternLibrary};
pub use money::MoneyMatcher;
pub use phone::PhoneNumberMatcher;
pub use reconstruct::TokenReconstructor;
pub use resolver::EntityResolver;
pub use token::{Tag, Token};

use regex::Regex;

/// A literal occurrence of a pattern in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> From<regex::Match<'a>> for PatternMatch<'a> {
    fn from(m: regex::Match<'a>) -> Self {
        Self {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        }
    }
}

/// Trait for pattern matching strategies.
///
/// Matches are global and non-overlapping, scanned left to right.
pub trait PatternMatcher: Send + Sync {
    /// Entity kind assigned to every match.
    fn kind(&self) -> EntityKind;

    fn pattern(&self) -> &Regex;

    fn find_all<'a>(&self, text: &'a str) -> Vec<PatternMatch<'a>> {
        self.pattern().find_iter(text).map(PatternMatch::from).collect()
    }
}
