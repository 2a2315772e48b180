//! Classifier tokens and BIO tag parsing.

use serde::{Deserialize, Serialize};

/// Marker a sub-word tokenizer puts in front of word-piece continuations.
pub const CONTINUATION_MARKER: &str = "##";

/// One classified token as emitted by the external classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form, possibly carrying a continuation marker
    pub word: String,

    /// `O`, `B-<TYPE>` or `I-<TYPE>`
    #[serde(alias = "entity")]
    pub tag: String,

    pub score: f64,
}

impl Token {
    pub fn new(word: impl Into<String>, tag: impl Into<String>, score: f64) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
            score,
        }
    }

    /// Parses this token's tag.
    pub fn bio(&self) -> Tag<'_> {
        Tag::parse(&self.tag)
    }
}

/// A parsed BIO tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag<'a> {
    Outside,
    Begin(&'a str),
    Inside(&'a str),
}

impl<'a> Tag<'a> {
    /// Parses a raw tag. Anything that is not `B-X` or `I-X` with a non-empty
    /// type counts as outside.
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once('-') {
            Some(("B", kind)) if !kind.is_empty() => Tag::Begin(kind),
            Some(("I", kind)) if !kind.is_empty() => Tag::Inside(kind),
            _ => Tag::Outside,
        }
    }
}
