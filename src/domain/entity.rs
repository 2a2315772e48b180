//! Located entities and their kinds.

use std::fmt;

/// Entity class, either one of the labels the pipeline knows about or a
/// classifier label passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Organization,
    Location,
    Phone,
    Email,
    Money,
    Date,
    Other(String),
}

impl EntityKind {
    /// Maps a raw label (`PER`, `LOC`, `PHONE`, ...) to a kind.
    pub fn from_label(label: &str) -> Self {
        match label {
            "PER" => Self::Person,
            "ORG" => Self::Organization,
            "LOC" => Self::Location,
            "PHONE" => Self::Phone,
            "EMAIL" => Self::Email,
            "MONEY" => Self::Money,
            "DATE" => Self::Date,
            other => Self::Other(other.to_string()),
        }
    }

    /// The short label used in highlight comments and exclusion sets.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Person => "PER",
            Self::Organization => "ORG",
            Self::Location => "LOC",
            Self::Phone => "PHONE",
            Self::Email => "EMAIL",
            Self::Money => "MONEY",
            Self::Date => "DATE",
            Self::Other(label) => label,
        }
    }

    /// Human readable name.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Person => "Person",
            Self::Organization => "Organization",
            Self::Location => "Location",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Money => "Financial",
            Self::Date => "Date",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sensitive span located in a page's plain text.
///
/// `start..end` are byte offsets into the page text, always on char
/// boundaries, and `&page_text[start..end] == text`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub text: String,
    pub kind: EntityKind,
    pub score: f64,
    pub start: usize,
    pub end: usize,
}

impl Entity {
    /// Builds a pattern-derived entity, which always has full confidence.
    pub fn matched(text: &str, kind: EntityKind, start: usize) -> Self {
        Self {
            text: text.to_string(),
            kind,
            score: 1.0,
            start,
            end: start + text.len(),
        }
    }

    /// Comment text for a highlight derived from this entity.
    pub fn comment_text(&self) -> String {
        format!("{} (confidence: {:.1}%)", self.kind, self.score * 100.0)
    }
}
