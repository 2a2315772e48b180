//! Whole-word entity reconstruction from BIO-tagged sub-word tokens.
//!
//! Sub-word tokenization loses the original spacing, so a span's text is
//! rebuilt by several candidate strategies. Only candidates found verbatim in
//! the page text are accepted, and the longest accepted one wins. A span with
//! no verified candidate is dropped.

use super::entity::{Entity, EntityKind};
use super::token::{Tag, Token, CONTINUATION_MARKER};
use tracing::trace;

/// A candidate generator. Receives the open span and the page text.
type Candidate = fn(&OpenSpan, &str) -> String;

/// Candidate generators, tried in order. Earlier entries win ties.
const STRATEGIES: [(&str, Candidate); 4] = [
    ("concat", concat_pieces),
    ("spaced", spaced_pieces),
    ("smart", smart_join),
    ("progressive", progressive_join),
];

/// Accumulated state of an entity span that has not been closed yet.
#[derive(Debug, Clone)]
struct OpenSpan {
    kind: String,
    /// Pieces with the continuation marker stripped
    pieces: Vec<String>,
    /// Pieces as the classifier emitted them
    raw: Vec<String>,
    score: f64,
    marker: String,
}

impl OpenSpan {
    fn open(kind: &str, token: &Token, marker: &str) -> Self {
        Self {
            kind: kind.to_string(),
            pieces: vec![strip_marker(&token.word, marker).to_string()],
            raw: vec![token.word.clone()],
            score: token.score,
            marker: marker.to_string(),
        }
    }

    fn extend(&mut self, token: &Token) {
        self.pieces
            .push(strip_marker(&token.word, &self.marker).to_string());
        self.raw.push(token.word.clone());
        self.score = self.score.min(token.score);
    }

    /// Longest candidate that occurs verbatim in `text`.
    fn best_candidate(&self, text: &str) -> Option<String> {
        let mut best: Option<String> = None;
        for (name, strategy) in STRATEGIES {
            let candidate = strategy(self, text);
            if candidate.is_empty() || !text.contains(candidate.as_str()) {
                continue;
            }
            if best.as_ref().map_or(true, |b| candidate.len() > b.len()) {
                trace!(strategy = name, candidate = %candidate, "accepted reconstruction");
                best = Some(candidate);
            }
        }
        best
    }
}

fn strip_marker<'a>(word: &'a str, marker: &str) -> &'a str {
    word.strip_prefix(marker).unwrap_or(word)
}

fn concat_pieces(span: &OpenSpan, _text: &str) -> String {
    span.pieces.concat()
}

fn spaced_pieces(span: &OpenSpan, _text: &str) -> String {
    span.pieces.join(" ")
}

/// Glues marked continuations to their predecessor, spaces everything else.
fn smart_join(span: &OpenSpan, _text: &str) -> String {
    let mut joined = String::new();
    for (i, raw) in span.raw.iter().enumerate() {
        match raw.strip_prefix(span.marker.as_str()) {
            Some(rest) => joined.push_str(rest),
            None if i == 0 => joined.push_str(raw),
            None => {
                joined.push(' ');
                joined.push_str(raw);
            }
        }
    }
    joined
}

/// Greedily extends a running string, keeping only extensions that still
/// occur in the page text.
fn progressive_join(span: &OpenSpan, text: &str) -> String {
    let Some((first, rest)) = span.pieces.split_first() else {
        return String::new();
    };

    let mut joined = first.clone();
    for piece in rest {
        let glued = format!("{}{}", joined, piece);
        if text.contains(glued.as_str()) {
            joined = glued;
            continue;
        }
        let spaced = format!("{} {}", joined, piece);
        if text.contains(spaced.as_str()) {
            joined = spaced;
        }
    }
    joined
}

/// Merges BIO-tagged sub-word tokens into located entities.
#[derive(Debug, Clone)]
pub struct TokenReconstructor {
    marker: String,
}

impl TokenReconstructor {
    /// Creates a reconstructor for `##`-style word pieces.
    pub fn new() -> Self {
        Self {
            marker: CONTINUATION_MARKER.to_string(),
        }
    }

    /// Uses a different continuation marker.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Reconstructs entities from `tokens`, located in `text`.
    ///
    /// Output is in token order. Spans that cannot be verified against the
    /// text are silently dropped.
    pub fn reconstruct(&self, tokens: &[Token], text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut cursor = 0;
        let mut current: Option<OpenSpan> = None;

        for token in tokens {
            match token.bio() {
                Tag::Outside => {
                    if let Some(span) = current.take() {
                        self.close(span, text, &mut cursor, &mut entities);
                    }
                }
                Tag::Begin(kind) => {
                    if let Some(span) = current.take() {
                        self.close(span, text, &mut cursor, &mut entities);
                    }
                    current = Some(OpenSpan::open(kind, token, &self.marker));
                }
                Tag::Inside(_) => {
                    if let Some(span) = current.as_mut() {
                        span.extend(token);
                    }
                }
            }
        }

        if let Some(span) = current.take() {
            self.close(span, text, &mut cursor, &mut entities);
        }

        entities
    }

    fn close(&self, span: OpenSpan, text: &str, cursor: &mut usize, out: &mut Vec<Entity>) {
        let Some(candidate) = span.best_candidate(text) else {
            trace!(kind = %span.kind, pieces = ?span.raw, "dropping unresolvable span");
            return;
        };

        // Prefer the occurrence after the previous entity so repeated names
        // keep their reading order.
        let start = text[*cursor..]
            .find(candidate.as_str())
            .map(|i| i + *cursor)
            .or_else(|| text.find(candidate.as_str()));

        if let Some(start) = start {
            let entity = Entity {
                end: start + candidate.len(),
                text: candidate,
                kind: EntityKind::from_label(&span.kind),
                score: span.score,
                start,
            };
            *cursor = entity.end;
            out.push(entity);
        }
    }
}

impl Default for TokenReconstructor {
    fn default() -> Self {
        Self::new()
    }
}
