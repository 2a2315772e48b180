//! Token classifiers that need no model at runtime.

use super::strategy::TokenClassifier;
use crate::domain::Token;
use crate::error::{RedactorError, RedactorResult};
use std::io::Read;
use std::path::Path;

/// Classifier that tags nothing, leaving pattern extraction as the only
/// entity source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopClassifier;

impl TokenClassifier for NoopClassifier {
    fn classify(&self, _page_index: usize, _text: &str) -> RedactorResult<Vec<Token>> {
        Ok(Vec::new())
    }
}

/// Replays classifier output computed ahead of time.
///
/// The JSON input is an array with one token array per page:
/// `[[{"word": "Jo", "entity": "B-PER", "score": 0.98}, ...], ...]`.
#[derive(Debug, Clone, Default)]
pub struct JsonTokenClassifier {
    pages: Vec<Vec<Token>>,
}

impl JsonTokenClassifier {
    pub fn from_pages(pages: Vec<Vec<Token>>) -> Self {
        Self { pages }
    }

    pub fn from_reader<R: Read>(reader: R) -> RedactorResult<Self> {
        Ok(Self::from_pages(serde_json::from_reader(reader)?))
    }

    pub fn from_path(path: &Path) -> RedactorResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| RedactorError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl TokenClassifier for JsonTokenClassifier {
    fn classify(&self, page_index: usize, _text: &str) -> RedactorResult<Vec<Token>> {
        self.pages
            .get(page_index)
            .cloned()
            .ok_or_else(|| RedactorError::Classifier {
                page: page_index + 1,
                reason: format!(
                    "no precomputed output (file covers {} page(s))",
                    self.pages.len()
                ),
            })
    }
}
