//! Test fixtures: in-memory documents, scripted classifiers and builders.
//!
//! [`FakeDocument`] lays text out on a fixed character grid so glyph search
//! results are predictable without a PDF backend.

use ner_redactor::domain::Token;
use ner_redactor::geometry::{GlyphSearch, PageBounds, Quad, Rect};
use ner_redactor::highlight::{Comment, Content, HighlightRegion, NewHighlight, Position};
use ner_redactor::{PageSource, RedactorError, RedactorResult, TokenClassifier};
use std::cell::RefCell;
use std::collections::HashSet;

/// Left and top margin of the fake text grid.
pub const MARGIN: f64 = 50.0;
/// Width of one character cell.
pub const CHAR_WIDTH: f64 = 6.0;
/// Height of one line.
pub const LINE_HEIGHT: f64 = 14.0;

/// Builds a token.
pub fn tok(word: &str, tag: &str, score: f64) -> Token {
    Token::new(word, tag, score)
}

/// Tags every whitespace-separated word of `text` as outside.
pub fn outside_tokens(text: &str) -> Vec<Token> {
    text.split_whitespace().map(|w| tok(w, "O", 0.99)).collect()
}

/// An in-memory paginated document.
#[derive(Debug, Clone)]
pub struct FakeDocument {
    pages: Vec<String>,
    bounds: PageBounds,
    /// Literals whose search always comes back empty
    unsearchable: HashSet<String>,
    /// Literals that are laid out across two lines
    wrapped: HashSet<String>,
    searches: RefCell<Vec<(usize, String)>>,
}

impl FakeDocument {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| p.to_string()).collect(),
            bounds: PageBounds {
                x: 0.0,
                y: 0.0,
                width: 612.0,
                height: 792.0,
            },
            unsearchable: HashSet::new(),
            wrapped: HashSet::new(),
            searches: RefCell::new(Vec::new()),
        }
    }

    pub fn with_bounds(mut self, width: f64, height: f64) -> Self {
        self.bounds.width = width;
        self.bounds.height = height;
        self
    }

    /// Makes glyph search miss `literal`, as with text the backend cannot see.
    pub fn with_unsearchable(mut self, literal: &str) -> Self {
        self.unsearchable.insert(literal.to_string());
        self
    }

    /// Makes every occurrence of `literal` span two lines.
    pub fn with_wrapped(mut self, literal: &str) -> Self {
        self.wrapped.insert(literal.to_string());
        self
    }

    /// Searches performed so far, in order.
    pub fn searches(&self) -> Vec<(usize, String)> {
        self.searches.borrow().clone()
    }

    fn page(&self, page_index: usize) -> RedactorResult<&str> {
        self.pages
            .get(page_index)
            .map(String::as_str)
            .ok_or_else(|| RedactorError::InvalidInput {
                parameter: "page".to_string(),
                reason: format!("no page {}", page_index + 1),
            })
    }
}

/// Quad covering `len` character cells from `col` on `line`.
pub fn grid_quad(line: usize, col: usize, len: usize) -> Quad {
    let x1 = MARGIN + col as f64 * CHAR_WIDTH;
    let x2 = x1 + len as f64 * CHAR_WIDTH;
    let y1 = MARGIN + line as f64 * LINE_HEIGHT;
    let y2 = y1 + LINE_HEIGHT;
    Quad([x1, y1, x2, y1, x1, y2, x2, y2])
}

impl GlyphSearch for FakeDocument {
    fn search(&self, page_index: usize, literal: &str) -> RedactorResult<Vec<Vec<Quad>>> {
        self.searches
            .borrow_mut()
            .push((page_index, literal.to_string()));

        let text = self.page(page_index)?;
        if literal.is_empty() || self.unsearchable.contains(literal) {
            return Ok(Vec::new());
        }

        let len = literal.chars().count();
        Ok(text
            .match_indices(literal)
            .map(|(at, _)| {
                let before = &text[..at];
                let line = before.matches('\n').count();
                let col = before
                    .rsplit_once('\n')
                    .map_or(before, |(_, tail)| tail)
                    .chars()
                    .count();
                if self.wrapped.contains(literal) {
                    let half = len / 2;
                    vec![grid_quad(line, col, half), grid_quad(line + 1, 0, len - half)]
                } else {
                    vec![grid_quad(line, col, len)]
                }
            })
            .collect())
    }
}

impl PageSource for FakeDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page_index: usize) -> RedactorResult<String> {
        self.page(page_index).map(str::to_string)
    }

    fn page_bounds(&self, page_index: usize) -> RedactorResult<PageBounds> {
        self.page(page_index)?;
        Ok(self.bounds)
    }
}

/// Classifier answering from a per-page script. `None` entries fail.
#[derive(Debug, Default)]
pub struct ScriptedClassifier {
    pages: Vec<Option<Vec<Token>>>,
    calls: RefCell<usize>,
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, tokens: Vec<Token>) -> Self {
        self.pages.push(Some(tokens));
        self
    }

    pub fn failing_page(mut self) -> Self {
        self.pages.push(None);
        self
    }

    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl TokenClassifier for ScriptedClassifier {
    fn classify(&self, page_index: usize, _text: &str) -> RedactorResult<Vec<Token>> {
        *self.calls.borrow_mut() += 1;
        match self.pages.get(page_index) {
            Some(Some(tokens)) => Ok(tokens.clone()),
            _ => Err(RedactorError::Classifier {
                page: page_index + 1,
                reason: "inference service unavailable".to_string(),
            }),
        }
    }
}

/// A rect in a `width` x `height` space.
pub fn rect(x1: f64, y1: f64, x2: f64, y2: f64, width: f64, height: f64) -> Rect {
    Rect {
        x1,
        y1,
        x2,
        y2,
        width,
        height,
        page_number: None,
    }
}

/// Builder for highlight regions.
#[derive(Debug, Clone)]
pub struct RegionBuilder {
    id: String,
    page: u32,
    comment: String,
    text: Option<String>,
    rects: Vec<Rect>,
    bounding: Option<Rect>,
}

impl RegionBuilder {
    pub fn new(id: &str, page: u32) -> Self {
        Self {
            id: id.to_string(),
            page,
            comment: String::new(),
            text: None,
            rects: Vec::new(),
            bounding: None,
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.comment = format!("{} (confidence: 100.0%)", label);
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.rects.push(rect);
        self
    }

    pub fn bounding(mut self, rect: Rect) -> Self {
        self.bounding = Some(rect);
        self
    }

    pub fn new_highlight(self) -> NewHighlight {
        let bounding_rect = self
            .bounding
            .or_else(|| self.rects.first().copied())
            .unwrap_or_else(|| rect(0.0, 0.0, 10.0, 10.0, 595.32, 841.92));
        NewHighlight {
            content: Content {
                text: self.text,
                image: None,
            },
            comment: Comment {
                text: self.comment,
                emoji: String::new(),
            },
            position: Position {
                page_number: self.page,
                bounding_rect,
                rects: self.rects,
            },
        }
    }

    pub fn build(self) -> HighlightRegion {
        let id = self.id.clone();
        let highlight = self.new_highlight();
        HighlightRegion {
            id,
            content: highlight.content,
            comment: highlight.comment,
            position: highlight.position,
        }
    }
}
