use std::sync::Arc;

use crate::core::catalog::Catalog;
use crate::models::Candidate;

/// One-pass cursor over the catalog
///
/// The cursor only moves forward and stops at `catalog.len()`, after which
/// the deck is exhausted for good.
#[derive(Debug, Clone)]
pub struct Deck {
    catalog: Arc<Catalog>,
    cursor: usize,
}

impl Deck {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Candidate currently on top of the deck
    pub fn current(&self) -> Option<&Candidate> {
        self.catalog.at(self.cursor)
    }

    pub fn remaining(&self) -> usize {
        self.catalog.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.catalog.len()
    }

    /// Move past the current candidate. Returns the new cursor.
    pub fn advance(&mut self) -> usize {
        if !self.is_exhausted() {
            self.cursor += 1;
        }
        self.cursor
    }
}
