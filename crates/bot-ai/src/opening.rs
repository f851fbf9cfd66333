//! Opening book: known-good early moves tried before searching.
//!
//! The book is a short ordered list of (origin, destination) pairs written
//! for White. For Black each entry is mirrored across the board's
//! horizontal axis, so the same list plays the mirrored opening as the
//! other side. Orientation is a pure transform of the entry and the color;
//! there is no global side constant.

use bot_core::{Color, Move, Square};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading an opening book.
#[derive(Debug, Error)]
pub enum BookError {
    /// An entry was not a plain origin-destination UCI move.
    #[error("invalid opening book move {0:?}: expected plain UCI like \"e2e4\"")]
    BadMove(String),

    /// Failed to read a book file.
    #[error("failed to read opening book: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a book file.
    #[error("opening book JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One known-good (origin, destination) pair, written for White.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookEntry {
    pub from: Square,
    pub to: Square,
}

impl BookEntry {
    /// Parses an entry from plain UCI notation ("e2e4").
    ///
    /// Promotion suffixes are rejected: book entries are opening moves and
    /// never promote.
    pub fn parse(uci: &str) -> Result<Self, BookError> {
        let m = Move::from_uci(uci).ok_or_else(|| BookError::BadMove(uci.to_string()))?;
        if m.promotion().is_some() {
            return Err(BookError::BadMove(uci.to_string()));
        }
        Ok(BookEntry {
            from: m.from(),
            to: m.to(),
        })
    }

    /// Returns this entry reflected across the horizontal axis
    /// (rank 1 <-> rank 8, file unchanged).
    #[must_use]
    pub const fn mirrored(self) -> Self {
        BookEntry {
            from: self.from.mirror(),
            to: self.to.mirror(),
        }
    }

    /// Returns the move this entry proposes for the given side: as written
    /// for White, mirrored for Black.
    #[must_use]
    pub const fn oriented(self, color: Color) -> Move {
        let entry = match color {
            Color::White => self,
            Color::Black => self.mirrored(),
        };
        Move::normal(entry.from, entry.to)
    }
}

/// An ordered, immutable list of book entries.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    entries: Vec<BookEntry>,
}

impl OpeningBook {
    /// Creates a book from parsed entries.
    #[must_use]
    pub fn new(entries: Vec<BookEntry>) -> Self {
        OpeningBook { entries }
    }

    /// Parses a book from plain UCI strings, in order.
    pub fn parse(ucis: &[String]) -> Result<Self, BookError> {
        let entries = ucis
            .iter()
            .map(|uci| BookEntry::parse(uci))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OpeningBook { entries })
    }

    /// Loads a book from a JSON file containing an array of UCI strings,
    /// e.g. `["e2e4", "g1f3"]`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let text = std::fs::read_to_string(path)?;
        let ucis: Vec<String> = serde_json::from_str(&text)?;
        Self::parse(&ucis)
    }

    /// Returns true if the book holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entries in book order.
    #[must_use]
    pub fn entries(&self) -> &[BookEntry] {
        &self.entries
    }

    /// Scans entries from `cursor` in book order and returns the first
    /// whose oriented move appears in `legal`, together with the cursor to
    /// resume from next turn.
    ///
    /// The caller owns the cursor per game, so a matched entry is never
    /// replayed on a later, unrelated turn. The returned cursor points just
    /// past the match, which also retires the unmatched entries the scan
    /// stepped over: the book only ever moves forward. Zero matches is the
    /// designed signal to fall back to search, not an error.
    #[must_use]
    pub fn next_move(
        &self,
        cursor: usize,
        legal: &[Move],
        color: Color,
    ) -> Option<(usize, Move)> {
        for (offset, entry) in self.entries.iter().skip(cursor).enumerate() {
            let candidate = entry.oriented(color);
            if let Some(m) = legal
                .iter()
                .find(|m| m.from() == candidate.from() && m.to() == candidate.to())
            {
                return Some((cursor + offset + 1, *m));
            }
        }
        None
    }
}
