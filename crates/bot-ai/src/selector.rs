//! The move-selection facade hosts call once per bot turn.

use crate::eval::{EvalWeights, Evaluator};
use crate::greedy;
use crate::opening::{BookError, OpeningBook};
use crate::rules::{InvariantError, Rules};
use crate::search::alpha_beta;
use bot_core::{Color, Move};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised when constructing a [`MoveSelector`].
///
/// Configuration problems fail at construction; they are never silently
/// clamped or repaired.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The search depth was zero.
    #[error("search depth must be positive")]
    ZeroDepth,

    /// The opening book contained an unparseable entry.
    #[error(transparent)]
    Book(#[from] BookError),

    /// Failed to read a configuration file.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a configuration file.
    #[error("configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How the selector picks a move once the opening book is out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Depth-limited minimax with alpha-beta pruning.
    #[default]
    Minimax,
    /// One-ply greedy ranking of the immediate moves.
    Greedy,
    /// A uniformly random legal move from the seeded generator.
    Random,
}

/// Configuration for a [`MoveSelector`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Search depth in plies for the minimax strategy. Must be positive.
    pub search_depth: u32,
    /// The fallback strategy used after the opening book.
    pub strategy: Strategy,
    /// Opening book entries as plain UCI strings, in order, written for
    /// White.
    pub opening_book: Vec<String>,
    /// Evaluation weights for the minimax strategy.
    pub weights: EvalWeights,
    /// Seed for the random strategy. `None` seeds from the OS; tests pass
    /// a fixed seed to force determinism.
    pub rng_seed: Option<u64>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig {
            search_depth: 2,
            strategy: Strategy::default(),
            opening_book: Vec::new(),
            weights: EvalWeights::default(),
            rng_seed: None,
        }
    }
}

impl SelectorConfig {
    /// Loads a configuration from a JSON file. Missing fields take their
    /// defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Selects one move per call: opening book first, then the configured
/// strategy.
///
/// One selector instance serves one game: it tracks how far into the
/// opening book the game has progressed so no book entry is replayed.
#[derive(Debug)]
pub struct MoveSelector {
    search_depth: u32,
    strategy: Strategy,
    evaluator: Evaluator,
    book: OpeningBook,
    book_cursor: usize,
    rng: StdRng,
}

impl MoveSelector {
    /// Builds a selector, validating the configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroDepth`] for a non-positive search depth and
    /// [`ConfigError::Book`] for unparseable opening book entries.
    pub fn new(config: SelectorConfig) -> Result<Self, ConfigError> {
        if config.search_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        let book = OpeningBook::parse(&config.opening_book)?;
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Ok(MoveSelector {
            search_depth: config.search_depth,
            strategy: config.strategy,
            evaluator: Evaluator::new(config.weights),
            book,
            book_cursor: 0,
            rng,
        })
    }

    /// Returns the configured search depth in plies.
    #[must_use]
    pub fn search_depth(&self) -> u32 {
        self.search_depth
    }

    /// Returns the configured fallback strategy.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Rewinds the opening book for a fresh game.
    pub fn start_new_game(&mut self) {
        self.book_cursor = 0;
    }

    /// Picks a move for `color`, which must be the side to move.
    ///
    /// Returns `Ok(None)` exactly when the position has no legal moves
    /// (the game is over); that is a normal outcome, not an error. The
    /// board is mutated transiently during search and always restored
    /// before returning.
    ///
    /// # Errors
    ///
    /// Only [`InvariantError`]s surfaced by the adapter or evaluator.
    pub fn select_move(
        &mut self,
        pos: &mut dyn Rules,
        color: Color,
    ) -> Result<Option<Move>, InvariantError> {
        let legal = pos.legal_moves();
        if legal.is_empty() {
            return Ok(None);
        }

        if let Some((cursor, m)) = self.book.next_move(self.book_cursor, &legal, color) {
            self.book_cursor = cursor;
            return Ok(Some(m));
        }

        let chosen = match self.strategy {
            Strategy::Minimax => {
                alpha_beta(
                    pos,
                    &self.evaluator,
                    color,
                    self.search_depth,
                    f64::NEG_INFINITY,
                    f64::INFINITY,
                    true,
                )?
                .best
            }
            Strategy::Greedy => greedy::best_immediate_move(pos, &legal, color),
            Strategy::Random => legal.choose(&mut self.rng).copied(),
        };

        Ok(chosen)
    }
}
