//! Rules adapter abstraction.
//!
//! This module provides the [`Rules`] trait which abstracts over the host's
//! rules engine. The bot is rules-agnostic - it never generates, validates,
//! or applies moves itself, and only proposes moves the adapter enumerated.

use bot_core::{Color, Move, PieceKind, Square};
use thiserror::Error;

/// Internal-invariant violations.
///
/// These indicate a bug in the bot or misuse of the adapter, never a normal
/// game situation. Callers should fail fast rather than substitute a move.
#[derive(Debug, Clone, Error)]
pub enum InvariantError {
    /// A move was pushed that the adapter did not enumerate as legal.
    #[error("move {0} is not legal in the current position")]
    IllegalMove(Move),

    /// `undo` was called with no move left to take back.
    #[error("undo called on a position with no move history")]
    NothingToUndo,

    /// A king lookup failed in a position that should contain one.
    #[error("no {0} king on the board")]
    MissingKing(Color),

    /// The adapter reported an attacker on a square it says is empty.
    #[error("adapter reported an attack from empty square {0}")]
    EmptyAttacker(Square),
}

/// The capability set a host's board must provide.
///
/// The board is a single mutable resource: during a search it is exclusively
/// borrowed by the bot and mutated through strictly stack-ordered
/// [`push`](Rules::push)/[`undo`](Rules::undo) pairs. Every push during a
/// search is matched by exactly one undo before the search returns, on every
/// exit path, so the board is observationally identical before and after.
pub trait Rules {
    /// Enumerates all legal moves for the side to move.
    ///
    /// The order must be stable for repeated calls on the same position;
    /// the bot's tie-breaking leans on it.
    fn legal_moves(&self) -> Vec<Move>;

    /// Applies a legal move.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::IllegalMove`] if the move is not among the
    /// position's legal moves.
    fn push(&mut self, m: Move) -> Result<(), InvariantError>;

    /// Takes back the most recently pushed move.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::NothingToUndo`] if no move has been pushed.
    fn undo(&mut self) -> Result<(), InvariantError>;

    /// Returns true if the game has ended (no legal continuation or an
    /// automatic draw).
    fn is_game_over(&self) -> bool;

    /// Returns true if the side to move is checkmated.
    fn is_checkmate(&self) -> bool;

    /// Returns true if the side to move is stalemated.
    fn is_stalemate(&self) -> bool;

    /// Returns true if the side to move is in check.
    fn is_check(&self) -> bool;

    /// Returns the piece on the given square, if any.
    fn piece_at(&self, square: Square) -> Option<(PieceKind, Color)>;

    /// Returns the squares of all `by`-colored pieces attacking `square`.
    fn attackers(&self, square: Square, by: Color) -> Vec<Square>;

    /// Returns the square of the given side's king.
    fn find_king(&self, color: Color) -> Option<Square>;

    /// Returns the side to move.
    fn side_to_move(&self) -> Color;
}
