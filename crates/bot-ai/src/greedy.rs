//! One-ply greedy move ranking.
//!
//! The simple strategy from the bot's early history, kept as a swappable
//! alternative to the recursive search: each legal move is scored on its
//! immediate merits only, and the best-scoring move wins. No lookahead.

use crate::rules::Rules;
use bot_core::{Color, Move, PieceKind, Square};

/// Reward for landing on one of the four central squares.
const CENTER_BONUS: i32 = 5;
/// Reward for capturing an opponent piece.
const CAPTURE_BONUS: i32 = 10;
/// Penalty for moving onto a square the opponent attacks.
const DANGER_PENALTY: i32 = 5;

/// Whether `m` captures something. The destination being occupied covers
/// every capture except en passant, where the taken pawn sits beside the
/// destination; a pawn changing file onto an empty square is only legal
/// when capturing.
fn is_capture(pos: &dyn Rules, m: Move) -> bool {
    if pos.piece_at(m.to()).is_some() {
        return true;
    }
    matches!(pos.piece_at(m.from()), Some((PieceKind::Pawn, _))) && m.from().file() != m.to().file()
}

/// Scores a single move on its immediate merits.
fn score_move(pos: &dyn Rules, m: Move, color: Color) -> i32 {
    let mut points = 0;

    if Square::CENTER.contains(&m.to()) {
        points += CENTER_BONUS;
    }

    if is_capture(pos, m) {
        points += CAPTURE_BONUS;
    }

    if !pos.attackers(m.to(), color.opposite()).is_empty() {
        points -= DANGER_PENALTY;
    }

    points
}

/// Returns the best-scoring move among `legal`, leftmost on ties.
///
/// `None` only when `legal` is empty.
#[must_use]
pub fn best_immediate_move(pos: &dyn Rules, legal: &[Move], color: Color) -> Option<Move> {
    let mut best: Option<(Move, i32)> = None;
    for &m in legal {
        let score = score_move(pos, m, color);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((m, score));
        }
    }
    best.map(|(m, _)| m)
}
