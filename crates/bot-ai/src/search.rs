//! Depth-limited minimax search with alpha-beta pruning.

use crate::eval::{Evaluator, Score};
use crate::rules::{InvariantError, Rules};
use bot_core::{Color, Move};

/// Outcome of searching one subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// The best score reachable from this node.
    pub score: Score,
    /// The move achieving it. `None` at leaves.
    pub best: Option<Move>,
}

/// Searches `pos` to the given depth and returns the best score and move.
///
/// `root_color` is the perspective every leaf is evaluated from and never
/// changes across the recursion; only `maximizing` flips, modeling the
/// adversarial alternation. The top-level caller passes `maximizing = true`
/// with the full `(-inf, +inf)` window.
///
/// The board is mutated through push/undo pairs and is restored to its
/// original state before this function returns, on every path.
///
/// Tie-breaking is stable: among equal-scoring moves the first in the
/// adapter's enumeration order wins. The first move always becomes the
/// initial best, so a node with legal moves always reports one, even when
/// every line is a forced loss.
///
/// # Errors
///
/// Propagates [`InvariantError`] from the adapter or the evaluator; the
/// search itself never produces a move outside the adapter's enumeration.
pub fn alpha_beta(
    pos: &mut dyn Rules,
    evaluator: &Evaluator,
    root_color: Color,
    depth: u32,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
) -> Result<SearchOutcome, InvariantError> {
    // Terminal detection must precede move enumeration: a position with no
    // legal moves is always scored here, never expanded.
    if depth == 0 || pos.is_checkmate() || pos.is_stalemate() {
        return Ok(SearchOutcome {
            score: evaluator.evaluate(pos, root_color)?,
            best: None,
        });
    }

    let moves = pos.legal_moves();
    debug_assert!(!moves.is_empty(), "non-terminal node with no legal moves");

    let mut best_score = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut best_move = None;

    for m in moves {
        pos.push(m)?;
        let child = alpha_beta(pos, evaluator, root_color, depth - 1, alpha, beta, !maximizing);
        pos.undo()?;
        let child = child?;

        // The first move always seeds the best; otherwise a strictly
        // better score is required. Without the seed a node where every
        // line scores exactly the initial infinity (a forced loss for the
        // side to move, say) would report no move at all.
        if maximizing {
            if best_move.is_none() || child.score > best_score {
                best_score = child.score;
                best_move = Some(m);
            }
            alpha = alpha.max(best_score);
        } else {
            if best_move.is_none() || child.score < best_score {
                best_score = child.score;
                best_move = Some(m);
            }
            beta = beta.min(best_score);
        }

        if beta <= alpha {
            // Moves past the cutoff are provably unable to change the
            // result; their subtrees are never visited.
            break;
        }
    }

    Ok(SearchOutcome {
        score: best_score,
        best: best_move,
    })
}
