//! Heuristic position evaluation.
//!
//! Scores a position as a signed sum over occupied squares, from one side's
//! perspective: terms for that side's pieces are added, the opponent's
//! subtracted. The symmetry keeps the function zero-sum, which minimax
//! relies on. Checkmate maps to the infinity sentinels, stalemate to a
//! fixed finite penalty.

use crate::rules::{InvariantError, Rules};
use bot_core::{Color, PieceKind, Square};
use serde::{Deserialize, Serialize};

/// A position score. Finite for live positions; `f64::INFINITY` /
/// `f64::NEG_INFINITY` are reserved for delivered/suffered checkmate.
pub type Score = f64;

/// Named weights for each evaluation term.
///
/// All weights are in pawn units (a pawn's material value is 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Bonus for a piece standing on d4, e4, d5, or e5.
    pub center_control: f64,
    /// Bonus per rank a pawn has advanced toward promotion.
    pub pawn_advancement: f64,
    /// Bonus for a non-pawn, non-king piece that has left its back rank.
    pub development: f64,
    /// Penalty for a piece attacked by a cheaper-or-equal attacker with
    /// fewer defenders than attackers.
    pub hanging_penalty: f64,
    /// Bonus per attacker on the enemy king while it is in check.
    pub king_pressure: f64,
    /// Magnitude of the fixed stalemate score. Stalemate evaluates to
    /// minus this value: clearly undesirable, clearly survivable, and far
    /// from the checkmate sentinels. Tunable policy, not a rule.
    pub stalemate_penalty: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            center_control: 0.25,
            pawn_advancement: 0.05,
            development: 0.1,
            hanging_penalty: 0.5,
            king_pressure: 0.2,
            stalemate_penalty: 10.0,
        }
    }
}

/// Heuristic position evaluator.
///
/// Evaluation is a pure function of the position and the perspective color:
/// no hidden state, no randomness.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    /// Creates an evaluator with the given weights.
    #[must_use]
    pub fn new(weights: EvalWeights) -> Self {
        Evaluator { weights }
    }

    /// Returns the weights in use.
    #[must_use]
    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// Scores `pos` from `perspective`'s point of view.
    ///
    /// # Errors
    ///
    /// Only for adapter misuse (a reported attacker on an empty square, a
    /// missing king); a well-behaved adapter never triggers these.
    pub fn evaluate(&self, pos: &dyn Rules, perspective: Color) -> Result<Score, InvariantError> {
        if pos.is_checkmate() {
            // The side to move has no way out; whether that is good news
            // depends on whose perspective we score from.
            return Ok(if pos.side_to_move() == perspective {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            });
        }
        if pos.is_stalemate() {
            return Ok(-self.weights.stalemate_penalty);
        }

        let w = &self.weights;
        let mut score = 0.0;

        for index in 0..64u8 {
            let square = match Square::from_index(index) {
                Some(sq) => sq,
                None => unreachable!(),
            };
            let Some((kind, color)) = pos.piece_at(square) else {
                continue;
            };
            let sign = if color == perspective { 1.0 } else { -1.0 };

            score += sign * kind.value();

            if Square::CENTER.contains(&square) {
                score += sign * w.center_control;
            }

            match kind {
                PieceKind::Pawn => {
                    let rank = square.rank().index();
                    let advanced = match color {
                        Color::White => rank.saturating_sub(color.pawn_rank()),
                        Color::Black => color.pawn_rank().saturating_sub(rank),
                    };
                    score += sign * w.pawn_advancement * f64::from(advanced);
                }
                PieceKind::King => {}
                _ => {
                    if square.rank().index() != color.back_rank() {
                        score += sign * w.development;
                    }
                }
            }

            score += sign * self.safety_term(pos, square, kind, color)?;
        }

        if pos.is_check() {
            let checked = pos.side_to_move();
            let king = pos
                .find_king(checked)
                .ok_or(InvariantError::MissingKing(checked))?;
            let pressure =
                w.king_pressure * pos.attackers(king, checked.opposite()).len() as f64;
            if checked == perspective {
                score -= pressure;
            } else {
                score += pressure;
            }
        }

        Ok(score)
    }

    /// Penalty (as a non-positive number) for a piece left en prise: it is
    /// attacked by an opponent piece of lower or equal value and has fewer
    /// defenders than attackers.
    fn safety_term(
        &self,
        pos: &dyn Rules,
        square: Square,
        kind: PieceKind,
        color: Color,
    ) -> Result<f64, InvariantError> {
        let attackers = pos.attackers(square, color.opposite());
        if attackers.is_empty() {
            return Ok(0.0);
        }

        let mut cheapest = f64::INFINITY;
        for attacker in &attackers {
            let (attacker_kind, _) = pos
                .piece_at(*attacker)
                .ok_or(InvariantError::EmptyAttacker(*attacker))?;
            cheapest = cheapest.min(attacker_kind.value());
        }

        let defenders = pos.attackers(square, color);
        if cheapest <= kind.value() && defenders.len() < attackers.len() {
            Ok(-self.weights.hanging_penalty)
        } else {
            Ok(0.0)
        }
    }
}
