//! Move selection for an automated chess player.
//!
//! This crate picks one move per turn on behalf of a bot. It does not know
//! the rules of chess: legal-move enumeration, move application, and
//! terminal detection are delegated to a host-provided [`Rules`]
//! implementation (see the `bot-shakmaty` crate for a ready-made one).
//!
//! # Overview
//!
//! - [`Rules`] - the capability set a host's board must provide
//! - [`Evaluator`] / [`EvalWeights`] - heuristic position scoring
//! - [`alpha_beta`] - depth-limited minimax search with alpha-beta pruning
//! - [`OpeningBook`] - deterministic early-game move overrides
//! - [`MoveSelector`] / [`SelectorConfig`] - the facade hosts call once per
//!   bot turn
//!
//! # Example
//!
//! ```ignore
//! use bot_ai::{MoveSelector, SelectorConfig};
//!
//! let mut selector = MoveSelector::new(SelectorConfig::default())?;
//! if let Some(mv) = selector.select_move(&mut board, color)? {
//!     board.push(mv)?;
//! }
//! ```

pub mod eval;
pub mod greedy;
pub mod opening;
pub mod rules;
pub mod search;
pub mod selector;

pub use eval::{EvalWeights, Evaluator, Score};
pub use opening::{BookEntry, BookError, OpeningBook};
pub use rules::{InvariantError, Rules};
pub use search::{alpha_beta, SearchOutcome};
pub use selector::{ConfigError, MoveSelector, SelectorConfig, Strategy};
