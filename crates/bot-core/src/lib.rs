//! Core value types for the chess bot.
//!
//! These are the types exchanged across the rules-adapter boundary:
//! - [`Color`] and [`PieceKind`] for piece identity
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for candidate transitions

mod color;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::Move;
pub use piece::PieceKind;
pub use square::{File, Rank, Square};
