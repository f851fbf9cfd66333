//! Rules adapter backed by the `shakmaty` rules engine.
//!
//! [`ShakmatyBoard`] implements the bot's [`Rules`] trait on top of
//! [`shakmaty::Chess`]. Reversibility uses a snapshot stack rather than
//! incremental undo: `push` clones the position before applying the move
//! and `undo` pops the clone. Copying a `Chess` value is cheap, and the
//! stack makes the LIFO discipline structural - an undone position is
//! bit-for-bit the pushed one.

use bot_ai::rules::{InvariantError, Rules};
use bot_core::{Color, File, Move, PieceKind, Rank, Square};
use shakmaty::{CastlingMode, Chess, Move as SmMove, Position, Role};
use thiserror::Error;

/// Errors raised while setting up a board from FEN.
#[derive(Debug, Error)]
pub enum FenSetupError {
    /// The FEN text could not be parsed.
    #[error("invalid FEN: {0}")]
    Parse(#[from] shakmaty::fen::ParseFenError),

    /// The FEN parsed but does not describe a legal position.
    #[error("illegal position: {0}")]
    Position(String),
}

/// A chess board the bot can search over, backed by `shakmaty`.
#[derive(Debug, Clone)]
pub struct ShakmatyBoard {
    pos: Chess,
    history: Vec<Chess>,
}

impl Default for ShakmatyBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ShakmatyBoard {
    /// Creates a board in the standard initial position.
    #[must_use]
    pub fn new() -> Self {
        ShakmatyBoard {
            pos: Chess::default(),
            history: Vec::new(),
        }
    }

    /// Creates a board from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenSetupError> {
        let setup: shakmaty::fen::Fen = fen.parse()?;
        let pos = setup
            .into_position(CastlingMode::Standard)
            .map_err(|e| FenSetupError::Position(e.to_string()))?;
        Ok(ShakmatyBoard {
            pos,
            history: Vec::new(),
        })
    }

    /// Returns the number of moves currently pushed and not undone.
    #[must_use]
    pub fn ply_depth(&self) -> usize {
        self.history.len()
    }

    fn find_legal(&self, m: Move) -> Option<SmMove> {
        self.pos
            .legal_moves()
            .into_iter()
            .find(|candidate| to_core(candidate) == m)
    }
}

impl Rules for ShakmatyBoard {
    fn legal_moves(&self) -> Vec<Move> {
        self.pos.legal_moves().iter().map(to_core).collect()
    }

    fn push(&mut self, m: Move) -> Result<(), InvariantError> {
        let sm = self.find_legal(m).ok_or(InvariantError::IllegalMove(m))?;
        self.history.push(self.pos.clone());
        self.pos.play_unchecked(&sm);
        Ok(())
    }

    fn undo(&mut self) -> Result<(), InvariantError> {
        self.pos = self.history.pop().ok_or(InvariantError::NothingToUndo)?;
        Ok(())
    }

    fn is_game_over(&self) -> bool {
        self.pos.is_game_over()
    }

    fn is_checkmate(&self) -> bool {
        self.pos.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.pos.is_stalemate()
    }

    fn is_check(&self) -> bool {
        self.pos.is_check()
    }

    fn piece_at(&self, square: Square) -> Option<(PieceKind, Color)> {
        let piece = self.pos.board().piece_at(to_sm_square(square))?;
        Some((kind_from_role(piece.role), color_from_sm(piece.color)))
    }

    fn attackers(&self, square: Square, by: Color) -> Vec<Square> {
        let board = self.pos.board();
        board
            .attacks_to(to_sm_square(square), color_to_sm(by), board.occupied())
            .into_iter()
            .map(from_sm_square)
            .collect()
    }

    fn find_king(&self, color: Color) -> Option<Square> {
        self.pos
            .board()
            .king_of(color_to_sm(color))
            .map(from_sm_square)
    }

    fn side_to_move(&self) -> Color {
        color_from_sm(self.pos.turn())
    }
}

/// Converts a shakmaty move into the bot's representation. Castling is
/// expressed as the king's origin and destination, matching UCI.
fn to_core(m: &SmMove) -> Move {
    match *m {
        SmMove::Castle { king, rook } => {
            let file = if rook > king { File::G } else { File::C };
            let rank = match Rank::from_index(u32::from(king.rank()) as u8) {
                Some(r) => r,
                None => unreachable!(),
            };
            Move::normal(from_sm_square(king), Square::new(file, rank))
        }
        SmMove::Normal {
            from,
            to,
            promotion,
            ..
        } => Move::new(
            from_sm_square(from),
            from_sm_square(to),
            promotion.map(kind_from_role),
        ),
        SmMove::EnPassant { from, to } => Move::normal(from_sm_square(from), from_sm_square(to)),
        SmMove::Put { .. } => unreachable!("no piece drops in standard chess"),
    }
}

fn to_sm_square(sq: Square) -> shakmaty::Square {
    shakmaty::Square::new(u32::from(sq.index()))
}

fn from_sm_square(sq: shakmaty::Square) -> Square {
    match Square::from_index(u32::from(sq) as u8) {
        Some(s) => s,
        None => unreachable!(),
    }
}

fn color_to_sm(color: Color) -> shakmaty::Color {
    match color {
        Color::White => shakmaty::Color::White,
        Color::Black => shakmaty::Color::Black,
    }
}

fn color_from_sm(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

fn kind_from_role(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}
