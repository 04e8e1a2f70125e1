//! Chess position representation.

use crate::status::is_in_check;
use chess_core::{Board, CastlingSide, Color, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn flag(color: Color, side: CastlingSide) -> u8 {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastlingSide::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastlingSide::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastlingSide::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if `color` may still castle toward `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastlingSide) -> bool {
        (self.0 & Self::flag(color, side)) != 0
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        self.has(color, CastlingSide::Kingside)
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        self.has(color, CastlingSide::Queenside)
    }

    /// Revokes one right. Rights are never granted back.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastlingSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastlingSide::Kingside);
        self.remove(color, CastlingSide::Queenside);
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Reasons a set of parts does not form a playable position.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("no {0} king on the board")]
    MissingKing(Color),

    #[error("more than one {0} king on the board")]
    ExtraKing(Color),

    #[error("{0} is in check but not to move")]
    OpponentInCheck(Color),

    #[error("en passant target {square} is not valid with {side_to_move} to move")]
    InvalidEnPassant { square: Square, side_to_move: Color },
}

/// Board, side to move, castling rights and en passant target.
///
/// Every `Position` holds exactly one king per color and the side not to
/// move is never in check; [`Position::new`] refuses anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Position {
            board: Board::standard(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
        }
    }

    /// Builds a position from its parts, validating king counts, that the
    /// side not to move is out of check, and the en passant target.
    pub fn new(
        board: Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> Result<Self, PositionError> {
        for color in Color::ALL {
            match board.count(Piece::new(PieceKind::King, color)) {
                0 => return Err(PositionError::MissingKing(color)),
                1 => {}
                _ => return Err(PositionError::ExtraKing(color)),
            }
        }

        let them = side_to_move.opposite();
        if is_in_check(&board, them) {
            return Err(PositionError::OpponentInCheck(them));
        }

        if let Some(square) = en_passant {
            if !Self::en_passant_plausible(&board, side_to_move, square) {
                return Err(PositionError::InvalidEnPassant {
                    square,
                    side_to_move,
                });
            }
        }

        Ok(Position {
            board,
            side_to_move,
            castling,
            en_passant,
        })
    }

    /// The target must be the empty square an enemy pawn just skipped,
    /// with that pawn directly beyond it.
    fn en_passant_plausible(board: &Board, side_to_move: Color, square: Square) -> bool {
        let them = side_to_move.opposite();
        let skipped_row = (them.pawn_start_row() as i8 + them.pawn_direction()) as u8;
        if square.row() != skipped_row || !board.is_empty(square) {
            return false;
        }
        square
            .offset(them.pawn_direction(), 0)
            .and_then(|sq| board.get(sq))
            == Some(Piece::new(PieceKind::Pawn, them))
    }

    /// Assembles a position without validation. Only used for successors of
    /// an already valid position.
    pub(crate) fn from_parts(
        board: Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> Self {
        Position {
            board,
            side_to_move,
            castling,
            en_passant,
        }
    }

    /// Returns the board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the castling rights.
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the en passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos() {
        let pos = Position::startpos();
        assert_eq!(pos.board(), &Board::standard());
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.castling(), CastlingRights::ALL);
        assert_eq!(pos.en_passant(), None);
        assert_eq!(
            pos.piece_at(Square::E1),
            Some(Piece::new(PieceKind::King, Color::White))
        );
    }

    #[test]
    fn castling_rights() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::Black));

        rights.remove(Color::White, CastlingSide::Kingside);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::White));
    }

    #[test]
    fn castling_rights_remove_color() {
        let mut rights = CastlingRights::ALL;
        rights.remove_color(Color::White);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(rights.can_castle_kingside(Color::Black));
        assert!(rights.can_castle_queenside(Color::Black));
    }

    #[test]
    fn castling_rights_none() {
        let rights = CastlingRights::NONE;
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                assert!(!rights.has(color, side));
            }
        }
        assert_eq!(rights.raw(), 0);
    }

    #[test]
    fn rejects_missing_king() {
        let mut board = Board::standard();
        board.take(Square::E8);
        assert_eq!(
            Position::new(board, Color::White, CastlingRights::NONE, None),
            Err(PositionError::MissingKing(Color::Black))
        );
    }

    #[test]
    fn rejects_extra_king() {
        let mut board = Board::standard();
        board.put(sq("e4"), Piece::new(PieceKind::King, Color::White));
        assert_eq!(
            Position::new(board, Color::White, CastlingRights::NONE, None),
            Err(PositionError::ExtraKing(Color::White))
        );
    }

    #[test]
    fn rejects_capturable_king() {
        let board: Board = "....k...
                            ........
                            ........
                            ........
                            ........
                            ........
                            ........
                            K...R..."
            .parse()
            .unwrap();
        assert_eq!(
            Position::new(board, Color::White, CastlingRights::NONE, None),
            Err(PositionError::OpponentInCheck(Color::Black))
        );
        // The checked side may be the one to move.
        assert!(Position::new(board, Color::Black, CastlingRights::NONE, None).is_ok());
    }

    #[test]
    fn accepts_plausible_en_passant() {
        let mut board = Board::standard();
        let pawn = board.take(sq("e2")).unwrap();
        board.put(sq("e4"), pawn);
        let pos = Position::new(board, Color::Black, CastlingRights::ALL, Some(sq("e3")));
        assert_eq!(pos.unwrap().en_passant(), Some(sq("e3")));
    }

    #[test]
    fn rejects_implausible_en_passant() {
        // No pawn on e4 behind the target.
        let board = Board::standard();
        assert_eq!(
            Position::new(board, Color::Black, CastlingRights::ALL, Some(sq("e3"))),
            Err(PositionError::InvalidEnPassant {
                square: sq("e3"),
                side_to_move: Color::Black,
            })
        );
        // Wrong row for the side to move.
        assert!(Position::new(board, Color::White, CastlingRights::ALL, Some(sq("e3"))).is_err());
    }
}
