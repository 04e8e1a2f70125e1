//! Move representation.

use crate::{PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two directions a king can castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastlingSide {
    /// Toward the h-file (O-O).
    Kingside,
    /// Toward the a-file (O-O-O).
    Queenside,
}

impl CastlingSide {
    /// Both sides, kingside first.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    /// Column the rook starts on.
    #[inline]
    pub const fn rook_home_col(self) -> u8 {
        match self {
            CastlingSide::Kingside => 7,
            CastlingSide::Queenside => 0,
        }
    }

    /// Column the rook lands on, adjacent to the castled king.
    #[inline]
    pub const fn rook_target_col(self) -> u8 {
        match self {
            CastlingSide::Kingside => 5,
            CastlingSide::Queenside => 3,
        }
    }

    /// Column the king lands on.
    #[inline]
    pub const fn king_target_col(self) -> u8 {
        match self {
            CastlingSide::Kingside => 6,
            CastlingSide::Queenside => 2,
        }
    }

    /// Column step from the king toward the rook.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            CastlingSide::Kingside => 1,
            CastlingSide::Queenside => -1,
        }
    }
}

/// What kind of transition a move describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Piece relocation, possibly capturing on the destination.
    Normal,
    /// Pawn capture onto the en passant target square.
    EnPassant,
    /// King move of two columns with the matching rook relocation.
    Castle(CastlingSide),
}

/// A chess move: a description of a transition, not a historical record.
///
/// A pawn move onto the last rank promotes to [`Move::promotion`], which
/// defaults to a queen when absent.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    from: Square,
    to: Square,
    kind: MoveKind,
    promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move {
            from,
            to,
            kind,
            promotion: None,
        }
    }

    /// Creates a normal move (no special flags).
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::Normal)
    }

    /// Creates an en passant capture.
    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::EnPassant)
    }

    /// Creates a castling move.
    #[inline]
    pub const fn castle(from: Square, to: Square, side: CastlingSide) -> Self {
        Self::new(from, to, MoveKind::Castle(side))
    }

    /// Returns a copy of this move requesting promotion to `kind`.
    #[inline]
    pub const fn with_promotion(self, kind: PieceKind) -> Self {
        Move {
            promotion: Some(kind),
            ..self
        }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the move kind.
    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Returns the requested promotion piece, if any.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        self.promotion
    }

    /// Returns true if this is an en passant capture.
    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    /// Returns the castling side if this is a castling move.
    #[inline]
    pub const fn castling(self) -> Option<CastlingSide> {
        match self.kind {
            MoveKind::Castle(side) => Some(side),
            _ => None,
        }
    }

    /// Returns true if both moves describe the same transition, ignoring the
    /// requested promotion piece.
    #[inline]
    pub fn same_transition(self, other: Move) -> bool {
        self.from == other.from && self.to == other.to && self.kind == other.kind
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move::normal(Square::A8, Square::A8);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::Normal => write!(f, "Move({})", self),
            MoveKind::EnPassant => write!(f, "Move({} e.p.)", self),
            MoveKind::Castle(side) => write!(f, "Move({} {:?})", self, side),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}
