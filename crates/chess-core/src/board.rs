//! The board model: an 8x8 grid of optional pieces.
//!
//! Boards are plain values. Every state transition in the rules engine works
//! on a copy, so a [`Board`] held by a caller never changes underneath it.
//!
//! Boards can be written and read as an 8-line text diagram, row 0 first:
//!
//! ```text
//! rnbqkbnr
//! pppppppp
//! ........
//! ........
//! ........
//! ........
//! PPPPPPPP
//! RNBQKBNR
//! ```

use crate::{Color, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a board diagram.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("invalid diagram: expected 8 rows, got {0}")]
    WrongRowCount(usize),

    #[error("invalid diagram: row {row} has {len} cells, expected 8")]
    WrongRowLength { row: usize, len: usize },

    #[error("invalid diagram: unknown symbol '{symbol}' at row {row}, col {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
}

/// An 8x8 grid of cells, each empty or holding exactly one piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Back rank piece order from the a-file to the h-file.
    const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting arrangement.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let back = color.back_rank() as usize;
            let pawns = color.pawn_start_row() as usize;
            for (col, kind) in Self::BACK_RANK.into_iter().enumerate() {
                board.cells[back][col] = Some(Piece::new(kind, color));
                board.cells[pawns][col] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    /// Replaces the contents of `sq`, returning what was there.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.cells[sq.row() as usize][sq.col() as usize], piece)
    }

    /// Places `piece` on `sq`.
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Piece) {
        self.set(sq, Some(piece));
    }

    /// Empties `sq`, returning the piece that was there.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.set(sq, None)
    }

    /// Returns true if no piece stands on `sq`.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Iterates over occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Iterates over the squares holding pieces of `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Returns the first square (row-major) holding the king of `color`.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.pieces().find(|&(_, p)| p == king).map(|(sq, _)| sq)
    }

    /// Counts how many copies of `piece` are on the board.
    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|&(_, p)| p == piece).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let c = cell.map_or('.', Piece::symbol);
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\n{}\n)", self)
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != 8 {
            return Err(BoardParseError::WrongRowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != 8 {
                return Err(BoardParseError::WrongRowLength {
                    row,
                    len: symbols.len(),
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                if symbol == '.' {
                    continue;
                }
                let piece = Piece::from_symbol(symbol)
                    .ok_or(BoardParseError::UnknownSymbol { row, col, symbol })?;
                board.cells[row][col] = Some(piece);
            }
        }
        Ok(board)
    }
}
