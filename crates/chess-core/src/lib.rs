//! Core types for chess.
//!
//! This crate provides the board model used by the rules engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates
//! - [`Move`], [`MoveKind`] and [`CastlingSide`] for move descriptions
//! - [`Board`], an 8x8 grid of optional pieces with a text diagram format

mod board;
mod color;
mod mov;
mod piece;
mod square;

pub use board::{Board, BoardParseError};
pub use color::Color;
pub use mov::{CastlingSide, Move, MoveKind};
pub use piece::{Piece, PieceKind};
pub use square::Square;
