//! Check, checkmate and stalemate detection.

use crate::movegen::{is_square_attacked, legal_moves};
use crate::Position;
use chess_core::{Board, Color};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Returns true if the king of `color` is attacked.
///
/// A board without a king for `color` is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .find_king(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opposite()))
}

/// Returns true if any piece of `color` has at least one legal move.
pub fn has_legal_moves(position: &Position, color: Color) -> bool {
    position
        .board()
        .pieces_of(color)
        .any(|(sq, _)| !legal_moves(position, sq).is_empty())
}

/// Returns true if `color` is in check and has no legal move.
pub fn is_checkmate(position: &Position, color: Color) -> bool {
    is_in_check(position.board(), color) && !has_legal_moves(position, color)
}

/// Returns true if `color` is not in check but has no legal move.
pub fn is_stalemate(position: &Position, color: Color) -> bool {
    !is_in_check(position.board(), color) && !has_legal_moves(position, color)
}

/// Status of the game from the side to move's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// The side to move has legal moves and is not in check.
    Ongoing,
    /// The side to move is in check but can get out of it.
    Check,
    /// The side to move is checkmated.
    Checkmate { winner: Color },
    /// The side to move has no legal move and is not in check.
    Stalemate,
}

impl GameStatus {
    /// Returns true for checkmate and stalemate.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Check => write!(f, "check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Classifies `position` for its side to move.
pub fn game_status(position: &Position) -> GameStatus {
    let us = position.side_to_move();
    let in_check = is_in_check(position.board(), us);
    match (in_check, has_legal_moves(position, us)) {
        (true, false) => GameStatus::Checkmate {
            winner: us.opposite(),
        },
        (false, false) => GameStatus::Stalemate,
        (true, true) => GameStatus::Check,
        (false, true) => GameStatus::Ongoing,
    }
}
