//! Rules engine for standard chess.
//!
//! This crate provides:
//! - [`Position`] - board, side to move, castling rights and en passant target
//! - [`GameState`] - a game in progress with move history and undo
//! - Legal move generation per square, with check, castling, en passant and
//!   promotion handled
//! - Check, checkmate and stalemate detection
//! - [`perft`](movegen::perft::perft) for validating the move generator
//!
//! # Architecture
//!
//! Boards are plain 8x8 arrays of optional pieces and every type here is
//! `Copy` or cheaply cloned. Moves are generated pseudo-legally and then
//! filtered by playing each one on a scratch board and checking whether the
//! mover's king is attacked afterwards.
//!
//! # Example
//!
//! ```
//! use chess_rules::{new_game, GameStatus};
//! use chess_core::Square;
//!
//! let game = new_game();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let moves = game.legal_moves(e2);
//! assert_eq!(moves.len(), 2);
//!
//! let next = game.apply_move(moves[1]).unwrap();
//! assert_eq!(next.status(), GameStatus::Ongoing);
//! assert_eq!(next.undo_last_move(), Some(game));
//! ```

mod game;
pub mod movegen;
mod position;
mod status;

pub use game::{new_game, GameState, HistoryEntry, MoveError};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    all_legal_moves, generate_moves, is_square_attacked, legal_moves, make_move,
    pseudo_legal_moves, MoveList,
};
pub use position::{CastlingRights, Position, PositionError};
pub use status::{
    game_status, has_legal_moves, is_checkmate, is_in_check, is_stalemate, GameStatus,
};
