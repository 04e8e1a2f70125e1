//! Game state with move history and undo.
//!
//! [`GameState`] is a plain value: [`GameState::apply_move`] and
//! [`GameState::undo_last_move`] return new states and never touch the one
//! they are called on. Each history entry keeps the full position from before
//! the move, so undo restores a snapshot instead of reversing the move.

use crate::movegen::{is_promotion, legal_moves, make_move};
use crate::status::{game_status, is_in_check, GameStatus};
use crate::{CastlingRights, MoveList, Position};
use chess_core::{Board, Color, Move, PieceKind, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A move that was played, with the position it was played from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The move as it was applied.
    pub mov: Move,
    /// The position before the move.
    pub previous: Position,
}

/// Reasons [`GameState::apply_move`] refuses a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("piece on {square} belongs to {piece_color}, but {side_to_move} is to move")]
    WrongTurn {
        square: Square,
        piece_color: Color,
        side_to_move: Color,
    },

    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("cannot promote to {0} here")]
    InvalidPromotion(PieceKind),
}

/// A game in progress: the current position and how it was reached.
///
/// Every new state owns a copy of the history, so applying or undoing a
/// move costs time linear in the number of plies played.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    position: Position,
    history: Vec<HistoryEntry>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a game from the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Creates a game from a custom starting position, with empty history.
    pub fn from_position(position: Position) -> Self {
        GameState {
            position,
            history: Vec::new(),
        }
    }

    /// Returns the current position.
    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the current board.
    #[inline]
    pub fn board(&self) -> &Board {
        self.position.board()
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// Returns the castling rights.
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.position.castling()
    }

    /// Returns the en passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.position.en_passant()
    }

    /// Returns the moves played so far, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the number of half-moves played.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the legal moves of the piece on `from`.
    ///
    /// Empty for an empty square. Pieces of the side not to move still list
    /// their moves, but [`apply_move`](Self::apply_move) will refuse them.
    pub fn legal_moves(&self, from: Square) -> MoveList {
        legal_moves(&self.position, from)
    }

    /// Applies a move and returns the resulting state.
    ///
    /// The move must match one of [`legal_moves`](Self::legal_moves) for its
    /// source square. A pawn reaching the last rank becomes a queen unless
    /// the move carries another promotion piece.
    pub fn apply_move(&self, m: Move) -> Result<GameState, MoveError> {
        let result = self.validate(m);
        if let Err(err) = &result {
            tracing::debug!(mv = %m, error = %err, "move rejected");
        }
        let m = result?;

        let position = make_move(&self.position, m);
        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.extend_from_slice(&self.history);
        history.push(HistoryEntry {
            mov: m,
            previous: self.position,
        });

        tracing::debug!(mv = %m, ply = history.len(), "move applied");
        Ok(GameState { position, history })
    }

    /// Checks `m` against the current legal moves and returns the move
    /// as generated, carrying the caller's promotion choice.
    fn validate(&self, m: Move) -> Result<Move, MoveError> {
        let from = m.from();
        let piece = self
            .position
            .piece_at(from)
            .ok_or(MoveError::EmptySquare(from))?;
        let side_to_move = self.side_to_move();
        if piece.color != side_to_move {
            return Err(MoveError::WrongTurn {
                square: from,
                piece_color: piece.color,
                side_to_move,
            });
        }

        let generated = self
            .legal_moves(from)
            .iter()
            .copied()
            .find(|g| g.same_transition(m))
            .ok_or(MoveError::IllegalMove(m))?;

        match m.promotion() {
            None => Ok(generated),
            Some(kind) if kind.is_promotion_target() && is_promotion(self.board(), m) => {
                Ok(generated.with_promotion(kind))
            }
            Some(kind) => Err(MoveError::InvalidPromotion(kind)),
        }
    }

    /// Returns the state before the last move, or `None` at the start of
    /// the game.
    pub fn undo_last_move(&self) -> Option<GameState> {
        let (last, earlier) = self.history.split_last()?;
        tracing::debug!(mv = %last.mov, ply = earlier.len(), "move undone");
        Some(GameState {
            position: last.previous,
            history: earlier.to_vec(),
        })
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        is_in_check(self.board(), self.side_to_move())
    }

    /// Returns the status for the side to move.
    pub fn status(&self) -> GameStatus {
        game_status(&self.position)
    }
}

/// Starts a new game from the standard position.
pub fn new_game() -> GameState {
    GameState::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{CastlingSide, Piece};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn mv(from: &str, to: &str) -> Move {
        Move::normal(sq(from), sq(to))
    }

    #[test]
    fn new_game_defaults() {
        let game = new_game();
        assert_eq!(game.board(), &Board::standard());
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.castling(), CastlingRights::ALL);
        assert_eq!(game.en_passant(), None);
        assert!(game.history().is_empty());
        assert_eq!(game, GameState::default());
    }

    #[test]
    fn apply_move_records_history() {
        let game = new_game();
        let next = game.apply_move(mv("e2", "e4")).unwrap();
        assert_eq!(next.ply_count(), 1);
        assert_eq!(next.history()[0].mov, mv("e2", "e4"));
        assert_eq!(next.history()[0].previous, *game.position());
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.en_passant(), Some(sq("e3")));
        // The original is untouched.
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.board(), &Board::standard());
    }

    #[test]
    fn apply_then_undo_restores_state() {
        let game = new_game();
        let next = game.apply_move(mv("g1", "f3")).unwrap();
        assert_eq!(next.undo_last_move(), Some(game.clone()));
        assert_eq!(game.undo_last_move(), None);
    }

    #[test]
    fn undo_twice() {
        let game = new_game()
            .apply_move(mv("e2", "e4"))
            .unwrap()
            .apply_move(mv("e7", "e5"))
            .unwrap();
        let once = game.undo_last_move().unwrap();
        assert_eq!(once.ply_count(), 1);
        assert_eq!(once.side_to_move(), Color::Black);
        let twice = once.undo_last_move().unwrap();
        assert_eq!(twice, new_game());
    }

    #[test]
    fn rejects_empty_square() {
        assert_eq!(
            new_game().apply_move(mv("e4", "e5")),
            Err(MoveError::EmptySquare(sq("e4")))
        );
    }

    #[test]
    fn rejects_wrong_turn() {
        assert_eq!(
            new_game().apply_move(mv("e7", "e5")),
            Err(MoveError::WrongTurn {
                square: sq("e7"),
                piece_color: Color::Black,
                side_to_move: Color::White,
            })
        );
    }

    #[test]
    fn rejects_illegal_move() {
        let bad = mv("e2", "e5");
        assert_eq!(new_game().apply_move(bad), Err(MoveError::IllegalMove(bad)));

        // A castle that was never generated.
        let castle = Move::castle(Square::E1, Square::G1, CastlingSide::Kingside);
        assert_eq!(
            new_game().apply_move(castle),
            Err(MoveError::IllegalMove(castle))
        );
    }

    #[test]
    fn castle_must_be_flagged() {
        // The two-square king step only exists as a castle.
        let position = Position::new(
            "....k...
             ........
             ........
             ........
             ........
             ........
             ........
             ....K..R"
                .parse()
                .unwrap(),
            Color::White,
            CastlingRights::new(CastlingRights::WHITE_KINGSIDE),
            None,
        )
        .unwrap();
        let game = GameState::from_position(position);
        let plain = Move::normal(Square::E1, Square::G1);
        assert_eq!(game.apply_move(plain), Err(MoveError::IllegalMove(plain)));

        let castle = Move::castle(Square::E1, Square::G1, CastlingSide::Kingside);
        let next = game.apply_move(castle).unwrap();
        assert_eq!(
            next.board().get(Square::F1),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
    }

    #[test]
    fn promotion_choices() {
        let position = Position::new(
            "....k...
             P.......
             ........
             ........
             ........
             ........
             ........
             ....K..."
                .parse()
                .unwrap(),
            Color::White,
            CastlingRights::NONE,
            None,
        )
        .unwrap();
        let game = GameState::from_position(position);

        let queen = game.apply_move(mv("a7", "a8")).unwrap();
        assert_eq!(
            queen.board().get(Square::A8),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );

        let rook = game
            .apply_move(mv("a7", "a8").with_promotion(PieceKind::Rook))
            .unwrap();
        assert_eq!(
            rook.board().get(Square::A8),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(rook.history()[0].mov.promotion(), Some(PieceKind::Rook));

        assert_eq!(
            game.apply_move(mv("a7", "a8").with_promotion(PieceKind::King)),
            Err(MoveError::InvalidPromotion(PieceKind::King))
        );
        assert_eq!(
            game.apply_move(mv("e1", "d1").with_promotion(PieceKind::Queen)),
            Err(MoveError::InvalidPromotion(PieceKind::Queen))
        );
    }

    #[test]
    fn status_follows_position() {
        let game = new_game();
        assert!(!game.is_check());
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn error_messages() {
        assert_eq!(MoveError::EmptySquare(sq("e4")).to_string(), "no piece on e4");
        assert_eq!(
            MoveError::IllegalMove(mv("e2", "e5")).to_string(),
            "illegal move: e2e5"
        );
    }
}
