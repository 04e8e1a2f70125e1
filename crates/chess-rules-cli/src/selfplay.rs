//! Random self-play.
//!
//! Both sides pick uniformly among the legal moves until the game ends or
//! the ply limit is reached. Every move goes through
//! [`GameState::apply_move`], so a run doubles as a smoke test of the checked
//! move path.

use chess_core::Color;
use chess_rules::{generate_moves, new_game, GameState, GameStatus, MoveError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// How a self-play game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    /// The ply limit was reached with the game still going.
    PlyLimit,
}

/// One half-move of a recorded game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlyRecord {
    /// 1-based half-move number.
    pub ply: usize,
    pub side: Color,
    /// Move text, e.g. `e2e4` or `a7a8n`.
    #[serde(rename = "move")]
    pub mv: String,
    /// Status for the opponent after the move.
    pub status: GameStatus,
}

/// A finished self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    pub moves: Vec<PlyRecord>,
    pub outcome: Outcome,
    /// Final board as a diagram, one string per row.
    pub final_board: Vec<String>,
}

/// Plays one random game from the starting position.
///
/// The same seed and limit always produce the same game.
pub fn play_random_game(seed: u64, max_plies: u32) -> Result<GameRecord, MoveError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = new_game();
    let mut moves = Vec::new();

    let outcome = loop {
        match game.status() {
            GameStatus::Checkmate { winner } => break Outcome::Checkmate { winner },
            GameStatus::Stalemate => break Outcome::Stalemate,
            GameStatus::Ongoing | GameStatus::Check => {}
        }
        if game.ply_count() >= max_plies as usize {
            break Outcome::PlyLimit;
        }

        let legal = generate_moves(game.position());
        let Some(&m) = legal.as_slice().choose(&mut rng) else {
            break Outcome::Stalemate;
        };
        let side = game.side_to_move();
        game = game.apply_move(m)?;

        let status = game.status();
        tracing::debug!(ply = game.ply_count(), mv = %m, %status, "played");
        moves.push(PlyRecord {
            ply: game.ply_count(),
            side,
            mv: m.to_string(),
            status,
        });
    };

    tracing::info!(seed, plies = moves.len(), ?outcome, "game finished");
    Ok(GameRecord {
        seed,
        moves,
        outcome,
        final_board: board_rows(&game),
    })
}

fn board_rows(game: &GameState) -> Vec<String> {
    game.board().to_string().lines().map(str::to_owned).collect()
}
