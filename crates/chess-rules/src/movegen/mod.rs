//! Move generation.
//!
//! Moves are generated per source square. [`pseudo_legal_moves`] follows the
//! piece's movement pattern and occupancy rules only; [`legal_moves`] then
//! plays every candidate on a scratch board and drops the ones that leave the
//! mover's king attacked. Castling safety (not in, not through check) is
//! checked during generation; landing in check is caught by the filter like
//! any other move.

mod attacks;
pub mod perft;

use crate::Position;
use chess_core::{Board, CastlingSide, Color, Move, MoveKind, Piece, PieceKind, Square};

pub use attacks::is_square_attacked;
use attacks::{DIAGONAL, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL};

/// A list of moves with a fixed maximum capacity.
///
/// Holds the moves of a single piece (at most 27, for a queen), so a
/// fixed-size array avoids heap allocations. Whole-side lists are a `Vec`
/// because a [`Position`] may carry any amount of material.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves the list can hold.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Iterates over the moves in generation order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if the list contains exactly this move.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the pseudo-legal moves of the piece on `from`.
///
/// An empty square yields an empty list. Moves that leave the mover's own
/// king in check are still included.
pub fn pseudo_legal_moves(position: &Position, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = position.piece_at(from) else {
        return moves;
    };
    let board = position.board();
    let us = piece.color;

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(position, from, us, &mut moves),
        PieceKind::Knight => generate_step_moves(board, from, us, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => generate_slider_moves(board, from, us, &DIAGONAL, &mut moves),
        PieceKind::Rook => generate_slider_moves(board, from, us, &ORTHOGONAL, &mut moves),
        PieceKind::Queen => {
            generate_slider_moves(board, from, us, &ORTHOGONAL, &mut moves);
            generate_slider_moves(board, from, us, &DIAGONAL, &mut moves);
        }
        PieceKind::King => {
            generate_step_moves(board, from, us, &KING_OFFSETS, &mut moves);
            generate_castling_moves(position, from, us, &mut moves);
        }
    }

    moves
}

/// Generates the legal moves of the piece on `from`.
///
/// Pawn moves onto the last rank are returned once, without a promotion
/// piece; applying them promotes to a queen unless the caller picks another
/// piece with [`Move::with_promotion`].
pub fn legal_moves(position: &Position, from: Square) -> MoveList {
    let mut moves = pseudo_legal_moves(position, from);
    if let Some(piece) = position.piece_at(from) {
        moves.retain(|m| !leaves_king_attacked(position.board(), *m, piece.color));
    }
    moves
}

/// Generates the legal moves of every piece of `color`, in board order.
pub fn all_legal_moves(position: &Position, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for (sq, _) in position.board().pieces_of(color) {
        moves.extend(legal_moves(position, sq).iter().copied());
    }
    moves
}

/// Generates every legal move for the side to move, with each promotion
/// spelled out once per target piece.
///
/// This is the list perft counts and the one a player picks from.
pub fn generate_moves(position: &Position) -> Vec<Move> {
    let mut moves = Vec::new();
    for m in &all_legal_moves(position, position.side_to_move()) {
        if is_promotion(position.board(), *m) {
            moves.extend(PieceKind::PROMOTIONS.iter().map(|&kind| m.with_promotion(kind)));
        } else {
            moves.push(*m);
        }
    }
    moves
}

/// Returns true if `m` moves a pawn onto its last rank.
pub(crate) fn is_promotion(board: &Board, m: Move) -> bool {
    board
        .get(m.from())
        .is_some_and(|p| p.kind == PieceKind::Pawn && m.to().row() == p.color.promotion_row())
}

/// Returns true if playing `m` would leave the king of `color` attacked.
///
/// A board with no king for `color` after the move counts as attacked.
fn leaves_king_attacked(board: &Board, m: Move, color: Color) -> bool {
    let after = play_on_board(board, m);
    match after.find_king(color) {
        Some(king) => is_square_attacked(&after, king, color.opposite()),
        None => {
            tracing::warn!(mv = %m, %color, "no king found after simulated move, treating as illegal");
            true
        }
    }
}

/// Generates pseudo-legal pawn moves.
fn generate_pawn_moves(position: &Position, from: Square, us: Color, moves: &mut MoveList) {
    let board = position.board();
    let dir = us.pawn_direction();

    // Pushes
    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            moves.push(Move::normal(from, one));
            if from.row() == us.pawn_start_row() {
                if let Some(two) = one.offset(dir, 0) {
                    if board.is_empty(two) {
                        moves.push(Move::normal(from, two));
                    }
                }
            }
        }
    }

    // Captures, including en passant
    for dc in [-1, 1] {
        let Some(to) = from.offset(dir, dc) else {
            continue;
        };
        match board.get(to) {
            Some(target) if target.color != us => moves.push(Move::normal(from, to)),
            Some(_) => {}
            None if can_capture_en_passant(position, from, to, us) => {
                moves.push(Move::en_passant(from, to));
            }
            None => {}
        }
    }
}

/// En passant is only available to the side to move, onto the current
/// target, with the enemy pawn standing beside the capturing pawn.
fn can_capture_en_passant(position: &Position, from: Square, to: Square, us: Color) -> bool {
    if position.en_passant() != Some(to) || position.side_to_move() != us {
        return false;
    }
    let victim = from.offset(0, to.col() as i8 - from.col() as i8);
    victim.and_then(|sq| position.piece_at(sq)) == Some(Piece::new(PieceKind::Pawn, us.opposite()))
}

/// Generates knight or king steps onto empty or enemy squares.
fn generate_step_moves(
    board: &Board,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc) {
            if board.get(to).map_or(true, |p| p.color != us) {
                moves.push(Move::normal(from, to));
            }
        }
    }
}

/// Generates sliding moves along each direction, up to and including the
/// first enemy piece.
fn generate_slider_moves(
    board: &Board,
    from: Square,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in directions {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, dc) {
            match board.get(to) {
                None => moves.push(Move::normal(from, to)),
                Some(p) => {
                    if p.color != us {
                        moves.push(Move::normal(from, to));
                    }
                    break;
                }
            }
            cur = to;
        }
    }
}

/// Generates castling moves if the right is held and the path is clear and safe.
fn generate_castling_moves(position: &Position, from: Square, us: Color, moves: &mut MoveList) {
    if from != Square::king_home(us) {
        return;
    }
    let board = position.board();
    let them = us.opposite();

    // Can't castle out of check
    if is_square_attacked(board, from, them) {
        return;
    }

    for side in CastlingSide::ALL {
        if !position.castling().has(us, side) {
            continue;
        }
        let rook_sq = Square::rook_home(us, side);
        if board.get(rook_sq) != Some(Piece::new(PieceKind::Rook, us)) {
            continue;
        }

        // Every square between king and rook must be empty
        let step = side.direction();
        let gap = (rook_sq.col() as i8 - from.col() as i8).abs() - 1;
        let path_clear = (1..=gap)
            .filter_map(|n| from.offset(0, step * n))
            .all(|sq| board.is_empty(sq));
        if !path_clear {
            continue;
        }

        // The two squares the king crosses must not be attacked
        let path_safe = (1..=2)
            .filter_map(|n| from.offset(0, step * n))
            .all(|sq| !is_square_attacked(board, sq, them));
        if !path_safe {
            continue;
        }

        let to = Square::on_back_rank(us, side.king_target_col());
        moves.push(Move::castle(from, to, side));
    }
}

/// Plays the piece movement of `m` on a copy of `board`.
///
/// Covers relocation, en passant removal, the castling rook and promotion.
/// Bookkeeping (side to move, rights, en passant target) is left to
/// [`make_move`].
pub(crate) fn play_on_board(board: &Board, m: Move) -> Board {
    let mut next = *board;
    let Some(mut piece) = next.take(m.from()) else {
        return next;
    };

    match m.kind() {
        MoveKind::Normal => {}
        MoveKind::EnPassant => {
            // The captured pawn sits beside the mover, on the destination file.
            if let Some(victim) = m.from().offset(0, m.to().col() as i8 - m.from().col() as i8) {
                next.take(victim);
            }
        }
        MoveKind::Castle(side) => {
            let rook_from = Square::on_back_rank(piece.color, side.rook_home_col());
            let rook_to = Square::on_back_rank(piece.color, side.rook_target_col());
            let rook = next.take(rook_from);
            next.set(rook_to, rook);
        }
    }

    if is_promotion(board, m) {
        piece.kind = m.promotion().unwrap_or(PieceKind::Queen);
    }
    next.put(m.to(), piece);
    next
}

/// Makes a move and returns the new position.
///
/// The move is not validated; use
/// [`GameState::apply_move`](crate::GameState::apply_move) for moves coming
/// from outside the engine. An empty source square leaves the position as is.
pub fn make_move(position: &Position, m: Move) -> Position {
    let from = m.from();
    let to = m.to();
    let Some(piece) = position.piece_at(from) else {
        tracing::debug!(mv = %m, "make_move called on an empty square");
        return *position;
    };
    let us = piece.color;
    let board = play_on_board(position.board(), m);

    // A double step leaves the skipped square as the en passant target
    let en_passant = if piece.kind == PieceKind::Pawn && from.row().abs_diff(to.row()) == 2 {
        Square::new((from.row() + to.row()) / 2, from.col())
    } else {
        None
    };

    let mut castling = position.castling();
    // King move removes all castling rights for that color
    if piece.kind == PieceKind::King {
        castling.remove_color(us);
    }
    // Rook leaving its corner removes that side
    if piece.kind == PieceKind::Rook {
        for side in CastlingSide::ALL {
            if from == Square::rook_home(us, side) {
                castling.remove(us, side);
            }
        }
    }
    // Anything landing on a rook corner removes that corner's right
    for color in Color::ALL {
        for side in CastlingSide::ALL {
            if to == Square::rook_home(color, side) {
                castling.remove(color, side);
            }
        }
    }

    Position::from_parts(board, position.side_to_move().opposite(), castling, en_passant)
}
