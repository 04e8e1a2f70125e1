//! Attack patterns and square attack detection.

use chess_core::{Board, Color, Piece, PieceKind, Square};

/// The eight L-shaped knight jumps as `(row, col)` deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// The eight neighbouring squares of a king.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Rook directions.
pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Bishop directions.
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Returns the first piece met walking from `from` along `(dr, dc)`.
fn first_piece_along(board: &Board, from: Square, (dr, dc): (i8, i8)) -> Option<Piece> {
    let mut cur = from;
    while let Some(next) = cur.offset(dr, dc) {
        if let Some(piece) = board.get(next) {
            return Some(piece);
        }
        cur = next;
    }
    None
}

fn any_piece_at(board: &Board, sq: Square, offsets: &[(i8, i8)], wanted: Piece) -> bool {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| sq.offset(dr, dc))
        .any(|target| board.get(target) == Some(wanted))
}

/// Returns true if any piece of `by_color` could capture on `sq` next move.
///
/// This looks at attack patterns only: pins, and whether the attacker's own
/// king is exposed, do not matter.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    // An attacking pawn stands one step behind `sq` from its own point of view.
    let dir = by_color.pawn_direction();
    let pawn = Piece::new(PieceKind::Pawn, by_color);
    if any_piece_at(board, sq, &[(-dir, -1), (-dir, 1)], pawn) {
        return true;
    }

    if any_piece_at(
        board,
        sq,
        &KNIGHT_OFFSETS,
        Piece::new(PieceKind::Knight, by_color),
    ) {
        return true;
    }

    if any_piece_at(board, sq, &KING_OFFSETS, Piece::new(PieceKind::King, by_color)) {
        return true;
    }

    let rays = ORTHOGONAL
        .iter()
        .map(|d| (d, PieceKind::Rook))
        .chain(DIAGONAL.iter().map(|d| (d, PieceKind::Bishop)));
    for (&dir, slider) in rays {
        if let Some(piece) = first_piece_along(board, sq, dir) {
            if piece.color == by_color && (piece.kind == slider || piece.kind == PieceKind::Queen) {
                return true;
            }
        }
    }

    false
}
