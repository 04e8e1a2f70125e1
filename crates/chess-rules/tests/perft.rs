//! Perft against the published reference counts.

use chess_core::{Board, Color};
use chess_rules::{perft, perft_divide, CastlingRights, Position};

fn position(diagram: &str, side: Color, castling: u8) -> Position {
    let board: Board = diagram.parse().unwrap();
    Position::new(board, side, CastlingRights::new(castling), None).unwrap()
}

// r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -
fn kiwipete() -> Position {
    position(
        "r...k..r
         p.ppqpb.
         bn..pnp.
         ...PN...
         .p..P...
         ..N..Q.p
         PPPBBPPP
         R...K..R",
        Color::White,
        CastlingRights::ALL.raw(),
    )
}

// 8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -
fn position3() -> Position {
    position(
        "........
         ..p.....
         ...p....
         KP.....r
         .R...p.k
         ........
         ....P.P.
         ........",
        Color::White,
        0,
    )
}

// r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -
fn position4() -> Position {
    position(
        "r...k..r
         Pppp.ppp
         .b...nbN
         nP......
         BBP.P...
         q....N..
         Pp.P..PP
         R..Q.RK.",
        Color::White,
        CastlingRights::BLACK_KINGSIDE | CastlingRights::BLACK_QUEENSIDE,
    )
}

// rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ -
fn position5() -> Position {
    position(
        "rnbq.k.r
         pp.Pbppp
         ..p.....
         ........
         ..B.....
         ........
         PPP.NnPP
         RNBQK..R",
        Color::White,
        CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE,
    )
}

#[test]
fn perft_startpos_depth_4() {
    assert_eq!(perft(&Position::startpos(), 4), 197281);
}

#[test]
#[ignore]
fn perft_startpos_depth_5() {
    assert_eq!(perft(&Position::startpos(), 5), 4865609);
}

#[test]
fn perft_kiwipete() {
    let position = kiwipete();
    assert_eq!(perft(&position, 1), 48);
    assert_eq!(perft(&position, 2), 2039);
    assert_eq!(perft(&position, 3), 97862);
}

#[test]
fn perft_position3() {
    let position = position3();
    assert_eq!(perft(&position, 1), 14);
    assert_eq!(perft(&position, 2), 191);
    assert_eq!(perft(&position, 3), 2812);
    assert_eq!(perft(&position, 4), 43238);
}

#[test]
fn perft_position4() {
    let position = position4();
    assert_eq!(perft(&position, 1), 6);
    assert_eq!(perft(&position, 2), 264);
    assert_eq!(perft(&position, 3), 9467);
}

#[test]
fn perft_position5() {
    let position = position5();
    assert_eq!(perft(&position, 1), 44);
    assert_eq!(perft(&position, 2), 1486);
    assert_eq!(perft(&position, 3), 62379);
}

#[test]
fn perft_divide_kiwipete() {
    let results = perft_divide(&kiwipete(), 2);
    assert_eq!(results.len(), 48);
    let total: u64 = results.iter().map(|(_, n)| n).sum();
    assert_eq!(total, 2039);
    assert!(results.iter().any(|(m, _)| m == "e1g1"));
    assert!(results.iter().any(|(m, _)| m == "e1c1"));
}

#[test]
fn perft_divide_lists_each_promotion() {
    let results = perft_divide(&position5(), 1);
    for promo in ["d7c8q", "d7c8r", "d7c8b", "d7c8n"] {
        assert!(
            results.iter().any(|(m, _)| m == promo),
            "missing {} in {:?}",
            promo,
            results
        );
    }
}
