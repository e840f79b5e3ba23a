use super::*;
use chess_core::{parse_uci_move, Position, START_FEN};

#[test]
fn test_start_position_hit() {
    let mut book = GmBook::with_seed(1);
    let mv = book.lookup(START_FEN).unwrap();
    assert!(["e2e4", "d2d4", "g1f3", "c2c4"].contains(&mv.as_str()));
}

#[test]
fn test_clocks_are_ignored() {
    let mut book = GmBook::with_seed(1);
    let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 10 5";
    assert!(book.lookup(fen).is_some());
}

#[test]
fn test_unknown_position_misses() {
    let mut book = GmBook::with_seed(1);
    assert_eq!(book.lookup("4k3/8/8/8/8/8/8/4K3 w - - 0 1"), None);
    assert_eq!(
        book.lookup("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2"),
        None
    );
}

#[test]
fn test_every_book_move_is_legal() {
    for (fen, moves) in GM_LINES {
        let pos = Position::from_fen(fen).unwrap();
        for (mv, _) in moves.iter() {
            assert!(parse_uci_move(&pos, mv).is_ok(), "{mv} in {fen}");
        }
    }
}

#[test]
fn test_book_keys_match_generated_fens() {
    // Positions reached by playing the book lines must find their entries.
    let mut pos = Position::startpos();
    for mv in ["e2e4", "c7c5", "g1f3", "d7d6", "d2d4"] {
        assert!(GmBook::candidates(&pos.to_fen()).is_some(), "{}", pos.to_fen());
        let mv = parse_uci_move(&pos, mv).unwrap();
        pos = pos.apply_move(mv).unwrap().0;
    }
    assert!(GmBook::candidates(&pos.to_fen()).is_some());
}

#[test]
fn test_weighted_choice_covers_candidates() {
    let mut book = GmBook::with_seed(42);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..500 {
        seen.insert(book.lookup(START_FEN).unwrap());
    }
    assert_eq!(seen.len(), 4);
}

#[test]
fn test_seeded_books_agree() {
    let mut a = GmBook::with_seed(9);
    let mut b = GmBook::with_seed(9);
    for _ in 0..20 {
        assert_eq!(a.lookup(START_FEN), b.lookup(START_FEN));
    }
}
