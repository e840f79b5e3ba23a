use super::*;
use chess_core::{legal_moves, parse_uci_move, Position};

#[test]
fn test_priority_values() {
    let pos = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let capture_promo = parse_uci_move(&pos, "a7b8q").unwrap();
    let quiet_promo = parse_uci_move(&pos, "a7a8n").unwrap();
    let king_step = parse_uci_move(&pos, "e1d1").unwrap();

    // promotion 1000 + 900, capture 500 + 500, check +100
    assert_eq!(move_priority(&capture_promo), 1900 + 1000 + 100);
    assert_eq!(move_priority(&quiet_promo), 1000 + 320);
    assert_eq!(move_priority(&king_step), 0);
}

#[test]
fn test_captures_sorted_by_victim() {
    // Knight on d4 can take the rook on c6 or the pawn on e6
    let pos = Position::from_fen("4k3/8/2r1p3/8/3N4/8/8/4K3 w - - 0 1").unwrap();
    let mut moves = legal_moves(&pos).unwrap();
    order_moves(&mut moves, None);
    assert_eq!(moves[0].to_string(), "d4c6");
    assert_eq!(moves[1].to_string(), "d4e6");
    assert!(moves[2..].iter().all(|m| !m.is_capture));
}

#[test]
fn test_quiet_moves_keep_generation_order() {
    let pos = Position::startpos();
    let generated = legal_moves(&pos).unwrap();
    let mut ordered = generated.clone();
    order_moves(&mut ordered, None);
    assert_eq!(ordered, generated);
}

#[test]
fn test_hash_move_goes_first() {
    let pos = Position::from_fen("4k3/8/2r1p3/8/3N4/8/8/4K3 w - - 0 1").unwrap();
    let mut moves = legal_moves(&pos).unwrap();
    let hint = parse_uci_move(&pos, "e1f2").unwrap();
    order_moves(&mut moves, Some(hint));
    assert!(moves[0].same_move(&hint));
    assert_eq!(moves[1].to_string(), "d4c6");
}
