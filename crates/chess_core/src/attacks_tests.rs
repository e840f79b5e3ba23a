use super::*;

fn sq(c: &str) -> Square {
    Square::from_coord(c).unwrap()
}

#[test]
fn test_pawn_attacks_follow_color_direction() {
    let pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
    // White pawn on e4 hits d5 and f5
    assert!(is_square_attacked(&pos, sq("d5"), Color::White));
    assert!(is_square_attacked(&pos, sq("f5"), Color::White));
    assert!(!is_square_attacked(&pos, sq("e5"), Color::White));
    // Black pawn on d5 hits c4 and e4, never backwards
    assert!(is_square_attacked(&pos, sq("e4"), Color::Black));
    assert!(is_square_attacked(&pos, sq("c4"), Color::Black));
    assert!(!is_square_attacked(&pos, sq("c6"), Color::Black));
}

#[test]
fn test_knight_and_king_attacks() {
    let pos = Position::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
    for target in ["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"] {
        assert!(is_square_attacked(&pos, sq(target), Color::White), "{target}");
    }
    assert!(!is_square_attacked(&pos, sq("d5"), Color::White));
    assert!(is_square_attacked(&pos, sq("d7"), Color::Black));
    assert!(!is_square_attacked(&pos, sq("d6"), Color::Black));
}

#[test]
fn test_sliders_are_blocked() {
    let pos = Position::from_fen("4k3/8/8/8/R2p3q/8/8/4K3 w - - 0 1").unwrap();
    assert!(is_square_attacked(&pos, sq("c4"), Color::White));
    assert!(is_square_attacked(&pos, sq("d4"), Color::White));
    assert!(!is_square_attacked(&pos, sq("e4"), Color::White));
    // Queen on h4 reaches e1 along the diagonal
    assert!(is_square_attacked(&pos, sq("e1"), Color::Black));
    assert!(!is_square_attacked(&pos, sq("c4"), Color::Black));
}

#[test]
fn test_is_check() {
    let pos = Position::from_fen("4k3/8/8/8/7q/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(is_check(&pos, Color::White), Ok(true));
    assert_eq!(is_check(&pos, Color::Black), Ok(false));
}

#[test]
fn test_missing_king_is_an_error() {
    let pos = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(find_king(&pos, Color::White), Ok(sq("e1")));
    assert_eq!(
        find_king(&pos, Color::Black),
        Err(ChessError::MissingKing(Color::Black))
    );
    assert!(is_check(&pos, Color::Black).is_err());
}
