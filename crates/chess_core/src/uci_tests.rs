use super::*;

#[test]
fn test_move_to_uci() {
    let mv = Move::new(Square::new(6, 4), Square::new(4, 4));
    assert_eq!(move_to_uci(mv), "e2e4");
    let promo = Move::with_promotion(Square::new(1, 0), Square::new(0, 0), PieceKind::Knight);
    assert_eq!(move_to_uci(promo), "a7a8n");
}

#[test]
fn test_parse_resolves_flags() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let castle = parse_uci_move(&pos, "e1g1").unwrap();
    assert!(castle.is_castling);

    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
    let ep = parse_uci_move(&pos, "e5d6").unwrap();
    assert!(ep.is_en_passant);
    assert!(ep.is_capture);
}

#[test]
fn test_parse_promotion_suffix() {
    let pos = Position::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
    let mv = parse_uci_move(&pos, "a7a8r").unwrap();
    assert_eq!(mv.promotion, Some(PieceKind::Rook));
    // The suffix is required for a promoting pawn
    assert_eq!(
        parse_uci_move(&pos, "a7a8"),
        Err(ChessError::IllegalMove("a7a8".to_string()))
    );
}

#[test]
fn test_parse_rejects_bad_text() {
    let pos = Position::startpos();
    for txt in ["", "e2", "e2e9", "i2i4", "e2e4k", "e2e4qq"] {
        assert_eq!(
            parse_uci_move(&pos, txt),
            Err(ChessError::InvalidMoveText(txt.to_string())),
            "{txt}"
        );
    }
    assert_eq!(
        parse_uci_move(&pos, "e2e5"),
        Err(ChessError::IllegalMove("e2e5".to_string()))
    );
}

#[test]
fn test_position_from_uci() {
    let pos = position_from_uci(&["startpos", "moves", "e2e4", "e7e5", "g1f3"]).unwrap();
    assert_eq!(
        pos.to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
    );

    let args = "fen 4k3/8/8/8/8/8/8/4K3 w - - 0 1 moves e1e2".split(' ').collect::<Vec<_>>();
    let pos = position_from_uci(&args).unwrap();
    assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/4K3/8 b - - 1 1");

    assert_eq!(position_from_uci(&[]).unwrap(), Position::startpos());
    assert!(position_from_uci(&["startpos", "moves", "e2e5"]).is_err());
    assert!(position_from_uci(&["nonsense"]).is_err());
}
