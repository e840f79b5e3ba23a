use super::*;
use chess_core::ChessError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn eval_fen(fen: &str) -> i32 {
    evaluate(&Position::from_fen(fen).unwrap()).unwrap()
}

/// Same position with colors swapped and the board turned around.
fn mirror_fen(fen: &str) -> String {
    let parts: Vec<&str> = fen.split(' ').collect();
    let swap = |c: char| {
        if c.is_ascii_uppercase() {
            c.to_ascii_lowercase()
        } else {
            c.to_ascii_uppercase()
        }
    };
    let board: Vec<String> = parts[0]
        .split('/')
        .rev()
        .map(|rank| rank.chars().map(swap).collect())
        .collect();
    let side = if parts[1] == "w" { "b" } else { "w" };
    let castling = if parts[2] == "-" {
        "-".to_string()
    } else {
        let swapped: Vec<char> = parts[2].chars().map(swap).collect();
        "KQkq".chars().filter(|c| swapped.contains(c)).collect()
    };
    let ep = match parts[3] {
        "-" => "-".to_string(),
        sq => {
            let b = sq.as_bytes();
            format!("{}{}", b[0] as char, if b[1] == b'3' { '6' } else { '3' })
        }
    };
    format!("{} {} {} {} {} {}", board.join("/"), side, castling, ep, parts[4], parts[5])
}

#[test]
fn test_startpos_is_zero() {
    assert_eq!(evaluate(&Position::startpos()), Ok(0));
}

#[test]
fn test_color_flip_negates_score() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "8/8/8/4k3/8/8/8/QR2K3 w - - 0 1",
        "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1",
    ];
    for fen in fens {
        let mirrored = mirror_fen(fen);
        assert_eq!(eval_fen(fen), -eval_fen(&mirrored), "{fen} vs {mirrored}");
    }
}

#[test]
fn test_material_dominates() {
    // White is a queen up
    let score = eval_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert!(score > 800, "score {score}");
    let score = eval_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/R1BQKBNR w KQkq - 0 1");
    assert!(score < -250, "score {score}");
}

#[test]
fn test_score_ignores_side_to_move() {
    assert_eq!(
        eval_fen("4k3/8/8/3P4/8/8/8/4K3 w - - 0 1"),
        eval_fen("4k3/8/8/3P4/8/8/8/4K3 b - - 0 1")
    );
}

#[test]
fn test_missing_king_is_an_error() {
    let pos = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(evaluate(&pos), Err(ChessError::MissingKing(Color::Black)));
}

#[test]
fn test_passed_pawn_detection() {
    let pos = Position::from_fen("4k3/8/2p5/8/3P4/8/6P1/4K3 w - - 0 1").unwrap();
    let sq = |c: &str| Square::from_coord(c).unwrap();
    // c6 pawn guards d5 and beyond for d4
    assert!(!is_passed_pawn(&pos, sq("d4"), Color::White));
    assert!(is_passed_pawn(&pos, sq("g2"), Color::White));
    // d4 stands on an adjacent file ahead of the black pawn
    assert!(!is_passed_pawn(&pos, sq("c6"), Color::Black));
}

#[test]
fn test_protected_pawn_detection() {
    let pos = Position::from_fen("4k3/8/2p5/1p6/3P4/4P3/8/4K3 w - - 0 1").unwrap();
    let sq = |c: &str| Square::from_coord(c).unwrap();
    assert!(is_pawn_protected(&pos, sq("d4"), Color::White));
    assert!(!is_pawn_protected(&pos, sq("e3"), Color::White));
    assert!(is_pawn_protected(&pos, sq("b5"), Color::Black));
    assert!(!is_pawn_protected(&pos, sq("c6"), Color::Black));
}

#[test]
fn test_mop_up_drives_king_to_edge() {
    let sq = |c: &str| Square::from_coord(c).unwrap();
    let strong = sq("c6");
    // Rank 0 file 0 is three steps from the centre block on each axis
    assert_eq!(mop_up([6, 0], strong, sq("a8")), 3 * 10 + 3 * 10 + (14 - 4) * 5);
    assert!(mop_up([6, 0], strong, sq("a8")) > mop_up([6, 0], strong, sq("e4")));
    // Black winning flips the sign
    assert!(mop_up([0, 6], sq("a8"), strong) < 0);
    // Not decisive enough
    assert_eq!(mop_up([4, 0], strong, sq("a8")), 0);
    assert_eq!(mop_up([6, 1], strong, sq("a8")), 0);
}

#[test]
fn test_noise_is_bounded_and_optional() {
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(add_noise(120, 0.0, &mut rng), 120);
    assert_eq!(add_noise(120, NOISE_THRESHOLD, &mut rng), 120);
    for _ in 0..200 {
        let noisy = add_noise(120, 0.5, &mut rng);
        assert!((95..=145).contains(&noisy), "{noisy}");
    }
}
