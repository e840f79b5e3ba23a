use super::*;
use chess_core::{parse_uci_move, Position};

fn result_with(score: i32, pv: &[&str]) -> SearchResult {
    let mut pos = Position::startpos();
    let mut moves = Vec::new();
    for text in pv {
        let mv = parse_uci_move(&pos, text).unwrap();
        pos = pos.apply_move(mv).unwrap().0;
        moves.push(mv);
    }
    SearchResult {
        best_move: moves.first().copied(),
        score,
        depth: 3,
        nodes: 1500,
        pv: moves,
        ..SearchResult::default()
    }
}

#[test]
fn test_centipawn_score() {
    assert_eq!(score_text(&result_with(-35, &["e2e4"])), "cp -35");
}

#[test]
fn test_mated_root_reports_mate_zero() {
    let mated = SearchResult {
        score: -MATE_SCORE,
        ..SearchResult::default()
    };
    assert_eq!(score_text(&mated), "mate 0");
}

#[test]
fn test_mate_scores_count_moves() {
    // Exactly MATE_SCORE comes from a one-ply mate shortcut
    assert_eq!(score_text(&result_with(MATE_SCORE, &["e2e4"])), "mate 1");
    assert_eq!(
        score_text(&result_with(MATE_SCORE + 2, &["e2e4", "e7e5", "d1h5"])),
        "mate 2"
    );
    assert_eq!(
        score_text(&result_with(-(MATE_SCORE + 1), &["e2e4", "e7e5"])),
        "mate -1"
    );
}

#[test]
fn test_info_line_fields() {
    let line = info_line(&result_with(20, &["e2e4", "e7e5"]), 500, 12);
    assert_eq!(
        line,
        "info depth 3 score cp 20 nodes 1500 nps 3000 time 500 hashfull 12 pv e2e4 e7e5"
    );
}
