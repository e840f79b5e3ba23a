//! Perft benchmark and move generator debugging aid.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p chess_core -- [depth] [fen]
//!   cargo run --release --example perft_bench -p chess_core -- divide 3 "<fen>"
//!
//! Without a FEN it runs the standard suite; `divide` prints per-move counts
//! for comparing against a reference engine.

use chess_core::{ChessResult, Position, divide, perft};
use std::env;
use std::time::{Duration, Instant};

const TEST_POSITIONS: &[(&str, &str)] = &[
    ("Starting position", chess_core::START_FEN),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Position 4",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
    (
        "Position 5",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ -",
    ),
];

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn main() -> ChessResult<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("divide") {
        let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);
        let fen = args.get(2).map(String::as_str).unwrap_or(chess_core::START_FEN);
        let pos = Position::from_fen(fen)?;
        let mut total = 0;
        for (mv, nodes) in divide(&pos, depth)? {
            println!("{mv}: {nodes}");
            total += nodes;
        }
        println!("\nTotal: {total}");
        return Ok(());
    }

    let depth: u8 = args.first().and_then(|s| s.parse().ok()).unwrap_or(4);
    let positions: Vec<(&str, &str)> = match args.get(1) {
        Some(fen) => vec![("Custom", fen.as_str())],
        None => TEST_POSITIONS.to_vec(),
    };

    println!("=== Perft Benchmark (depth {depth}) ===\n");
    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in positions {
        let pos = Position::from_fen(fen)?;
        print!("{name:.<30}");

        let start = Instant::now();
        let nodes = perft(&pos, depth)?;
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;
        println!(
            " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }

    println!("\n{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
    Ok(())
}
