use super::*;
use classical_engine::DifficultyTable;

#[test]
fn test_parse_tokens() {
    let params = GoParams::parse(&[
        "wtime", "60000", "btime", "50000", "winc", "1000", "depth", "7", "nodes", "5000",
    ]);
    assert_eq!(params.wtime, Some(60000));
    assert_eq!(params.btime, Some(50000));
    assert_eq!(params.winc, Some(1000));
    assert_eq!(params.depth, Some(7));
    assert_eq!(params.nodes, Some(5000));
    assert!(!params.infinite);
}

#[test]
fn test_parse_skips_junk() {
    let params = GoParams::parse(&["movetime", "abc", "ponder", "infinite", "depth"]);
    assert_eq!(params.movetime, None);
    assert_eq!(params.depth, None);
    assert!(params.infinite);
}

#[test]
fn test_clock_allocation() {
    let params = GoParams::parse(&["wtime", "30000", "btime", "9000", "binc", "400"]);
    assert_eq!(params.move_time_ms(Color::White), Some(1000));
    assert_eq!(params.move_time_ms(Color::Black), Some(300 + 300));

    let last_move = GoParams::parse(&["wtime", "1000", "movestogo", "1"]);
    assert_eq!(last_move.move_time_ms(Color::White), Some(500));

    assert_eq!(GoParams::parse(&["movetime", "250"]).move_time_ms(Color::Black), Some(250));
    assert_eq!(GoParams::parse(&[]).move_time_ms(Color::White), None);
}

#[test]
fn test_config_without_level() {
    let config = GoParams::parse(&["depth", "5"]).search_config(Color::White, None);
    assert_eq!(config, SearchConfig::depth(5));
}

#[test]
fn test_level_limits_and_overrides() {
    let table = DifficultyTable::builtin();
    let level = table.get(4).unwrap();

    let config = GoParams::parse(&[]).search_config(Color::White, Some(level));
    assert_eq!(config, level.search_config());

    let config = GoParams::parse(&["depth", "6"]).search_config(Color::White, Some(level));
    assert_eq!(config.max_depth, Some(6));
    assert_eq!(config.max_time, Some(Duration::from_millis(500)));
    assert_eq!(config.risk, level.risk);

    let config = GoParams::parse(&["infinite"]).search_config(Color::White, Some(level));
    assert_eq!(config.max_time, None);
}
