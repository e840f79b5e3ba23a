//! Tests through the real engine process.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

struct EngineProcess {
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
}

impl EngineProcess {
    fn spawn() -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_uci_engine"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to spawn engine");
        let stdin = child.stdin.take().expect("Failed to get stdin");
        let stdout = child.stdout.take().expect("Failed to get stdout");

        let (tx, lines) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self { child, stdin, lines }
    }

    fn send(&mut self, command: &str) {
        writeln!(self.stdin, "{command}").unwrap();
        self.stdin.flush().unwrap();
    }

    /// Waits for a line starting with `prefix`, returning it.
    fn expect(&self, prefix: &str, timeout: Duration) -> String {
        let start = Instant::now();
        while start.elapsed() < timeout {
            if let Ok(line) = self.lines.recv_timeout(Duration::from_millis(50)) {
                if line.starts_with(prefix) {
                    return line;
                }
            }
        }
        panic!("no '{prefix}' line within {timeout:?}");
    }

    fn quit(mut self) {
        self.send("quit");
        let start = Instant::now();
        while start.elapsed() < Duration::from_secs(5) {
            if let Ok(Some(_)) = self.child.try_wait() {
                return;
            }
            thread::sleep(Duration::from_millis(20));
        }
        let _ = self.child.kill();
        panic!("engine did not exit after quit");
    }
}

#[test]
fn test_fixed_depth_search_answers() {
    let mut engine = EngineProcess::spawn();
    engine.send("uci");
    engine.expect("uciok", Duration::from_secs(5));
    engine.send(&format!("position fen {KIWIPETE}"));
    engine.send("go depth 2");

    let info = engine.expect("info depth 2", Duration::from_secs(10));
    assert!(info.contains(" pv "), "{info}");
    engine.expect("bestmove", Duration::from_secs(10));
    engine.quit();
}

#[test]
fn test_commands_during_infinite_search() {
    let mut engine = EngineProcess::spawn();
    engine.send("uci");
    engine.expect("uciok", Duration::from_secs(5));
    engine.send(&format!("position fen {KIWIPETE}"));
    engine.send("go infinite");
    thread::sleep(Duration::from_millis(200));

    // Identification and readiness must not wait for the search.
    engine.send("uci");
    engine.expect("uciok", Duration::from_secs(2));
    engine.send("isready");
    engine.expect("readyok", Duration::from_secs(2));

    engine.send("stop");
    let best = engine.expect("bestmove", Duration::from_secs(5));
    assert_ne!(best, "bestmove 0000");
    engine.quit();
}

#[test]
fn test_mated_position_reports_mate_zero() {
    let mut engine = EngineProcess::spawn();
    engine.send("position fen rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    engine.send("go depth 3");
    let info = engine.expect("info", Duration::from_secs(5));
    assert!(info.contains("score mate 0"), "{info}");
    engine.expect("bestmove 0000", Duration::from_secs(5));
    engine.quit();
}
