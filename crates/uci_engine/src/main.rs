mod go;
mod info;

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chess_core::{position_from_uci, Engine, Position, SearchResult, StopHandle};
use classical_engine::{
    AdaptiveRisk, ClassicalEngine, DifficultyLevel, DifficultyTable, EngineResult, GmBook,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::go::GoParams;
use crate::info::info_line;

/// Engine plus the state that carries over between searches.
struct Session {
    engine: ClassicalEngine,
    level: Option<DifficultyLevel>,
    adapt: AdaptiveRisk,
    last_score: Option<i32>,
}

impl Session {
    fn reset_game(&mut self) {
        self.engine.new_game();
        self.adapt.reset();
        self.last_score = None;
    }
}

fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn main() -> EngineResult<()> {
    // stdout carries the protocol, logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let levels = match std::env::args().nth(1) {
        Some(path) => {
            let table = DifficultyTable::from_file(&path)?;
            info!(%path, levels = table.levels().len(), "loaded difficulty levels");
            table
        }
        None => DifficultyTable::builtin(),
    };

    let engine = ClassicalEngine::new().with_book(Box::new(GmBook::new()));
    let stop = engine.stop_handle();
    // Identification is answered without the session lock, which a running
    // search holds.
    let id_name = engine.name().to_string();
    let id_author = engine.author().to_string();
    let session = Arc::new(Mutex::new(Session {
        engine,
        level: None,
        adapt: AdaptiveRisk::default(),
        last_score: None,
    }));

    let mut pos = Position::startpos();
    let mut worker: Option<JoinHandle<()>> = None;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            continue;
        };

        match command {
            "uci" => {
                writeln!(stdout, "id name {id_name}").ok();
                writeln!(stdout, "id author {id_author}").ok();
                writeln!(stdout, "option name Hash type spin default 16 min 1 max 1024").ok();
                writeln!(stdout, "option name Clear Hash type button").ok();
                writeln!(stdout, "option name OwnBook type check default true").ok();
                writeln!(stdout, "option name Level type spin default 0 min 0 max 10").ok();
                writeln!(stdout, "uciok").ok();
                stdout.flush().ok();
            }
            "isready" => {
                writeln!(stdout, "readyok").ok();
                stdout.flush().ok();
            }
            "setoption" => {
                finish_search(&mut worker);
                let (name, value) = parse_setoption(args);
                let mut guard = lock(&session);
                if name.eq_ignore_ascii_case("level") {
                    match value.parse::<u8>() {
                        Ok(0) => guard.level = None,
                        Ok(n) => match levels.get(n) {
                            Ok(level) => guard.level = Some(level.clone()),
                            Err(err) => warn!(%err, "ignoring level"),
                        },
                        Err(_) => warn!(%value, "level must be a number"),
                    }
                    guard.adapt.reset();
                    guard.last_score = None;
                } else if !guard.engine.set_option(&name, &value) {
                    warn!(%name, %value, "unsupported option");
                }
            }
            "ucinewgame" => {
                finish_search(&mut worker);
                lock(&session).reset_game();
                pos = Position::startpos();
            }
            "position" => {
                match position_from_uci(args) {
                    Ok(p) => pos = p,
                    Err(err) => warn!(%err, "rejected position command"),
                }
            }
            "go" => {
                finish_search(&mut worker);
                let params = GoParams::parse(args);
                let session = Arc::clone(&session);
                let pos = pos.clone();
                worker = Some(thread::spawn(move || run_search(&session, &pos, &params)));
            }
            "stop" => stop_search(&stop, &mut worker),
            "quit" => {
                stop_search(&stop, &mut worker);
                break;
            }
            _ => {
                // ignore unknown commands
            }
        }
    }
    Ok(())
}

/// Waits for the search in flight, if any.
fn finish_search(worker: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = worker.take() {
        if handle.join().is_err() {
            warn!("search thread panicked");
        }
    }
}

/// Cancels the search in flight and waits for its `bestmove`.
///
/// The request is repeated until the worker exits, since a search that has
/// not started yet clears the flag when it does.
fn stop_search(stop: &StopHandle, worker: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = worker.as_ref() {
        while !handle.is_finished() {
            stop.request_stop();
            thread::sleep(Duration::from_millis(1));
        }
    }
    finish_search(worker);
}

/// Splits `name <words...> value <words...>`; option names may contain spaces.
fn parse_setoption(args: &[&str]) -> (String, String) {
    let name_at = args.iter().position(|&a| a == "name").map_or(0, |i| i + 1);
    let value_at = args.iter().position(|&a| a == "value");
    let name_end = value_at.unwrap_or(args.len()).max(name_at);
    let name = args[name_at..name_end].join(" ");
    let value = value_at.map(|i| args[i + 1..].join(" ")).unwrap_or_default();
    (name, value)
}

fn run_search(session: &Mutex<Session>, pos: &Position, params: &GoParams) {
    let mut guard = lock(session);
    let session = &mut *guard;
    let mut config = params.search_config(pos.side_to_move(), session.level.as_ref());
    let adaptive = session.level.as_ref().is_some_and(|l| l.adaptive);
    if adaptive {
        config.risk = session.adapt.risk();
    }

    let started = Instant::now();
    let result = match session.engine.search(pos, &config) {
        Ok(result) => result,
        Err(err) => {
            warn!(%err, "search failed");
            println!("bestmove 0000");
            return;
        }
    };

    if adaptive && !result.from_book {
        if let Some(last) = session.last_score {
            let risk = session.adapt.update(last, result.score);
            info!(risk, blunders = session.adapt.blunders, "adaptive risk updated");
        }
        session.last_score = Some(result.score);
    }

    let elapsed_ms = started.elapsed().as_millis() as u64;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", info_line(&result, elapsed_ms, session.engine.hashfull())).ok();
    match result.best_move {
        Some(mv) => writeln!(out, "bestmove {mv}").ok(),
        None => writeln!(out, "bestmove 0000").ok(),
    };
    out.flush().ok();
}
