//! Judge front-end: line-delimited JSON request/response loop.
//!
//! The first line carries the game history so far; a request of `(-1, -1)`
//! means we open as black. Every later line is a single opponent move. Each
//! reply goes to stdout as one JSON line followed by the keep-running
//! marker; all logging goes to stderr so the protocol stream stays clean.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gomoku_minimax::{Board, Pos, Searcher, Stone, BOARD_SIZE};

const KEEP_RUNNING: &str = ">>>BOTZONE_REQUEST_KEEP_RUNNING<<<";

#[derive(Debug, Clone, Copy, Deserialize)]
struct Turn {
    x: i32,
    y: i32,
}

/// First-line payload: the full history in long-running mode.
#[derive(Debug, Deserialize)]
struct Opening {
    requests: Vec<Turn>,
    #[serde(default)]
    responses: Vec<Turn>,
}

#[derive(Debug, Serialize)]
struct Coord {
    x: u8,
    y: u8,
}

#[derive(Debug, Serialize)]
struct DebugInfo {
    #[serde(rename = "_b")]
    black_score: i32,
    #[serde(rename = "_w")]
    white_score: i32,
    msg: String,
}

#[derive(Debug, Serialize)]
struct Reply {
    response: Coord,
    debug: DebugInfo,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let first = lines.next().context("no opening request")??;
    let opening: Opening = serde_json::from_str(&first).context("malformed opening request")?;
    let sentinel = *opening.requests.first().context("empty request list")?;

    let identity = if sentinel.x < 0 && sentinel.y < 0 {
        Stone::Black
    } else {
        Stone::White
    };
    let mut board = Board::new();
    let mut searcher = Searcher::with_config(identity, 0.0, 10, 990);

    // Replay any prior history, then answer the newest request.
    for (i, request) in opening.requests.iter().enumerate() {
        if i + 1 < opening.requests.len() {
            apply(&mut board, *request, identity.opponent())?;
            if let Some(own) = opening.responses.get(i) {
                apply(&mut board, *own, identity)?;
            }
        } else {
            respond(&mut board, &mut searcher, *request)?;
        }
    }

    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let request: Turn = serde_json::from_str(&line).context("malformed request")?;
        respond(&mut board, &mut searcher, request)?;
    }
    Ok(())
}

fn apply(board: &mut Board, turn: Turn, stone: Stone) -> anyhow::Result<()> {
    if turn.x < 0 || turn.y < 0 {
        return Ok(());
    }
    if turn.x >= BOARD_SIZE as i32 || turn.y >= BOARD_SIZE as i32 {
        anyhow::bail!("coordinates ({}, {}) are off the board", turn.x, turn.y);
    }
    let pos = Pos {
        row: turn.x as u8,
        col: turn.y as u8,
    };
    board.place_stone(pos, stone)?;
    Ok(())
}

fn respond(board: &mut Board, searcher: &mut Searcher, request: Turn) -> anyhow::Result<()> {
    apply(board, request, searcher.identity().opponent())?;
    let result = searcher.calculate(board)?;
    board.place_stone(result.pos, searcher.identity())?;
    debug!(cache_len = board.cache_len(), "position after reply:\n{board}");

    let reply = Reply {
        response: Coord {
            x: result.pos.row,
            y: result.pos.col,
        },
        debug: DebugInfo {
            black_score: board.score(Stone::Black),
            white_score: board.score(Stone::White),
            msg: result.summary(),
        },
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
    writeln!(stdout, "{KEEP_RUNNING}")?;
    stdout.flush()?;
    Ok(())
}
