// SPDX-License-Identifier: MIT OR Apache-2.0

//! PGN export of finished games

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::movelog::MoveOrigin;

/// Movetext lines are wrapped to this width
const PGN_LINE_WIDTH: usize = 80;

/// Game result as written in the `Result` tag and after the movetext
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    /// Game still in progress (or abandoned)
    Ongoing,
}

impl GameResult {
    /// PGN result token
    pub fn as_pgn(&self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Ongoing => "*",
        }
    }
}

/// Moves and result of a game, as produced by the rules engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Moves in standard algebraic notation, oldest first
    pub san_moves: Vec<String>,
    /// Outcome of the game
    pub result: GameResult,
    /// Starting position when it is not the standard one
    pub start_fen: Option<String>,
}

/// Seven Tag Roster values other than the result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PgnHeaders {
    pub event: String,
    pub site: String,
    /// `None` is written as `????.??.??`
    pub date: Option<NaiveDate>,
    pub round: String,
    pub white: String,
    pub black: String,
}

impl Default for PgnHeaders {
    fn default() -> Self {
        Self {
            event: "?".to_string(),
            site: "?".to_string(),
            date: None,
            round: "?".to_string(),
            white: "Player1".to_string(),
            black: "Player2".to_string(),
        }
    }
}

/// Render a game as PGN text
pub fn render_pgn(record: &GameRecord, headers: &PgnHeaders) -> String {
    let date = headers
        .date
        .map(|d| d.format("%Y.%m.%d").to_string())
        .unwrap_or_else(|| "????.??.??".to_string());

    let mut out = String::new();
    push_tag(&mut out, "Event", &headers.event);
    push_tag(&mut out, "Site", &headers.site);
    push_tag(&mut out, "Date", &date);
    push_tag(&mut out, "Round", &headers.round);
    push_tag(&mut out, "White", &headers.white);
    push_tag(&mut out, "Black", &headers.black);
    push_tag(&mut out, "Result", record.result.as_pgn());
    if let Some(fen) = &record.start_fen {
        push_tag(&mut out, "SetUp", "1");
        push_tag(&mut out, "FEN", fen);
    }
    out.push('\n');

    let mut line = String::new();
    for token in movetext_tokens(record) {
        if !line.is_empty() && line.len() + 1 + token.len() > PGN_LINE_WIDTH {
            out.push_str(&line);
            out.push('\n');
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&token);
    }
    out.push_str(&line);
    out.push('\n');
    out
}

fn push_tag(out: &mut String, name: &str, value: &str) {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    out.push_str(&format!("[{} \"{}\"]\n", name, escaped));
}

/// Move numbers, SAN moves and the closing result token
fn movetext_tokens(record: &GameRecord) -> Vec<String> {
    let origin = record
        .start_fen
        .as_deref()
        .map(MoveOrigin::from_fen)
        .unwrap_or_default();
    let mut number = origin.number;
    let black_first = origin.black_first;

    let mut tokens = Vec::with_capacity(record.san_moves.len() * 3 / 2 + 1);
    let mut white_to_move = !black_first;
    for (i, san) in record.san_moves.iter().enumerate() {
        if white_to_move {
            tokens.push(format!("{}.", number));
        } else if i == 0 {
            tokens.push(format!("{}...", number));
        }
        tokens.push(san.clone());
        if !white_to_move {
            number += 1;
        }
        white_to_move = !white_to_move;
    }
    tokens.push(record.result.as_pgn().to_string());
    tokens
}

/// First `game{n}.pgn` in `dir` that does not exist yet, counting from 1
///
/// Gaps left by deleted files are reused.
pub fn next_game_path(dir: &Path) -> PathBuf {
    (1u32..)
        .map(|n| dir.join(format!("game{}.pgn", n)))
        .find(|path| !path.exists())
        .unwrap_or_else(|| dir.join("game.pgn"))
}

/// Destination for finished games
pub trait GameExporter {
    /// Persist a finished game, returning where it went
    fn export(&mut self, record: &GameRecord) -> Result<PathBuf>;
}

/// Writes each finished game to its own numbered PGN file
#[derive(Debug, Clone)]
pub struct PgnExporter {
    /// Directory holding the exported games
    output_dir: PathBuf,
    /// Static header values
    headers: PgnHeaders,
    /// Stamp the `Date` tag with today's date
    stamp_date: bool,
}

impl PgnExporter {
    /// Create an exporter writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            headers: PgnHeaders::default(),
            stamp_date: true,
        }
    }

    /// Set the player names written to the `White` and `Black` tags
    pub fn with_players(mut self, white: impl Into<String>, black: impl Into<String>) -> Self {
        self.headers.white = white.into();
        self.headers.black = black.into();
        self
    }

    /// Leave the `Date` tag unknown instead of using today's date
    pub fn without_date(mut self) -> Self {
        self.stamp_date = false;
        self
    }

    /// Directory the exporter writes to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl GameExporter for PgnExporter {
    fn export(&mut self, record: &GameRecord) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create game directory {:?}", self.output_dir)
        })?;

        let mut headers = self.headers.clone();
        if self.stamp_date {
            headers.date = Some(chrono::Local::now().date_naive());
        }
        let text = render_pgn(record, &headers);

        let file_path = next_game_path(&self.output_dir);
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Write to a temporary file, then rename into place
        let tmp_path = self.output_dir.join(format!(".tmp_{}", file_name));
        {
            let mut file = std::fs::File::create(&tmp_path)
                .context("Failed to create temporary file")?;
            file.write_all(text.as_bytes())
                .context("Failed to write PGN data")?;
            file.flush().context("Failed to flush file buffer")?;
        }
        std::fs::rename(&tmp_path, &file_path).context("Failed to rename temporary file")?;

        tracing::info!(
            "Game exported to {:?} ({} moves, result {})",
            file_path,
            record.san_moves.len(),
            record.result.as_pgn()
        );

        Ok(file_path)
    }
}
