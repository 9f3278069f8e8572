// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chess board core - interaction and persistence logic
//!
//! This crate provides everything the board UI needs that does not touch pixels:
//! - The narrow rules-engine interface and its shakmaty-backed implementation
//! - Mapping between on-screen board coordinates and engine squares
//! - The click/key interaction state machine
//! - Move log formatting and PGN export

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod controller;
pub mod engine;
pub mod mapping;
pub mod movelog;
pub mod pgn;
pub mod view;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use controller::{BoardEvent, EventOutcome, GameOver, InteractionController, InteractionState, UiState};
pub use engine::{RulesEngine, ShakmatyEngine, TerminalCondition};
pub use pgn::{GameExporter, GameRecord, GameResult, PgnExporter};
pub use view::BoardView;

/// Number of ranks and files on the board
pub const BOARD_DIMENSION: u8 = 8;

/// Side in a chess game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// White moves first
    White,
    /// Black player
    Black,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The engine rank a pawn of this color promotes on
    pub fn promotion_rank(&self) -> u8 {
        match self {
            Color::White => BOARD_DIMENSION - 1,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Kind of chess piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Pieces a pawn may promote to, in the order the promotion dialog offers them
    pub const PROMOTION_CHOICES: [PieceKind; 4] =
        [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight];

    /// Whether a pawn may promote to this kind
    pub fn is_promotion_choice(&self) -> bool {
        Self::PROMOTION_CHOICES.contains(self)
    }

    /// Upper-case letter used on the board and in notation
    pub fn letter(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }
}

/// A piece of a given color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }
}

/// Square as shown on screen: row 0 is the top of the board, column 0 the left edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UiCoord {
    /// Row from the top (0-7)
    pub row: u8,
    /// Column from the left (0-7)
    pub col: u8,
}

impl UiCoord {
    /// Create a new coordinate
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check if the coordinate lies on the board
    pub fn is_valid(&self) -> bool {
        self.row < BOARD_DIMENSION && self.col < BOARD_DIMENSION
    }

    /// All 64 squares in row-major order
    pub fn all() -> impl Iterator<Item = UiCoord> {
        (0..BOARD_DIMENSION).flat_map(|row| (0..BOARD_DIMENSION).map(move |col| UiCoord::new(row, col)))
    }
}

/// Square in the rules engine's frame: file 0 is the a-file, rank 0 is White's back rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineSquare {
    pub file: u8,
    pub rank: u8,
}

impl EngineSquare {
    pub fn new(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// Build a square from its 0..64 index (a1 = 0, h8 = 63)
    pub fn from_index(index: u8) -> Result<Self, GameError> {
        if index >= BOARD_DIMENSION * BOARD_DIMENSION {
            return Err(GameError::InvalidSquare(index));
        }
        Ok(Self {
            file: index % BOARD_DIMENSION,
            rank: index / BOARD_DIMENSION,
        })
    }

    /// 0..64 index of the square (a1 = 0, h8 = 63)
    pub fn index(&self) -> u8 {
        self.rank * BOARD_DIMENSION + self.file
    }
}

impl fmt::Display for EngineSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

/// A move expressed as origin, destination and optional promotion piece
///
/// Castling is the king's two-square step, as it is clicked on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateMove {
    pub from: EngineSquare,
    pub to: EngineSquare,
    pub promotion: Option<PieceKind>,
}

impl CandidateMove {
    /// Create a plain (non-promoting) move
    pub fn new(from: EngineSquare, to: EngineSquare) -> Self {
        Self { from, to, promotion: None }
    }

    /// The same move with a promotion piece attached
    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }
}

impl fmt::Display for CandidateMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Errors reported by the rules engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move is not in the current legal move list
    #[error("Illegal move: {0}")]
    IllegalMove(CandidateMove),

    /// A square index outside the board
    #[error("Invalid square index {0}")]
    InvalidSquare(u8),

    /// Undo requested with an empty history
    #[error("No move to undo")]
    NothingToUndo,

    /// A promotion to a piece a pawn cannot become
    #[error("Cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
}
