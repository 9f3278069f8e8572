// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rules engine interface
//!
//! The interaction and rendering code only sees this trait. Legality, game-end
//! detection and notation all come from the implementation behind it.

mod shakmaty_engine;

pub use shakmaty_engine::ShakmatyEngine;

use crate::movelog::{self, MoveOrigin};
use crate::pgn::{GameRecord, GameResult};
use crate::{CandidateMove, Color, EngineSquare, GameError, Piece};

/// Narrow view of a chess rules engine
pub trait RulesEngine {
    /// Piece occupying a square, if any
    fn piece_at(&self, square: EngineSquare) -> Option<Piece>;

    /// Side whose turn it is
    fn side_to_move(&self) -> Color;

    /// All moves legal in the current position
    fn legal_moves(&self) -> Vec<CandidateMove>;

    /// Apply a move if it is in the legal move list
    fn submit(&mut self, mv: CandidateMove) -> Result<(), GameError>;

    /// Take back the last applied move
    fn undo(&mut self) -> Result<CandidateMove, GameError>;

    /// Why the game is over, or `None` while it continues
    fn terminal_condition(&self) -> Option<TerminalCondition>;

    /// Applied moves, oldest first
    fn history(&self) -> &[CandidateMove];

    /// Applied moves in standard algebraic notation, oldest first
    fn san_history(&self) -> &[String];

    /// Starting position in FEN when it is not the standard one
    fn start_fen(&self) -> Option<&str> {
        None
    }

    /// Whether `mv` is currently legal
    fn is_legal(&self, mv: CandidateMove) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// Numbering of the first move, taken from the starting FEN
    fn move_origin(&self) -> MoveOrigin {
        self.start_fen().map(MoveOrigin::from_fen).unwrap_or_default()
    }

    /// Move history as numbered lines, one full move per line
    fn move_log(&self) -> Vec<String> {
        movelog::paired_lines(self.san_history(), self.move_origin())
    }

    /// Result token for the current state
    fn result(&self) -> GameResult {
        self.terminal_condition()
            .map(|condition| condition.result())
            .unwrap_or(GameResult::Ongoing)
    }

    /// Everything needed to write the game out
    fn game_record(&self) -> GameRecord {
        GameRecord {
            san_moves: self.san_history().to_vec(),
            result: self.result(),
            start_fen: self.start_fen().map(str::to_string),
        }
    }
}

/// Reason a game has ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalCondition {
    /// The side to move is mated
    Checkmate {
        /// The side that delivered mate
        winner: Color,
    },
    /// The side to move has no legal move and is not in check
    Stalemate,
    /// Neither side can possibly mate
    InsufficientMaterial,
    /// 75 moves by each side without a capture or pawn move
    SeventyFiveMoves,
    /// The same position has occurred five times
    FivefoldRepetition,
}

impl TerminalCondition {
    /// Result token for this outcome
    pub fn result(&self) -> GameResult {
        match self {
            TerminalCondition::Checkmate { winner: Color::White } => GameResult::WhiteWins,
            TerminalCondition::Checkmate { winner: Color::Black } => GameResult::BlackWins,
            _ => GameResult::Draw,
        }
    }

    /// Text shown on the game-over overlay
    pub fn description(&self) -> String {
        match self {
            TerminalCondition::Checkmate { winner } => format!("{} wins, Checkmate!", winner),
            TerminalCondition::Stalemate => "Draw by stalemate!".to_string(),
            TerminalCondition::InsufficientMaterial => "Draw by insufficient material!".to_string(),
            TerminalCondition::SeventyFiveMoves => "Draw by the 75-move rule!".to_string(),
            TerminalCondition::FivefoldRepetition => "Draw by fivefold repetition!".to_string(),
        }
    }
}
