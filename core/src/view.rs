// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snapshot of everything the renderer draws

use crate::engine::RulesEngine;
use crate::mapping::{to_engine, to_ui};
use crate::{Color, Piece, UiCoord, BOARD_DIMENSION};

const DIM: usize = BOARD_DIMENSION as usize;

/// Read-only picture of the board in screen coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// Pieces indexed by `[row][col]`
    pub squares: [[Option<Piece>; DIM]; DIM],
    /// Square currently selected
    pub selected: Option<UiCoord>,
    /// Destinations of legal moves starting on the selected square
    pub legal_targets: Vec<UiCoord>,
    /// Origin and destination of the last applied move
    pub last_move: Option<(UiCoord, UiCoord)>,
    /// Numbered move log lines
    pub log_lines: Vec<String>,
    /// First visible log line
    pub scroll_offset: usize,
    /// Color of the pawn awaiting a promotion choice
    pub promotion_pending: Option<Color>,
    /// Result text once the game has ended
    pub game_over_text: Option<String>,
    /// Board drawn from Black's side
    pub flipped: bool,
}

impl BoardView {
    /// Build a snapshot from the engine and the interaction state
    pub fn capture<E: RulesEngine>(
        engine: &E,
        selected: Option<UiCoord>,
        flipped: bool,
        scroll_offset: usize,
        promotion_pending: Option<Color>,
        game_over_text: Option<String>,
    ) -> Self {
        let mut squares = [[None; DIM]; DIM];
        for coord in UiCoord::all() {
            squares[coord.row as usize][coord.col as usize] =
                engine.piece_at(to_engine(coord, flipped));
        }

        Self {
            squares,
            selected,
            legal_targets: selected
                .map(|coord| legal_targets(engine, coord, flipped))
                .unwrap_or_default(),
            last_move: engine
                .history()
                .last()
                .map(|mv| (to_ui(mv.from, flipped), to_ui(mv.to, flipped))),
            log_lines: engine.move_log(),
            scroll_offset,
            promotion_pending,
            game_over_text,
            flipped,
        }
    }

    /// Piece shown at a screen coordinate
    pub fn piece(&self, coord: UiCoord) -> Option<Piece> {
        if !coord.is_valid() {
            return None;
        }
        self.squares[coord.row as usize][coord.col as usize]
    }
}

/// Screen squares reachable by a legal move from `origin`
///
/// The four promotion moves to one square produce a single target.
pub fn legal_targets<E: RulesEngine>(engine: &E, origin: UiCoord, flipped: bool) -> Vec<UiCoord> {
    let from = to_engine(origin, flipped);
    let mut targets: Vec<UiCoord> = Vec::new();
    for mv in engine.legal_moves().into_iter().filter(|mv| mv.from == from) {
        let target = to_ui(mv.to, flipped);
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    targets
}
