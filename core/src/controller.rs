// SPDX-License-Identifier: MIT OR Apache-2.0

//! Click and key interaction state machine
//!
//! Board clicks go through three states:
//! - `Idle`: nothing selected. Clicking a piece of the side to move selects it.
//! - `PieceSelected`: a second click on another square submits a move. Clicking
//!   the same square deselects, and clicking another own piece moves the selection.
//! - `AwaitingPromotionChoice`: a pawn reached its last rank. Only the promotion
//!   choice is accepted until one is made.
//!
//! Illegal moves are dropped without any error reaching the player.

use anyhow::Result;
use std::path::PathBuf;

use crate::engine::{RulesEngine, TerminalCondition};
use crate::mapping::to_engine;
use crate::pgn::GameExporter;
use crate::view::BoardView;
use crate::{CandidateMove, Color, PieceKind, UiCoord};

/// Input delivered to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// Primary click on a board square
    Click(UiCoord),
    /// Piece picked in the promotion dialog
    ChoosePromotion(PieceKind),
    /// Take back one ply
    Undo,
    /// Start a new game
    Reset,
    /// Scroll the move log one line up
    ScrollUp,
    /// Scroll the move log one line down
    ScrollDown,
    /// Turn the board around
    Flip,
}

/// Where the click sequence currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    PieceSelected {
        square: UiCoord,
    },
    AwaitingPromotionChoice {
        /// The pawn move, without a promotion piece
        mv: CandidateMove,
        /// Color of the promoting pawn
        color: Color,
    },
}

/// Set once the game reaches a terminal position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOver {
    pub condition: TerminalCondition,
    /// Text shown on the overlay
    pub text: String,
    /// File the game was exported to
    pub exported_to: Option<PathBuf>,
}

/// All mutable UI state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub interaction: InteractionState,
    /// Clicks of the move being entered; never more than two
    pending_clicks: Vec<UiCoord>,
    /// Board drawn from Black's side
    pub flipped: bool,
    /// First visible move log line
    pub scroll_offset: usize,
    pub game_over: Option<GameOver>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            interaction: InteractionState::Idle,
            pending_clicks: Vec::with_capacity(2),
            flipped: false,
            scroll_offset: 0,
            game_over: None,
        }
    }

    /// Currently selected square
    pub fn selected(&self) -> Option<UiCoord> {
        match self.interaction {
            InteractionState::PieceSelected { square } => Some(square),
            _ => None,
        }
    }

    /// Clicks recorded for the move in progress
    pub fn pending_clicks(&self) -> &[UiCoord] {
        &self.pending_clicks
    }

    fn clear_selection(&mut self) {
        self.interaction = InteractionState::Idle;
        self.pending_clicks.clear();
    }

    fn select(&mut self, square: UiCoord) {
        self.interaction = InteractionState::PieceSelected { square };
        self.pending_clicks.clear();
        self.pending_clicks.push(square);
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// What handling an event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Nothing changed
    Ignored,
    Selected(UiCoord),
    Deselected,
    MoveApplied(CandidateMove),
    /// The two clicks did not form a legal move
    MoveRejected,
    /// Waiting for the player to pick a promotion piece
    PromotionPending(CandidateMove),
    /// A move was applied and ended the game
    GameOver(TerminalCondition),
    /// One ply taken back, or `None` when there was nothing to undo
    Undone(Option<CandidateMove>),
    Reset,
    Scrolled(usize),
    Flipped(bool),
}

/// Turns board events into rules engine commands
pub struct InteractionController<E: RulesEngine> {
    engine: E,
    state: UiState,
    exporter: Box<dyn GameExporter>,
}

impl<E: RulesEngine + Default> InteractionController<E> {
    /// Create a controller for a new game
    pub fn new(exporter: Box<dyn GameExporter>) -> Self {
        Self::with_engine(E::default(), exporter)
    }

    /// Create a controller around an existing engine
    pub fn with_engine(engine: E, exporter: Box<dyn GameExporter>) -> Self {
        Self {
            engine,
            state: UiState::new(),
            exporter,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Snapshot for the renderer
    pub fn view(&self) -> BoardView {
        let promotion_pending = match self.state.interaction {
            InteractionState::AwaitingPromotionChoice { color, .. } => Some(color),
            _ => None,
        };
        BoardView::capture(
            &self.engine,
            self.state.selected(),
            self.state.flipped,
            self.state.scroll_offset,
            promotion_pending,
            self.state.game_over.as_ref().map(|over| over.text.clone()),
        )
    }

    /// Handle one input event
    ///
    /// Only a failed PGN export is reported as an error.
    pub fn handle_event(&mut self, event: BoardEvent) -> Result<EventOutcome> {
        if let InteractionState::AwaitingPromotionChoice { mv, .. } = self.state.interaction {
            return match event {
                BoardEvent::ChoosePromotion(kind) => self.choose_promotion(mv, kind),
                _ => Ok(EventOutcome::Ignored),
            };
        }

        let outcome = match event {
            BoardEvent::Click(coord) => self.click(coord)?,
            BoardEvent::ChoosePromotion(_) => EventOutcome::Ignored,
            BoardEvent::Undo => self.undo(),
            BoardEvent::Reset => self.reset(),
            BoardEvent::ScrollUp => {
                self.state.scroll_offset = self.state.scroll_offset.saturating_sub(1);
                EventOutcome::Scrolled(self.state.scroll_offset)
            }
            BoardEvent::ScrollDown => {
                self.state.scroll_offset += 1;
                EventOutcome::Scrolled(self.state.scroll_offset)
            }
            BoardEvent::Flip => {
                self.state.flipped = !self.state.flipped;
                self.state.clear_selection();
                tracing::info!("Board flipped (flipped = {})", self.state.flipped);
                EventOutcome::Flipped(self.state.flipped)
            }
        };

        Ok(outcome)
    }

    fn click(&mut self, coord: UiCoord) -> Result<EventOutcome> {
        if self.state.game_over.is_some() || !coord.is_valid() {
            return Ok(EventOutcome::Ignored);
        }

        let side = self.engine.side_to_move();
        let own_piece = self
            .engine
            .piece_at(to_engine(coord, self.state.flipped))
            .map_or(false, |piece| piece.color == side);

        match self.state.interaction {
            InteractionState::PieceSelected { square } if square == coord => {
                self.state.clear_selection();
                Ok(EventOutcome::Deselected)
            }
            _ if own_piece => {
                self.state.select(coord);
                Ok(EventOutcome::Selected(coord))
            }
            InteractionState::PieceSelected { .. } => {
                self.state.pending_clicks.push(coord);
                self.attempt_move()
            }
            _ => {
                self.state.clear_selection();
                Ok(EventOutcome::Ignored)
            }
        }
    }

    /// Submit the move formed by the two pending clicks
    fn attempt_move(&mut self) -> Result<EventOutcome> {
        let flipped = self.state.flipped;
        let clicks = std::mem::take(&mut self.state.pending_clicks);
        self.state.clear_selection();

        let (from, to) = match clicks.as_slice() {
            [from, to] => (to_engine(*from, flipped), to_engine(*to, flipped)),
            _ => return Ok(EventOutcome::Ignored),
        };
        let mv = CandidateMove::new(from, to);

        match self.engine.submit(mv) {
            Ok(()) => self.after_move(mv),
            Err(err) => {
                if let Some(color) = self.promotion_color(mv) {
                    tracing::debug!("Awaiting promotion choice for {}", mv);
                    self.state.interaction = InteractionState::AwaitingPromotionChoice { mv, color };
                    return Ok(EventOutcome::PromotionPending(mv));
                }
                tracing::debug!("Ignoring move attempt: {}", err);
                Ok(EventOutcome::MoveRejected)
            }
        }
    }

    /// Color of the pawn if `mv` is a promotion that only lacks its piece
    fn promotion_color(&self, mv: CandidateMove) -> Option<Color> {
        let piece = self.engine.piece_at(mv.from)?;
        let is_promotion = piece.kind == PieceKind::Pawn
            && piece.color == self.engine.side_to_move()
            && mv.to.rank == piece.color.promotion_rank()
            && self.engine.is_legal(mv.with_promotion(PieceKind::Queen));
        is_promotion.then_some(piece.color)
    }

    fn choose_promotion(&mut self, mv: CandidateMove, kind: PieceKind) -> Result<EventOutcome> {
        if !kind.is_promotion_choice() {
            return Ok(EventOutcome::Ignored);
        }
        self.state.clear_selection();

        let promotion = mv.with_promotion(kind);
        match self.engine.submit(promotion) {
            Ok(()) => self.after_move(promotion),
            Err(err) => {
                tracing::debug!("Promotion rejected: {}", err);
                Ok(EventOutcome::MoveRejected)
            }
        }
    }

    /// Check for the end of the game after a move was applied
    fn after_move(&mut self, mv: CandidateMove) -> Result<EventOutcome> {
        tracing::info!(
            "Move {} applied ({})",
            self.engine.san_history().last().map(String::as_str).unwrap_or("?"),
            mv
        );

        let Some(condition) = self.engine.terminal_condition() else {
            return Ok(EventOutcome::MoveApplied(mv));
        };

        let text = condition.description();
        tracing::info!("Game over: {}", text);
        self.state.game_over = Some(GameOver {
            condition,
            text,
            exported_to: None,
        });

        let path = self.exporter.export(&self.engine.game_record())?;
        if let Some(over) = self.state.game_over.as_mut() {
            over.exported_to = Some(path);
        }

        Ok(EventOutcome::GameOver(condition))
    }

    fn undo(&mut self) -> EventOutcome {
        self.state.clear_selection();
        self.state.game_over = None;
        match self.engine.undo() {
            Ok(mv) => {
                tracing::info!("Took back {}", mv);
                EventOutcome::Undone(Some(mv))
            }
            Err(err) => {
                tracing::debug!("Undo ignored: {}", err);
                EventOutcome::Undone(None)
            }
        }
    }

    fn reset(&mut self) -> EventOutcome {
        self.engine = E::default();
        self.state.clear_selection();
        self.state.game_over = None;
        self.state.scroll_offset = 0;
        tracing::info!("New game started");
        EventOutcome::Reset
    }
}
