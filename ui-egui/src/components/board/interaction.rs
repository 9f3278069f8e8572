// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board interaction handling

use chessboard_core::{BoardEvent, UiCoord};
use egui::{Context, Event, Rect, Sense, Ui};

use crate::ui_config::KeyBindings;

/// Turns pointer and keyboard input into board events
pub struct BoardInteraction {
    /// Cell size for interaction
    cell_size: f32,
    /// Key bindings for the board commands
    keys: KeyBindings,
    /// Current hover position
    hover_pos: Option<UiCoord>,
}

impl BoardInteraction {
    pub fn new(cell_size: f32, keys: KeyBindings) -> Self {
        Self {
            cell_size,
            keys,
            hover_pos: None,
        }
    }

    /// Handle clicks on the board area
    pub fn handle_pointer(&mut self, ui: &mut Ui, board_rect: Rect) -> Option<BoardEvent> {
        let response = ui.allocate_rect(board_rect, Sense::click());

        self.hover_pos = response
            .hover_pos()
            .and_then(|pos| super::pos_to_coord(pos, board_rect, self.cell_size));

        if !response.clicked() {
            return None;
        }
        let pos = response.interact_pointer_pos()?;
        super::pos_to_coord(pos, board_rect, self.cell_size).map(BoardEvent::Click)
    }

    /// Board commands for the keys pressed this frame, in press order
    pub fn key_events(&self, ctx: &Context) -> Vec<BoardEvent> {
        ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        ..
                    } => self.keys.event_for(*key),
                    _ => None,
                })
                .collect()
        })
    }

    /// Get current hover position
    pub fn hover_pos(&self) -> Option<UiCoord> {
        self.hover_pos
    }
}
