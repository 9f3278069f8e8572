// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board rendering components

mod interaction;
mod renderer;

pub use interaction::BoardInteraction;
pub use renderer::BoardRenderer;

use chessboard_core::{UiCoord, BOARD_DIMENSION};
use egui::{Pos2, Rect, Vec2};

/// Screen rect of a board square
pub fn coord_to_rect(coord: UiCoord, board_rect: Rect, cell_size: f32) -> Rect {
    let min = Pos2::new(
        board_rect.min.x + f32::from(coord.col) * cell_size,
        board_rect.min.y + f32::from(coord.row) * cell_size,
    );
    Rect::from_min_size(min, Vec2::splat(cell_size))
}

/// Convert screen position to board coordinate
///
/// Positions outside the board, such as the move log panel, give `None`.
pub fn pos_to_coord(pos: Pos2, board_rect: Rect, cell_size: f32) -> Option<UiCoord> {
    if !board_rect.contains(pos) || cell_size <= 0.0 {
        return None;
    }

    let rel_pos = pos - board_rect.min;
    let col = (rel_pos.x / cell_size).floor();
    let row = (rel_pos.y / cell_size).floor();
    let limit = f32::from(BOARD_DIMENSION);

    if (0.0..limit).contains(&col) && (0.0..limit).contains(&row) {
        Some(UiCoord::new(row as u8, col as u8))
    } else {
        None
    }
}
