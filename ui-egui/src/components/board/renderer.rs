// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board rendering logic

use chessboard_core::{BoardView, Color, Piece, UiCoord};
use egui::{Align2, Color32, Painter, Rect, Stroke};

use super::coord_to_rect;
use crate::ui_config::{font_id, BoardConfig};

/// Draws squares, highlights, pieces and legal-move markers
pub struct BoardRenderer {
    config: BoardConfig,
}

impl BoardRenderer {
    pub fn new(config: BoardConfig) -> Self {
        Self { config }
    }

    /// Cell size in pixels
    pub fn cell_size(&self) -> f32 {
        self.config.square_size
    }

    /// Render the board
    pub fn render(&self, painter: &Painter, board_rect: Rect, view: &BoardView) {
        self.render_squares(painter, board_rect);

        if let Some((from, to)) = view.last_move {
            let tint: Color32 = self.config.last_move_color.into();
            for coord in [from, to] {
                painter.rect_filled(self.square(coord, board_rect), 0.0, tint);
            }
        }

        if let Some(selected) = view.selected {
            painter.rect_filled(
                self.square(selected, board_rect),
                0.0,
                Color32::from(self.config.selection_color),
            );
        }

        for coord in UiCoord::all() {
            if let Some(piece) = view.piece(coord) {
                self.render_piece(painter, self.square(coord, board_rect), piece);
            }
        }

        self.render_markers(painter, board_rect, &view.legal_targets);
    }

    /// Two-color checkerboard keyed on (row + col) parity
    fn render_squares(&self, painter: &Painter, board_rect: Rect) {
        let light: Color32 = self.config.light_square.into();
        let dark: Color32 = self.config.dark_square.into();

        for coord in UiCoord::all() {
            let color = if (coord.row + coord.col) % 2 == 0 { light } else { dark };
            painter.rect_filled(self.square(coord, board_rect), 0.0, color);
        }
    }

    /// Piece drawn as a disc with its letter
    fn render_piece(&self, painter: &Painter, rect: Rect, piece: Piece) {
        let cell = self.config.square_size;
        let (fill, text): (Color32, Color32) = match piece.color {
            Color::White => (self.config.white_piece_color.into(), self.config.black_piece_color.into()),
            Color::Black => (self.config.black_piece_color.into(), self.config.white_piece_color.into()),
        };
        let radius = cell * self.config.piece_radius_ratio;

        painter.circle_filled(rect.center(), radius, fill);
        painter.circle_stroke(
            rect.center(),
            radius,
            Stroke::new(self.config.piece_outline_width, Color32::from(self.config.piece_outline_color)),
        );
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            piece.kind.letter(),
            font_id(cell * self.config.piece_font_ratio),
            text,
        );
    }

    /// Dots on every square the selected piece may move to
    fn render_markers(&self, painter: &Painter, board_rect: Rect, targets: &[UiCoord]) {
        let radius = self.config.square_size * self.config.marker_radius_ratio;
        let color: Color32 = self.config.marker_color.into();
        for target in targets {
            painter.circle_filled(self.square(*target, board_rect).center(), radius, color);
        }
    }

    fn square(&self, coord: UiCoord, board_rect: Rect) -> Rect {
        coord_to_rect(coord, board_rect, self.config.square_size)
    }
}
