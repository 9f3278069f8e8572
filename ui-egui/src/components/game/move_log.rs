// SPDX-License-Identifier: MIT OR Apache-2.0

//! Side panel listing the moves played

use chessboard_core::movelog::visible_lines;
use egui::{Align2, Color32, Painter, Pos2, Rect};

use crate::ui_config::{font_id, LogPanelConfig};

/// Move log panel component
pub struct MoveLogPanel;

impl MoveLogPanel {
    /// Number of whole lines that fit in the panel
    pub fn capacity(rect: Rect, config: &LogPanelConfig) -> usize {
        if config.line_height <= 0.0 {
            return 0;
        }
        (rect.height() / config.line_height).floor().max(0.0) as usize
    }

    /// Render the log, scrolled down by `scroll_offset` lines
    pub fn render(painter: &Painter, rect: Rect, lines: &[String], scroll_offset: usize, config: &LogPanelConfig) {
        painter.rect_filled(rect, 0.0, Color32::from(config.background_color));

        let visible = visible_lines(lines, scroll_offset, Self::capacity(rect, config));
        for (i, line) in visible.iter().enumerate() {
            let pos = Pos2::new(
                rect.min.x + config.padding,
                rect.min.y + config.padding + i as f32 * config.line_height,
            );
            painter.text(
                pos,
                Align2::LEFT_TOP,
                line,
                font_id(config.font_size),
                config.text_color.into(),
            );
        }
    }
}
