// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game-over overlay

use egui::{Align2, Color32, Context, Id, LayerId, Order};

use crate::ui_config::{font_id, OverlayConfig};

/// Dims the whole window and shows the result in the middle
pub struct GameOverOverlay;

impl GameOverOverlay {
    pub fn render(ctx: &Context, text: &str, config: &OverlayConfig) {
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("game_over_overlay")));
        let screen = ctx.screen_rect();

        painter.rect_filled(screen, 0.0, Color32::from(config.background_color));
        painter.text(
            screen.center(),
            Align2::CENTER_CENTER,
            text,
            font_id(config.font_size),
            config.text_color.into(),
        );
    }
}
