// SPDX-License-Identifier: MIT OR Apache-2.0

//! Promotion piece picker

use chessboard_core::PieceKind;
use egui::{Align2, Color32, Context, Id, LayerId, Order, Pos2, Rect, Vec2};

use crate::ui_config::{font_id, PromotionConfig};

/// Four stacked options: queen, rook, bishop, knight
pub struct PromotionDialog;

impl PromotionDialog {
    /// Screen rects of the options, in `PieceKind::PROMOTION_CHOICES` order
    pub fn option_rects(config: &PromotionConfig) -> [(PieceKind, Rect); 4] {
        let (x, y) = config.origin;
        let size = Vec2::new(config.option_size.0, config.option_size.1);
        std::array::from_fn(|i| {
            let min = Pos2::new(x, y + i as f32 * config.spacing);
            (PieceKind::PROMOTION_CHOICES[i], Rect::from_min_size(min, size))
        })
    }

    /// Option under a pointer position
    pub fn choice_at(pos: Pos2, config: &PromotionConfig) -> Option<PieceKind> {
        Self::option_rects(config)
            .into_iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(kind, _)| kind)
    }

    /// Option clicked with the primary button this frame
    pub fn clicked(ctx: &Context, config: &PromotionConfig) -> Option<PieceKind> {
        let clicked_at = ctx.input(|input| {
            if input.pointer.primary_clicked() {
                input.pointer.interact_pos()
            } else {
                None
            }
        });
        clicked_at.and_then(|pos| Self::choice_at(pos, config))
    }

    /// Draw the options above everything else
    pub fn render(ctx: &Context, config: &PromotionConfig) {
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("promotion_dialog")));
        let background: Color32 = config.background_color.into();

        for (kind, rect) in Self::option_rects(config) {
            painter.rect_filled(rect, 0.0, background);
            painter.text(
                rect.left_center() + Vec2::new(10.0, 0.0),
                Align2::LEFT_CENTER,
                kind.name(),
                font_id(config.font_size),
                config.text_color.into(),
            );
        }
    }
}
