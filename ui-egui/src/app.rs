// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main application state and frame loop

use std::time::Duration;

use anyhow::Result;
use chessboard_core::{
    BoardEvent, InteractionController, InteractionState, PgnExporter, ShakmatyEngine,
};
use egui::{Context, CursorIcon, Pos2, Rect, Vec2, ViewportCommand};

use crate::components::{BoardInteraction, BoardRenderer, GameOverOverlay, MoveLogPanel, PromotionDialog};
use crate::ui_config::UiConfig;

/// Two-player chess board application
pub struct ChessApp {
    controller: InteractionController<ShakmatyEngine>,
    config: UiConfig,
    renderer: BoardRenderer,
    interaction: BoardInteraction,
    frame_interval: Duration,
}

impl ChessApp {
    /// Create the app with a PGN exporter built from the export settings
    pub fn new(config: UiConfig) -> Self {
        let exporter = PgnExporter::new(config.export.output_dir.clone())
            .with_players(config.export.white_name.clone(), config.export.black_name.clone());
        let controller = InteractionController::new(Box::new(exporter));
        Self::with_controller(controller, config)
    }

    /// Create the app around an existing controller
    pub fn with_controller(controller: InteractionController<ShakmatyEngine>, config: UiConfig) -> Self {
        let unknown = config.keys.unknown_keys();
        if !unknown.is_empty() {
            tracing::warn!(?unknown, "Unrecognised key names in configuration");
        }

        let fps = config.window.fps.max(1);
        Self {
            renderer: BoardRenderer::new(config.board.clone()),
            interaction: BoardInteraction::new(config.board.square_size, config.keys.clone()),
            frame_interval: Duration::from_millis(1000 / u64::from(fps)),
            controller,
            config,
        }
    }

    pub fn controller(&self) -> &InteractionController<ShakmatyEngine> {
        &self.controller
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Run one frame: route input into the controller, then paint the result
    pub fn ui(&mut self, ctx: &Context) -> Result<()> {
        let board_extent = self.config.board_extent();

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let area = ui.max_rect();
                let board_rect = Rect::from_min_size(area.min, Vec2::splat(board_extent));
                let log_rect = Rect::from_min_max(Pos2::new(board_rect.right(), area.top()), area.max);

                let mut events = self.interaction.key_events(ui.ctx());
                events.extend(self.interaction.handle_pointer(ui, board_rect));
                if self.awaiting_promotion() {
                    events.extend(
                        PromotionDialog::clicked(ui.ctx(), &self.config.promotion).map(BoardEvent::ChoosePromotion),
                    );
                }
                for event in events {
                    self.dispatch(event)?;
                }

                let view = self.controller.view();
                let painter = ui.painter();
                self.renderer.render(painter, board_rect, &view);
                MoveLogPanel::render(painter, log_rect, &view.log_lines, view.scroll_offset, &self.config.log_panel);

                if let Some(text) = &view.game_over_text {
                    GameOverOverlay::render(ui.ctx(), text, &self.config.overlay);
                }
                if view.promotion_pending.is_some() {
                    PromotionDialog::render(ui.ctx(), &self.config.promotion);
                } else if let Some(hovered) = self.interaction.hover_pos() {
                    if view.game_over_text.is_none() && view.piece(hovered).is_some() {
                        ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
                    }
                }
                Ok(())
            })
            .inner
    }

    fn awaiting_promotion(&self) -> bool {
        matches!(
            self.controller.state().interaction,
            InteractionState::AwaitingPromotionChoice { .. }
        )
    }

    fn dispatch(&mut self, event: BoardEvent) -> Result<()> {
        let outcome = self.controller.handle_event(event)?;
        tracing::trace!(?event, ?outcome, "Board event handled");
        Ok(())
    }
}

impl eframe::App for ChessApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if let Err(e) = self.ui(ctx) {
            tracing::error!("Fatal error, closing: {:#}", e);
            ctx.send_viewport_cmd(ViewportCommand::Close);
            return;
        }
        ctx.request_repaint_after(self.frame_interval);
    }
}
