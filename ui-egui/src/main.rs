// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main entry point for the chess board

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chessboard_ui_egui::ui_config::CONFIG_FILE_NAME;
use chessboard_ui_egui::{ChessApp, UiConfig};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};

static LOGGER_INIT: std::sync::Once = std::sync::Once::new();

// Rotating file log under ./logs
fn init_logging() -> Result<LoggerHandle> {
    let log_dir = PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let handle = Logger::try_with_str("info")?
        .log_to_file(
            FileSpec::default()
                .directory(&log_dir)
                .basename("chessboard")
                .suffix("log"),
        )
        .rotate(
            Criterion::Size(10 * 1024 * 1024),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(5),
        )
        .start()?;

    Ok(handle)
}

fn ensure_logging_initialized() -> Result<Option<LoggerHandle>> {
    let mut result = Ok(None);
    LOGGER_INIT.call_once(|| {
        result = init_logging().map(Some);
    });
    result
}

fn main() -> Result<()> {
    // Keep the handle alive so buffered lines are flushed on exit
    let _logger = match ensure_logging_initialized() {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {e:#}");
            None
        }
    };

    let config = UiConfig::load_or_default(Path::new(CONFIG_FILE_NAME));
    tracing::info!(output_dir = %config.export.output_dir.display(), "Starting chess board");

    let (width, height) = config.window.size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([width, height])
            .with_resizable(false),
        ..Default::default()
    };

    let title = config.window.title.clone();
    eframe::run_native(&title, options, Box::new(|_cc| Box::new(ChessApp::new(config))))
        .map_err(|e| anyhow::anyhow!("Failed to run the window: {e}"))?;

    tracing::info!("Chess board closed");
    Ok(())
}
