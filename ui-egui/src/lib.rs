// SPDX-License-Identifier: MIT OR Apache-2.0

//! egui front end for the two-player chess board

pub mod app;
pub mod components;
pub mod ui_config;

pub use app::ChessApp;
pub use ui_config::UiConfig;
