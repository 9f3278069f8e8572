// SPDX-License-Identifier: MIT OR Apache-2.0

//! UI configuration for the chess board
//!
//! Everything visual or user-tunable lives here: window and board geometry,
//! colors, the move log panel, overlays, key bindings and where finished
//! games are exported. The whole struct round-trips through JSON.

use anyhow::{Context, Result};
use chessboard_core::BoardEvent;
use egui::{Color32, FontFamily, FontId, Key};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "chessboard.json";

/// Complete UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub window: WindowConfig,
    pub board: BoardConfig,
    pub log_panel: LogPanelConfig,
    pub overlay: OverlayConfig,
    pub promotion: PromotionConfig,
    pub export: ExportConfig,
    pub keys: KeyBindings,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window size (width, height)
    pub size: (f32, f32),
    /// Frames per second the board is redrawn at while idle
    pub fps: u32,
}

/// Board visual configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Edge length of one square in pixels
    pub square_size: f32,
    /// Squares where row + column is even
    pub light_square: SerializableColor,
    /// Squares where row + column is odd
    pub dark_square: SerializableColor,
    /// Tint over the selected square
    pub selection_color: SerializableColor,
    /// Dot drawn on legal destinations
    pub marker_color: SerializableColor,
    /// Marker radius as a fraction of the square size
    pub marker_radius_ratio: f32,
    /// Tint over the last move's squares
    pub last_move_color: SerializableColor,
    /// Piece disc radius as a fraction of the square size
    pub piece_radius_ratio: f32,
    pub white_piece_color: SerializableColor,
    pub black_piece_color: SerializableColor,
    pub piece_outline_color: SerializableColor,
    pub piece_outline_width: f32,
    /// Letter size as a fraction of the square size
    pub piece_font_ratio: f32,
}

/// Move log panel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogPanelConfig {
    pub background_color: SerializableColor,
    pub text_color: SerializableColor,
    pub font_size: f32,
    /// Height of one log line; scrolling moves by this much
    pub line_height: f32,
    pub padding: f32,
}

/// Game-over overlay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    pub background_color: SerializableColor,
    pub text_color: SerializableColor,
    pub font_size: f32,
}

/// Promotion dialog layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionConfig {
    /// Top-left corner of the first option
    pub origin: (f32, f32),
    /// Size of each option
    pub option_size: (f32, f32),
    /// Vertical distance between option tops
    pub spacing: f32,
    pub background_color: SerializableColor,
    pub text_color: SerializableColor,
    pub font_size: f32,
}

/// Where and how finished games are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory for `gameN.pgn` files
    pub output_dir: PathBuf,
    pub white_name: String,
    pub black_name: String,
}

/// Key names as understood by `egui::Key::from_name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub undo: String,
    pub reset: String,
    pub scroll_up: String,
    pub scroll_down: String,
    pub flip: String,
}

impl KeyBindings {
    /// Board command bound to a key
    pub fn event_for(&self, key: Key) -> Option<BoardEvent> {
        let bindings = [
            (&self.undo, BoardEvent::Undo),
            (&self.reset, BoardEvent::Reset),
            (&self.scroll_up, BoardEvent::ScrollUp),
            (&self.scroll_down, BoardEvent::ScrollDown),
            (&self.flip, BoardEvent::Flip),
        ];
        bindings
            .into_iter()
            .find(|(name, _)| Key::from_name(name) == Some(key))
            .map(|(_, event)| event)
    }

    /// Names that do not correspond to any key
    pub fn unknown_keys(&self) -> Vec<&str> {
        [&self.undo, &self.reset, &self.scroll_up, &self.scroll_down, &self.flip]
            .into_iter()
            .filter(|name| Key::from_name(name).is_none())
            .map(String::as_str)
            .collect()
    }
}

/// Serializable color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

impl From<Color32> for SerializableColor {
    fn from(color: Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        Self { r, g, b, a }
    }
}

impl From<SerializableColor> for Color32 {
    fn from(color: SerializableColor) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Chess".to_string(),
            size: (700.0, 500.0),
            fps: 30,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            square_size: 62.0, // 500 / 8, rounded down
            light_square: SerializableColor::rgb(255, 255, 255),
            dark_square: SerializableColor::rgb(135, 206, 250), // light sky blue
            selection_color: SerializableColor::rgba(255, 0, 0, 100),
            marker_color: SerializableColor::rgba(255, 0, 0, 200),
            marker_radius_ratio: 0.125,
            last_move_color: SerializableColor::rgba(255, 215, 0, 70),
            piece_radius_ratio: 0.38,
            white_piece_color: SerializableColor::rgb(250, 250, 250),
            black_piece_color: SerializableColor::rgb(30, 30, 30),
            piece_outline_color: SerializableColor::rgb(60, 60, 60),
            piece_outline_width: 1.5,
            piece_font_ratio: 0.4,
        }
    }
}

impl Default for LogPanelConfig {
    fn default() -> Self {
        Self {
            background_color: SerializableColor::rgb(211, 211, 211), // light gray
            text_color: SerializableColor::rgb(0, 0, 0),
            font_size: 16.0,
            line_height: 20.0,
            padding: 5.0,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            background_color: SerializableColor::rgba(0, 0, 0, 180),
            text_color: SerializableColor::rgb(255, 255, 255),
            font_size: 30.0,
        }
    }
}

impl Default for PromotionConfig {
    fn default() -> Self {
        Self {
            origin: (150.0, 100.0),
            option_size: (300.0, 50.0),
            spacing: 60.0,
            background_color: SerializableColor::rgb(0, 0, 0),
            text_color: SerializableColor::rgb(255, 255, 255),
            font_size: 24.0,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("games"),
            white_name: "Player1".to_string(),
            black_name: "Player2".to_string(),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            undo: "ArrowLeft".to_string(),
            reset: "R".to_string(),
            scroll_up: "ArrowUp".to_string(),
            scroll_down: "ArrowDown".to_string(),
            flip: "F".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            board: BoardConfig::default(),
            log_panel: LogPanelConfig::default(),
            overlay: OverlayConfig::default(),
            promotion: PromotionConfig::default(),
            export: ExportConfig::default(),
            keys: KeyBindings::default(),
        }
    }
}

impl UiConfig {
    /// Load config from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Save config to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {:?}", path))?;
        Ok(())
    }

    /// Load config from `path` if it exists, falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => {
                tracing::info!("Loaded UI config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring config: {:#}", e);
                Self::default()
            }
        }
    }

    /// Edge length of the whole board in pixels
    pub fn board_extent(&self) -> f32 {
        self.board.square_size * f32::from(chessboard_core::BOARD_DIMENSION)
    }
}

/// Proportional font of the given size
pub fn font_id(size: f32) -> FontId {
    FontId::new(size, FontFamily::Proportional)
}
