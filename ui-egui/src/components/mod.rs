//! UI components organized by feature

pub mod board;
pub mod game;

// Re-export commonly used components
pub use board::{BoardInteraction, BoardRenderer};
pub use game::{GameOverOverlay, MoveLogPanel, PromotionDialog};
