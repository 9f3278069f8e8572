//! Game-related UI components

mod move_log;
mod overlay;
mod promotion;

pub use move_log::MoveLogPanel;
pub use overlay::GameOverOverlay;
pub use promotion::PromotionDialog;
