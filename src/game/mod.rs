//! Game-specific logic and features.

pub mod app;
pub mod breakout;
pub mod player;
pub mod state;
pub mod world;

// Re-export commonly used types
pub use app::App;
pub use breakout::Game;
pub use state::{FrameTimer, GameState};
