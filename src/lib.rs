//! Library entry point for the Breakout demo and its engine wrappers.

pub mod config;
pub mod engine;
pub mod game;

// Re-export main types for convenience
pub use config::GameConfig;
pub use game::{App, Game};
