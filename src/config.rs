//! Startup configuration: defaults, overridable from the environment.

use std::path::PathBuf;

use log::warn;

use crate::game::state::GameState;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub title: String,
    pub assets_dir: PathBuf,
    pub start_state: GameState,
    pub clear_color: wgpu::Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            title: "Breakout".to_string(),
            assets_dir: PathBuf::from("assets"),
            start_state: GameState::Active,
            clear_color: wgpu::Color::BLACK,
        }
    }
}

impl GameConfig {
    /// Reads `BREAKOUT_WIDTH`, `BREAKOUT_HEIGHT`, `BREAKOUT_ASSETS_DIR` and
    /// `BREAKOUT_START_IN_MENU` on top of the defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds a config from any variable lookup. Malformed values are logged
    /// and the default kept.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(width) = parse_dimension(&lookup, "BREAKOUT_WIDTH") {
            config.screen_width = width;
        }
        if let Some(height) = parse_dimension(&lookup, "BREAKOUT_HEIGHT") {
            config.screen_height = height;
        }
        if let Some(dir) = lookup("BREAKOUT_ASSETS_DIR").filter(|d| !d.trim().is_empty()) {
            config.assets_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup("BREAKOUT_START_IN_MENU") {
            match flag.trim() {
                "1" | "true" | "yes" => config.start_state = GameState::Menu,
                "0" | "false" | "no" | "" => {}
                other => warn!("Ignoring BREAKOUT_START_IN_MENU={:?}: expected a boolean", other),
            }
        }

        config
    }
}

fn parse_dimension(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u32> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            warn!("Ignoring {}={:?}: expected a positive integer", key, raw);
            None
        }
    }
}
