//! Game state management implementation.

use std::time::{Duration, Instant};

use log::debug;

/// Discrete state of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Active,
    Menu,
}

/// Measures variable delta time between frames and counts frames per second.
pub struct FrameTimer {
    last_frame: Option<Instant>,
    last_fps_print: Option<Instant>,
    frame_count: u32,
    last_fps: u32,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last_frame: None,
            last_fps_print: None,
            frame_count: 0,
            last_fps: 0,
        }
    }

    /// Seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Like [`FrameTimer::tick`] with an explicit clock reading. The first
    /// tick returns `0.0`.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        self.update_fps(now);
        delta
    }

    fn update_fps(&mut self, now: Instant) {
        self.frame_count += 1;
        let since = *self.last_fps_print.get_or_insert(now);
        if now.saturating_duration_since(since) >= Duration::from_secs(1) {
            self.last_fps = self.frame_count;
            self.frame_count = 0;
            self.last_fps_print = Some(now);
            debug!("FPS: {}", self.last_fps);
        }
    }

    pub fn fps(&self) -> u32 {
        self.last_fps
    }
}
