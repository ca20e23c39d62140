//! Player implementation.

use glam::Vec2;
use log::trace;

use crate::game::world::game_object::GameObject;

/// The paddle steered by the player.
pub struct Player {
    pub object: GameObject,
    pub movement_speed: f32,
}

impl Player {
    pub fn new(texture: impl Into<String>, position: Vec2, size: Vec2, movement_speed: f32) -> Self {
        Self {
            object: GameObject::new(texture, position, size),
            movement_speed,
        }
    }

    /// Moves horizontally by `direction * movement_speed * dt`, keeping the
    /// paddle inside `[0, bounds_width]`. Returns `true` if it moved.
    pub fn steer(&mut self, direction: f32, dt: f32, bounds_width: f32) -> bool {
        if direction == 0.0 {
            return false;
        }
        let max_x = (bounds_width - self.object.size.x).max(0.0);
        let before = self.object.position.x;
        self.object.position.x = (before + direction * self.movement_speed * dt).clamp(0.0, max_x);
        let moved = self.object.position.x != before;
        if moved {
            trace!("Paddle moved to x = {}", self.object.position.x);
        }
        moved
    }

    pub fn position(&self) -> Vec2 {
        self.object.position
    }
}
