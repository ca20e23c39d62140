use glam::{Vec2, Vec3};

use crate::engine::graphics::Sprite;

/// Anything drawn as a single sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    pub position: Vec2,
    pub size: Vec2,
    pub color: Vec3,
    pub rotation: f32,
    pub texture: String,
}

impl GameObject {
    pub fn new(texture: impl Into<String>, position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            color: Vec3::ONE,
            rotation: 0.0,
            texture: texture.into(),
        }
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::new(self.texture.clone(), self.position, self.size)
            .with_color(self.color)
            .with_rotation(self.rotation)
    }
}

/// The ball. It stays stuck to the paddle.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub object: GameObject,
    pub radius: f32,
}

impl Ball {
    pub fn new(texture: impl Into<String>, radius: f32) -> Self {
        Self {
            object: GameObject::new(texture, Vec2::ZERO, Vec2::splat(radius * 2.0)),
            radius,
        }
    }

    /// Places the ball centred on top of `paddle`.
    pub fn rest_on(&mut self, paddle: &GameObject) {
        self.object.position = Vec2::new(
            paddle.position.x + paddle.size.x / 2.0 - self.radius,
            paddle.position.y - self.radius * 2.0,
        );
    }
}
