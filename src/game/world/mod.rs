pub mod camera;
pub mod game_object;

pub use camera::{Camera2D, SpriteGlobals};
pub use game_object::{Ball, GameObject};
