//! Engine module containing graphics, input, resources, and window management.

pub mod error;
pub mod graphics;
pub mod input;
pub mod resources;
pub mod window;

// Re-export commonly used types
pub use error::{ResourceError, WindowError};
pub use graphics::{shader::Shader, texture::Texture, renderer::SpriteRenderer};
pub use input::InputState;
pub use resources::ResourceManager;
pub use window::{Frame, Window};
