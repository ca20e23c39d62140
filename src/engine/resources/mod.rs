//! Named caches for loaded shaders and textures.

pub mod cache;
pub mod manager;

pub use cache::ResourceCache;
pub use manager::{ResourceManager, TextureRequest};
