pub mod renderer;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use renderer::{Sprite, SpriteBatch, SpriteRenderer};
pub use shader::{Shader, ShaderDescriptor};
pub use texture::{Texture, TextureOptions};
pub use vertex::{ColorVertex, SpriteInstance, SpriteVertex};
