//! Error types shared by the engine wrappers.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or using shaders and textures.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("shader `{name}` failed to compile: {message}")]
    ShaderCompile { name: String, message: String },

    #[error("uniform data for shader `{name}` is {got} bytes but its block holds {capacity}")]
    UniformSize {
        name: String,
        got: u64,
        capacity: u64,
    },

    #[error("texture `{name}` is {width}x{height} but the device allows 1 to {max} texels per side")]
    TextureSize {
        name: String,
        width: u32,
        height: u32,
        max: u32,
    },

    #[error("no {kind} named `{name}` is loaded")]
    Missing { kind: &'static str, name: String },
}

/// Failures while opening the window and its rendering context.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("failed to create window: {0}")]
    Os(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no graphics adapter is compatible with the window surface")]
    NoAdapter,

    #[error("the window surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
