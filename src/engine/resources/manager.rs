use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};
use rayon::prelude::*;

use crate::engine::error::ResourceError;
use crate::engine::graphics::shader::{Shader, ShaderDescriptor};
use crate::engine::graphics::texture::{read_rgba, Texture, TextureOptions};
use crate::engine::resources::cache::ResourceCache;

/// A texture to load: cache name, path relative to the assets directory,
/// and whether its alpha channel is kept.
#[derive(Debug, Clone, Copy)]
pub struct TextureRequest<'a> {
    pub name: &'a str,
    pub path: &'a str,
    pub alpha: bool,
}

/// Owns every loaded shader and texture, keyed by name.
///
/// The application creates one manager, lends it to whoever loads or draws,
/// and calls [`ResourceManager::clear`] on shutdown.
pub struct ResourceManager {
    assets_dir: PathBuf,
    texture_layout: Arc<wgpu::BindGroupLayout>,
    shaders: ResourceCache<Shader>,
    textures: ResourceCache<Texture>,
}

impl ResourceManager {
    pub fn new(device: &wgpu::Device, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            texture_layout: Arc::new(Texture::bind_group_layout(device)),
            shaders: ResourceCache::new("shader"),
            textures: ResourceCache::new("texture"),
        }
    }

    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.assets_dir.join(relative)
    }

    /// Layout every cached texture is created with.
    pub fn texture_layout(&self) -> Arc<wgpu::BindGroupLayout> {
        Arc::clone(&self.texture_layout)
    }

    pub fn load_shader(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        vertex: &str,
        fragment: &str,
        desc: &ShaderDescriptor,
    ) -> Result<&Shader, ResourceError> {
        let shader = Shader::from_files(device, &self.resolve(vertex), &self.resolve(fragment), desc)?;
        info!("Loaded shader `{}`", name);
        self.shaders.insert(name, shader);
        self.shaders.get(name)
    }

    pub fn shader(&self, name: &str) -> Result<&Shader, ResourceError> {
        self.shaders.get(name)
    }

    pub fn load_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        name: &str,
        path: &str,
        alpha: bool,
    ) -> Result<&Texture, ResourceError> {
        let texture = Texture::from_file(
            device,
            queue,
            &self.texture_layout,
            &self.resolve(path),
            alpha,
            TextureOptions::default(),
        )?;
        self.textures.insert(name, texture);
        self.textures.get(name)
    }

    /// Decodes every request in parallel, then uploads them one by one.
    /// Returns one result per request, in request order.
    pub fn load_textures(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        requests: &[TextureRequest],
    ) -> Vec<Result<(), ResourceError>> {
        let paths: Vec<PathBuf> = requests.iter().map(|r| self.resolve(r.path)).collect();
        let decoded: Vec<_> = requests
            .par_iter()
            .zip(paths.par_iter())
            .map(|(request, path)| read_rgba(path, request.alpha))
            .collect();

        requests
            .iter()
            .zip(decoded)
            .map(|(request, image)| {
                let image = image?;
                let texture = Texture::from_image(
                    device,
                    queue,
                    &self.texture_layout,
                    request.name,
                    &image,
                    TextureOptions::default(),
                )?;
                info!("Loaded texture `{}` ({}x{})", request.name, texture.width, texture.height);
                self.textures.insert(request.name, texture);
                Ok(())
            })
            .collect()
    }

    /// Like [`ResourceManager::load_textures`], but every request that fails
    /// is cached as a checkerboard instead. Returns how many fell back.
    pub fn load_textures_or_default(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        requests: &[TextureRequest],
    ) -> usize {
        let results = self.load_textures(device, queue, requests);
        let mut fallbacks = 0;
        for (request, result) in requests.iter().zip(results) {
            if let Err(e) = result {
                warn!("Failed to load texture `{}`: {}, using default", request.name, e);
                let texture = Texture::checkerboard(device, queue, &self.texture_layout);
                self.textures.insert(request.name, texture);
                fallbacks += 1;
            }
        }
        fallbacks
    }

    pub fn insert_texture(&mut self, name: &str, texture: Texture) {
        self.textures.insert(name, texture);
    }

    pub fn texture(&self, name: &str) -> Result<&Texture, ResourceError> {
        self.textures.get(name)
    }

    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Releases every cached shader and texture.
    pub fn clear(&mut self) {
        let shaders = self.shaders.clear();
        let textures = self.textures.clear();
        if shaders + textures > 0 {
            info!("Released {} shaders and {} textures", shaders, textures);
        }
    }
}
