use std::ops::Range;

use glam::{Mat4, Quat, Vec2, Vec3};
use log::debug;
use wgpu::util::DeviceExt;

use crate::engine::graphics::shader::Shader;
use crate::engine::graphics::vertex::{SpriteInstance, QUAD_VERTICES};
use crate::engine::resources::ResourceManager;

/// A textured quad in screen space, positioned by its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: String,
    pub position: Vec2,
    pub size: Vec2,
    /// Rotation about the sprite centre, in radians.
    pub rotation: f32,
    pub color: Vec3,
}

impl Sprite {
    pub fn new(texture: impl Into<String>, position: Vec2, size: Vec2) -> Self {
        Self {
            texture: texture.into(),
            position,
            size,
            rotation: 0.0,
            color: Vec3::ONE,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn instance(&self) -> SpriteInstance {
        SpriteInstance {
            model: sprite_model(self.position, self.size, self.rotation).to_cols_array_2d(),
            color: self.color.extend(1.0).to_array(),
        }
    }
}

/// Sprites queued for one frame, drawn in insertion order.
#[derive(Debug, Default, Clone)]
pub struct SpriteBatch {
    pub sprites: Vec<Sprite>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

/// Model matrix for a unit quad: scale to `size`, rotate about the centre,
/// move the top-left corner to `position`.
pub fn sprite_model(position: Vec2, size: Vec2, rotation: f32) -> Mat4 {
    let half = (0.5 * size).extend(0.0);
    Mat4::from_translation(position.extend(0.0))
        * Mat4::from_translation(half)
        * Mat4::from_quat(Quat::from_rotation_z(rotation))
        * Mat4::from_translation(-half)
        * Mat4::from_scale(size.extend(1.0))
}

/// One instanced draw: a run of consecutive sprites sharing a texture.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRun {
    pub texture: String,
    pub instances: Range<u32>,
}

/// Collapses consecutive sprites with the same texture into single draws.
/// Order is kept so that blending stays back-to-front.
pub fn plan_draws(sprites: &[Sprite]) -> Vec<DrawRun> {
    let mut runs: Vec<DrawRun> = Vec::new();
    for (i, sprite) in sprites.iter().enumerate() {
        let i = i as u32;
        match runs.last_mut() {
            Some(run) if run.texture == sprite.texture => run.instances.end = i + 1,
            _ => runs.push(DrawRun {
                texture: sprite.texture.clone(),
                instances: i..i + 1,
            }),
        }
    }
    runs
}

/// Draws sprite batches with a single quad and a growable instance buffer.
pub struct SpriteRenderer {
    quad_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    draws: Vec<DrawRun>,
}

impl SpriteRenderer {
    const INITIAL_CAPACITY: usize = 64;

    pub fn new(device: &wgpu::Device) -> Self {
        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Quad Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            quad_buffer,
            instance_buffer: Self::create_instance_buffer(device, Self::INITIAL_CAPACITY),
            instance_capacity: Self::INITIAL_CAPACITY,
            draws: Vec::new(),
        }
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Instance Buffer"),
            size: (capacity * std::mem::size_of::<SpriteInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Uploads the batch's instance data and plans its draws.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, batch: &SpriteBatch) {
        let instances: Vec<SpriteInstance> = batch.sprites.iter().map(Sprite::instance).collect();
        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len().next_power_of_two();
            debug!("Growing sprite instance buffer to {} sprites", self.instance_capacity);
            self.instance_buffer = Self::create_instance_buffer(device, self.instance_capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
        self.draws = plan_draws(&batch.sprites);
    }

    /// Records the prepared draws. Sprites whose texture is not loaded are skipped.
    pub fn draw<'a>(
        &'a self,
        pass: &mut wgpu::RenderPass<'a>,
        shader: &'a Shader,
        resources: &'a ResourceManager,
    ) {
        if self.draws.is_empty() {
            return;
        }
        shader.activate(pass);
        pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        for run in &self.draws {
            match resources.texture(&run.texture) {
                Ok(texture) => {
                    texture.bind(pass, 1);
                    pass.draw(0..QUAD_VERTICES.len() as u32, run.instances.clone());
                }
                Err(e) => debug!("Skipping sprites: {}", e),
            }
        }
    }
}
