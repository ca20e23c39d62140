//! Vertex + fragment programs and their uniform block.

use std::borrow::Cow;
use std::path::Path;

use log::{debug, error};

use crate::engine::error::ResourceError;

/// Everything needed to build a shader program besides its source.
pub struct ShaderDescriptor<'a> {
    pub label: &'a str,
    pub vertex_layouts: &'a [wgpu::VertexBufferLayout<'a>],
    /// Size in bytes of the uniform block bound at group 0.
    pub uniform_size: u64,
    /// Layout of the texture sampled at group 1, if the program samples one.
    pub texture_layout: Option<&'a wgpu::BindGroupLayout>,
    pub format: wgpu::TextureFormat,
}

/// A compiled and linked program. Each shader owns one uniform buffer.
pub struct Shader {
    pub name: String,
    pub pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniform_size: u64,
}

/// Uniform buffers are bound in 16 byte steps.
pub fn uniform_block_size(requested: u64) -> u64 {
    wgpu::util::align_to(requested.max(16), 16)
}

fn read_source(path: &Path) -> Result<String, ResourceError> {
    std::fs::read_to_string(path).map_err(|source| ResourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl Shader {
    /// Reads both stages from disk and compiles them.
    pub fn from_files(
        device: &wgpu::Device,
        vertex_path: &Path,
        fragment_path: &Path,
        desc: &ShaderDescriptor,
    ) -> Result<Self, ResourceError> {
        let vertex_source = read_source(vertex_path)?;
        let fragment_source = read_source(fragment_path)?;
        debug!(
            "Compiling shader `{}` from {} and {}",
            desc.label,
            vertex_path.display(),
            fragment_path.display()
        );
        Self::new(device, &vertex_source, &fragment_source, desc)
    }

    /// Compiles the vertex (`vs_main`) and fragment (`fs_main`) stages and links
    /// them into a pipeline. Validation errors are reported instead of panicking.
    pub fn new(
        device: &wgpu::Device,
        vertex_source: &str,
        fragment_source: &str,
        desc: &ShaderDescriptor,
    ) -> Result<Self, ResourceError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} vertex", desc.label)),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(vertex_source)),
        });
        let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} fragment", desc.label)),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(fragment_source)),
        });

        let uniform_size = uniform_block_size(desc.uniform_size);
        let uniform_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Uniform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Buffer"),
            size: uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = std::iter::once(&uniform_bind_group_layout)
            .chain(desc.texture_layout)
            .collect();
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &bind_group_layouts,
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex,
                entry_point: "vs_main",
                buffers: desc.vertex_layouts,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: desc.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            error!("Shader `{}` failed to compile: {}", desc.label, err);
            return Err(ResourceError::ShaderCompile {
                name: desc.label.to_string(),
                message: err.to_string(),
            });
        }

        Ok(Self {
            name: desc.label.to_string(),
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            uniform_size,
        })
    }

    /// Binds the program and its uniform block for subsequent draws.
    pub fn activate<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
    }

    /// Replaces the contents of the uniform block with `data`.
    pub fn upload_uniforms<T: bytemuck::Pod>(&self, queue: &wgpu::Queue, data: &T) -> Result<(), ResourceError> {
        let bytes = bytemuck::bytes_of(data);
        if bytes.len() as u64 > self.uniform_size {
            return Err(ResourceError::UniformSize {
                name: self.name.clone(),
                got: bytes.len() as u64,
                capacity: self.uniform_size,
            });
        }
        queue.write_buffer(&self.uniform_buffer, 0, bytes);
        Ok(())
    }
}
