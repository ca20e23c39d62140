use wgpu;

/// Corner of the unit sprite quad: position in `xy`, texture coordinates in `zw`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteVertex {
    pub vertex: [f32; 4],
}

impl SpriteVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: &[wgpu::VertexAttribute] = &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x4,
        }];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRIBUTES,
        }
    }
}

/// Per-sprite data: model matrix columns and a colour multiplier.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl SpriteInstance {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
            1 => Float32x4,
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: ATTRIBUTES,
        }
    }
}

/// Position and colour of a tutorial triangle corner.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ColorVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRIBUTES,
        }
    }
}

// Two triangles covering the unit square, counter-clockwise once the
// y-down projection is applied.
pub const QUAD_VERTICES: &[SpriteVertex] = &[
    SpriteVertex { vertex: [0.0, 1.0, 0.0, 1.0] },
    SpriteVertex { vertex: [1.0, 0.0, 1.0, 0.0] },
    SpriteVertex { vertex: [0.0, 0.0, 0.0, 0.0] },

    SpriteVertex { vertex: [0.0, 1.0, 0.0, 1.0] },
    SpriteVertex { vertex: [1.0, 1.0, 1.0, 1.0] },
    SpriteVertex { vertex: [1.0, 0.0, 1.0, 0.0] },
];

pub const TRIANGLE_VERTICES: &[ColorVertex] = &[
    ColorVertex { position: [-0.5, -0.5, 0.0], color: [1.0, 0.0, 0.0] },
    ColorVertex { position: [ 0.5, -0.5, 0.0], color: [0.0, 1.0, 0.0] },
    ColorVertex { position: [ 0.0,  0.5, 0.0], color: [0.0, 0.0, 1.0] },
];
