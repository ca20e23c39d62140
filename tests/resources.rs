#![cfg(feature = "integration-tests")]

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage, Rgba, RgbaImage};

use breakout::engine::error::ResourceError;
use breakout::engine::graphics::{ColorVertex, Shader, ShaderDescriptor, SpriteInstance, SpriteVertex};
use breakout::engine::resources::{ResourceManager, TextureRequest};
use breakout::game::world::SpriteGlobals;

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

fn headless_device() -> (wgpu::Device, wgpu::Queue) {
    pollster::block_on(async {
        let instance = wgpu::Instance::default();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .expect("No graphics adapter available");
        adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Test Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .expect("Failed to request device")
    })
}

fn assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// A fresh directory per test, since tests run in parallel.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("breakout-{}-{}", std::process::id(), name));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn write_png(dir: &Path, file: &str, width: u32, height: u32) {
    RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 128]))
        .save(dir.join(file))
        .expect("write png");
}

fn triangle_desc<'a>(vertex_layouts: &'a [wgpu::VertexBufferLayout<'a>]) -> ShaderDescriptor<'a> {
    ShaderDescriptor {
        label: "triangle",
        vertex_layouts,
        uniform_size: 16,
        texture_layout: None,
        format: FORMAT,
    }
}

#[test]
fn test_invalid_wgsl_is_a_compile_error() {
    let (device, _queue) = headless_device();
    let layouts = [ColorVertex::desc()];
    let desc = triangle_desc(&layouts);
    match Shader::new(&device, "not wgsl", "fn fs_main(", &desc) {
        Err(ResourceError::ShaderCompile { name, message }) => {
            assert_eq!(name, "triangle");
            assert!(!message.is_empty());
        }
        Err(other) => panic!("Expected a compile error, got {}", other),
        Ok(_) => panic!("Garbage source compiled"),
    }
}

#[test]
fn test_uniform_upload_larger_than_block_is_rejected() {
    let (device, queue) = headless_device();
    let layouts = [ColorVertex::desc()];
    let desc = triangle_desc(&layouts);
    let dir = assets_dir().join("shaders");
    let shader = Shader::from_files(
        &device,
        &dir.join("triangle.vert.wgsl"),
        &dir.join("triangle.frag.wgsl"),
        &desc,
    )
    .expect("triangle shader compiles");

    assert!(shader.upload_uniforms(&queue, &[1.0f32, 0.5, 1.0, 1.0]).is_ok());
    match shader.upload_uniforms(&queue, &[0.0f32; 8]) {
        Err(ResourceError::UniformSize { name, got, capacity }) => {
            assert_eq!(name, "triangle");
            assert_eq!((got, capacity), (32, 16));
        }
        other => panic!("Expected a uniform size error, got {:?}", other.err()),
    }
}

#[test]
fn test_load_textures_reports_each_request_in_order() {
    let (device, queue) = headless_device();
    let dir = scratch_dir("ordered");
    let too_wide = device.limits().max_texture_dimension_2d + 1;
    write_png(&dir, "paddle.png", 16, 4);
    write_png(&dir, "huge.png", too_wide, 1);
    RgbImage::from_pixel(8, 8, Rgb([10, 20, 30]))
        .save(dir.join("background.jpg"))
        .expect("write jpg");

    let mut resources = ResourceManager::new(&device, &dir);
    let requests = [
        TextureRequest { name: "background", path: "background.jpg", alpha: false },
        TextureRequest { name: "missing", path: "missing.png", alpha: true },
        TextureRequest { name: "huge", path: "huge.png", alpha: true },
        TextureRequest { name: "paddle", path: "paddle.png", alpha: true },
    ];
    let results = resources.load_textures(&device, &queue, &requests);

    assert_eq!(results.len(), 4);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(ResourceError::Io { .. })));
    match &results[2] {
        Err(ResourceError::TextureSize { width, height, .. }) => assert_eq!((*width, *height), (too_wide, 1)),
        other => panic!("Expected a size error, got {:?}", other),
    }
    assert!(results[3].is_ok());

    assert_eq!(resources.texture_count(), 2);
    let paddle = resources.texture("paddle").expect("paddle loaded");
    assert_eq!((paddle.width, paddle.height), (16, 4));
    assert!(resources.texture("huge").is_err());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_failed_textures_fall_back_to_checkerboard() {
    let (device, queue) = headless_device();
    let dir = scratch_dir("fallback");
    write_png(&dir, "face.png", 8, 8);
    write_png(&dir, "wide.png", device.limits().max_texture_dimension_2d + 1, 1);

    let mut resources = ResourceManager::new(&device, &dir);
    let requests = [
        TextureRequest { name: "face", path: "face.png", alpha: true },
        TextureRequest { name: "paddle", path: "paddle.png", alpha: true },
        TextureRequest { name: "wide", path: "wide.png", alpha: true },
    ];
    assert_eq!(resources.load_textures_or_default(&device, &queue, &requests), 2);

    assert_eq!(resources.texture_count(), 3);
    let face = resources.texture("face").expect("face loaded");
    assert_eq!((face.width, face.height), (8, 8));
    for name in ["paddle", "wide"] {
        let fallback = resources.texture(name).expect("fallback cached");
        assert_eq!((fallback.width, fallback.height), (2, 2));
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_clear_releases_shaders_and_textures() {
    let (device, queue) = headless_device();
    let mut resources = ResourceManager::new(&device, assets_dir());

    let texture_layout = resources.texture_layout();
    let layouts = [SpriteVertex::desc(), SpriteInstance::desc()];
    let desc = ShaderDescriptor {
        label: "sprite",
        vertex_layouts: &layouts,
        uniform_size: std::mem::size_of::<SpriteGlobals>() as u64,
        texture_layout: Some(&texture_layout),
        format: FORMAT,
    };
    resources
        .load_shader(&device, "sprite", "shaders/sprite.vert.wgsl", "shaders/sprite.frag.wgsl", &desc)
        .expect("sprite shader compiles");
    let fallbacks = resources.load_textures_or_default(
        &device,
        &queue,
        &[TextureRequest { name: "block", path: "no-such-block.png", alpha: true }],
    );
    assert_eq!(fallbacks, 1);
    assert_eq!(resources.shader_count(), 1);
    assert_eq!(resources.texture_count(), 1);

    resources.clear();
    assert_eq!(resources.shader_count(), 0);
    assert_eq!(resources.texture_count(), 0);
    assert!(matches!(resources.shader("sprite"), Err(ResourceError::Missing { kind: "shader", .. })));
    assert!(matches!(resources.texture("block"), Err(ResourceError::Missing { kind: "texture", .. })));
}
