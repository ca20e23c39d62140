//! Tutorial: a textured quad spinning in the corner of the window.

use std::time::Instant;

use glam::{Mat4, Vec3};
use log::{error, info, warn};
use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use breakout::engine::error::ResourceError;
use breakout::engine::graphics::vertex::QUAD_VERTICES;
use breakout::engine::graphics::{ShaderDescriptor, SpriteVertex, Texture};
use breakout::engine::resources::ResourceManager;
use breakout::engine::window::Window;
use breakout::GameConfig;

const SHADER: &str = "textured";
const TEXTURE: &str = "face";
const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.2, g: 0.3, b: 0.3, a: 1.0 };

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Transform {
    matrix: [[f32; 4]; 4],
}

impl Transform {
    fn at(seconds: f32) -> Self {
        let matrix = Mat4::from_translation(Vec3::new(0.5, -0.5, 0.0)) * Mat4::from_rotation_z(seconds);
        Self {
            matrix: matrix.to_cols_array_2d(),
        }
    }
}

struct TexturedQuadApp {
    config: GameConfig,
    window: Option<Window>,
    resources: Option<ResourceManager>,
    quad_buffer: Option<wgpu::Buffer>,
    start: Instant,
}

impl TexturedQuadApp {
    fn load(&self, window: &Window) -> Result<(ResourceManager, wgpu::Buffer), ResourceError> {
        let device = window.device();
        let queue = window.queue();
        let mut resources = ResourceManager::new(device, &self.config.assets_dir);

        let texture_layout = resources.texture_layout();
        let desc = ShaderDescriptor {
            label: SHADER,
            vertex_layouts: &[SpriteVertex::desc()],
            uniform_size: std::mem::size_of::<Transform>() as u64,
            texture_layout: Some(&texture_layout),
            format: window.format(),
        };
        resources.load_shader(device, SHADER, "shaders/textured.vert.wgsl", "shaders/textured.frag.wgsl", &desc)?;

        if let Err(e) = resources.load_texture(device, queue, TEXTURE, "face.png", true) {
            warn!("Failed to load texture: {}, using default", e);
            resources.insert_texture(TEXTURE, Texture::checkerboard(device, queue, &texture_layout));
        }

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Ok((resources, quad_buffer))
    }

    fn frame(&mut self) -> Result<(), ResourceError> {
        let (Some(window), Some(resources), Some(quad_buffer)) =
            (self.window.as_ref(), self.resources.as_ref(), self.quad_buffer.as_ref())
        else {
            return Ok(());
        };

        let shader = resources.shader(SHADER)?;
        let texture = resources.texture(TEXTURE)?;
        shader.upload_uniforms(window.queue(), &Transform::at(self.start.elapsed().as_secs_f32()))?;

        match window.begin_frame() {
            Ok(mut frame) => {
                frame.clear(CLEAR_COLOR);
                {
                    let mut pass = frame.render_pass();
                    shader.activate(&mut pass);
                    texture.bind(&mut pass, 1);
                    pass.set_vertex_buffer(0, quad_buffer.slice(..));
                    pass.draw(0..QUAD_VERTICES.len() as u32, 0..1);
                }
                window.swap_buffers(frame);
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => window.reconfigure(),
            Err(e) => warn!("Skipping frame: {:?}", e),
        }
        Ok(())
    }
}

impl ApplicationHandler for TexturedQuadApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window = match Window::open(event_loop, self.config.screen_width, self.config.screen_height, "Textured Quad") {
            Ok(window) => window,
            Err(e) => {
                error!("Failed to open window: {}", e);
                event_loop.exit();
                return;
            }
        };
        match self.load(&window) {
            Ok((resources, quad_buffer)) => {
                self.resources = Some(resources);
                self.quad_buffer = Some(quad_buffer);
            }
            Err(e) => {
                error!("Failed to load resources: {}", e);
                event_loop.exit();
                return;
            }
        }
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let handled = match self.window.as_mut() {
            Some(window) => window.handle_event(&event),
            None => return,
        };
        if !handled {
            match event {
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                        && event.state == ElementState::Pressed
                    {
                        if let Some(window) = self.window.as_mut() {
                            window.close();
                        }
                    }
                }
                WindowEvent::RedrawRequested => {
                    if let Err(e) = self.frame() {
                        error!("Frame failed: {}", e);
                        event_loop.exit();
                    }
                }
                _ => (),
            }
        }
        if self.window.as_ref().is_some_and(|w| !w.is_open()) {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(resources) = self.resources.as_mut() {
            resources.clear();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Logger initialized");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = TexturedQuadApp {
        config: GameConfig::from_env(),
        window: None,
        resources: None,
        quad_buffer: None,
        start: Instant::now(),
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}
