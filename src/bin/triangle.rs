//! Tutorial: one coloured triangle whose tint pulses over time.

use std::time::Instant;

use log::{error, info, warn};
use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use breakout::engine::error::ResourceError;
use breakout::engine::graphics::vertex::TRIANGLE_VERTICES;
use breakout::engine::graphics::{ColorVertex, Shader, ShaderDescriptor};
use breakout::engine::window::Window;
use breakout::GameConfig;

const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.2, g: 0.3, b: 0.3, a: 1.0 };

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Tint {
    color: [f32; 4],
}

struct Scene {
    shader: Shader,
    vertex_buffer: wgpu::Buffer,
}

struct TriangleApp {
    config: GameConfig,
    window: Option<Window>,
    scene: Option<Scene>,
    start: Instant,
}

impl TriangleApp {
    fn load_scene(&self, window: &Window) -> Result<Scene, ResourceError> {
        let desc = ShaderDescriptor {
            label: "triangle",
            vertex_layouts: &[ColorVertex::desc()],
            uniform_size: std::mem::size_of::<Tint>() as u64,
            texture_layout: None,
            format: window.format(),
        };
        let shaders = self.config.assets_dir.join("shaders");
        let shader = Shader::from_files(
            window.device(),
            &shaders.join("triangle.vert.wgsl"),
            &shaders.join("triangle.frag.wgsl"),
            &desc,
        )?;
        let vertex_buffer = window.device().create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Triangle Vertex Buffer"),
            contents: bytemuck::cast_slice(TRIANGLE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Ok(Scene { shader, vertex_buffer })
    }

    fn frame(&mut self) {
        let (Some(window), Some(scene)) = (self.window.as_ref(), self.scene.as_ref()) else {
            return;
        };

        let green = self.start.elapsed().as_secs_f32().sin() / 2.0 + 0.5;
        let tint = Tint { color: [1.0, green, 1.0, 1.0] };
        if let Err(e) = scene.shader.upload_uniforms(window.queue(), &tint) {
            error!("{}", e);
        }

        match window.begin_frame() {
            Ok(mut frame) => {
                frame.clear(CLEAR_COLOR);
                {
                    let mut pass = frame.render_pass();
                    scene.shader.activate(&mut pass);
                    pass.set_vertex_buffer(0, scene.vertex_buffer.slice(..));
                    pass.draw(0..TRIANGLE_VERTICES.len() as u32, 0..1);
                }
                window.swap_buffers(frame);
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => window.reconfigure(),
            Err(e) => warn!("Skipping frame: {:?}", e),
        }
    }
}

impl ApplicationHandler for TriangleApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window = match Window::open(event_loop, self.config.screen_width, self.config.screen_height, "Triangle") {
            Ok(window) => window,
            Err(e) => {
                error!("Failed to open window: {}", e);
                event_loop.exit();
                return;
            }
        };
        match self.load_scene(&window) {
            Ok(scene) => self.scene = Some(scene),
            Err(e) => {
                error!("Failed to load scene: {}", e);
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
                WindowEvent::RedrawRequested => self.frame(),
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
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Logger initialized");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = TriangleApp {
        config: GameConfig::from_env(),
        window: None,
        scene: None,
        start: Instant::now(),
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}
