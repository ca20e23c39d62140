use log::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use crate::config::GameConfig;
use crate::engine::input::{key_code, mouse_button_code};
use crate::engine::resources::ResourceManager;
use crate::engine::window::Window;
use crate::game::breakout::Game;
use crate::game::state::FrameTimer;

/// Runs the frame cycle: delta time, input, update, clear, render, swap.
pub struct App {
    config: GameConfig,
    window: Option<Window>,
    resources: Option<ResourceManager>,
    game: Game,
    timer: FrameTimer,
}

impl Default for App {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        let game = Game::new(config.screen_width, config.screen_height);
        Self {
            config,
            window: None,
            resources: None,
            game,
            timer: FrameTimer::new(),
        }
    }

    fn frame(&mut self) {
        let (Some(window), Some(resources)) = (self.window.as_ref(), self.resources.as_ref()) else {
            return;
        };

        let dt = self.timer.tick();
        self.game.process_input(dt);
        self.game.update(dt);

        let mut fatal = false;
        match window.begin_frame() {
            Ok(mut frame) => {
                frame.clear(self.config.clear_color);
                self.game.render(window, &mut frame, resources);
                window.swap_buffers(frame);
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                window.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of GPU memory, closing");
                fatal = true;
            }
            Err(e) => warn!("Skipping frame: {:?}", e),
        }

        if fatal {
            if let Some(window) = self.window.as_mut() {
                window.close();
            }
        }
    }

    fn handle_key(&mut self, keycode: KeyCode, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        if keycode == KeyCode::Escape && pressed {
            if let Some(window) = self.window.as_mut() {
                window.close();
            }
        }
        if let Some(code) = key_code(keycode) {
            self.game.input.set_key(code, pressed);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match Window::open(
            event_loop,
            self.config.screen_width,
            self.config.screen_height,
            &self.config.title,
        ) {
            Ok(window) => window,
            Err(e) => {
                error!("Failed to open window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let mut resources = ResourceManager::new(window.device(), &self.config.assets_dir);
        if let Err(e) = self.game.init(&window, &mut resources) {
            error!("Failed to initialise game: {}", e);
            event_loop.exit();
            return;
        }
        self.game.state = self.config.start_state;
        info!("Starting in {:?} state", self.game.state);

        window.request_redraw();
        self.window = Some(window);
        self.resources = Some(resources);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let handled = match self.window.as_mut() {
            Some(window) => window.handle_event(&event),
            None => return,
        };

        if !handled {
            match event {
                WindowEvent::KeyboardInput { event, .. } => {
                    if let PhysicalKey::Code(keycode) = event.physical_key {
                        self.handle_key(keycode, event.state);
                    }
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    self.game
                        .input
                        .set_mouse_button(mouse_button_code(button), state == ElementState::Pressed);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    self.game.input.set_mouse_position(position.x, position.y);
                }
                WindowEvent::Focused(false) => {
                    self.game.input.reset();
                }
                WindowEvent::RedrawRequested => {
                    self.frame();
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
        self.resources = None;
        self.window = None;
        info!("Shut down after {:.1}s of game time", self.game.elapsed());
    }
}
