//! Window management implementation.

use std::sync::Arc;

use log::{debug, error, info};
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;

use crate::engine::error::WindowError;
use crate::engine::window::frame::Frame;

/// A native window together with the rendering context drawing into it.
pub struct Window {
    handle: Arc<winit::window::Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    open: bool,
}

/// Surface dimensions for a window of `size`, or `None` while it is minimised
/// to zero and the surface must keep its current configuration.
fn surface_extent(size: PhysicalSize<u32>) -> Option<(u32, u32)> {
    (size.width > 0 && size.height > 0).then_some((size.width, size.height))
}

impl Window {
    /// Creates a fixed-size window and initialises the GPU context for it.
    pub fn open(
        event_loop: &ActiveEventLoop,
        width: u32,
        height: u32,
        title: &str,
    ) -> Result<Self, WindowError> {
        let attributes = winit::window::Window::default_attributes()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(false);
        let handle = event_loop.create_window(attributes).map_err(|e| {
            error!("Failed to create window: {:?}", e);
            e
        })?;
        pollster::block_on(Self::init_wgpu(Arc::new(handle)))
    }

    async fn init_wgpu(handle: Arc<winit::window::Window>) -> Result<Self, WindowError> {
        let size = handle.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(handle.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(WindowError::NoAdapter)?;
        info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(WindowError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        info!("Window opened: {}x{} ({:?})", config.width, config.height, config.format);

        Ok(Self {
            handle,
            surface,
            device,
            queue,
            config,
            open: true,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        if self.open {
            debug!("Window close requested");
        }
        self.open = false;
    }

    /// Consumes window-level events. Returns `true` when the event was handled
    /// here and needs no further dispatch.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.close();
                true
            }
            WindowEvent::Resized(size) => {
                self.resize(*size);
                true
            }
            _ => false,
        }
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let Some((width, height)) = surface_extent(new_size) else {
            debug!("Ignoring resize to {}x{}", new_size.width, new_size.height);
            return;
        };
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    /// Reapplies the surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquires the next back buffer.
    pub fn begin_frame(&self) -> Result<Frame, wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        Ok(Frame::new(&self.device, surface_texture))
    }

    /// Submits everything recorded into `frame` and presents it.
    pub fn swap_buffers(&self, frame: Frame) {
        self.handle.pre_present_notify();
        frame.present(&self.queue);
    }

    pub fn request_redraw(&self) {
        self.handle.request_redraw();
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }
}
