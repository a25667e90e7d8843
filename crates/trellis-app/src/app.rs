//! Application handler driving scheduler ticks from winit
//!
//! Redraws are requested only while a frame is due, so an idle scene
//! (manual handlers, no outstanding invalidation) costs nothing.

use crate::config::AppConfig;
use std::sync::Arc;
use trellis_frame::{LoopContext, RenderCapability, RenderRoot};
use trellis_render::{RenderContext, SurfaceRenderer};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Owns the render root and drives it from the window event loop
pub struct TrellisApp {
    config: AppConfig,
    root: RenderRoot,

    window: Option<Arc<Window>>,
    renderer: Option<SurfaceRenderer>,
}

impl TrellisApp {
    /// Create an app, detecting display availability
    pub fn new(config: AppConfig) -> Self {
        Self::with_capability(config, RenderCapability::detect())
    }

    pub fn with_capability(config: AppConfig, capability: RenderCapability) -> Self {
        Self {
            config,
            root: RenderRoot::new(capability),
            window: None,
            renderer: None,
        }
    }

    /// Registration context for frame handlers
    pub fn context(&self) -> LoopContext {
        self.root.context()
    }

    /// Run the event loop until the window closes
    ///
    /// In a headless environment there is no loop to run: returns
    /// immediately, leaving every registered handle inert.
    pub fn run(mut self) -> anyhow::Result<()> {
        if self.root.capability().is_headless() {
            log::warn!("no display available; frame loop disabled");
            return Ok(());
        }

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.window.title)
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs).unwrap());
        self.window = Some(window.clone());

        let context = pollster::block_on(RenderContext::new(window)).unwrap();
        self.renderer = Some(SurfaceRenderer::new(
            context,
            self.config.clear_color.to_wgpu(),
        ));

        // First frame regardless of handler modes
        self.root.invalidate();
    }
}

impl ApplicationHandler for TrellisApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            self.initialize(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                // Surface contents are stale after a resize
                self.root.invalidate();
            }

            WindowEvent::RedrawRequested => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(err) = self.root.tick(renderer) {
                        log::error!("frame failed: {err}");
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.root.frame_due() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}
