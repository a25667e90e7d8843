//! Frame presentation against a window surface

use crate::context::{RenderContext, RenderError};
use trellis_core::Result;
use trellis_frame::{FrameContext, Renderer};

/// Presents one cleared frame per scheduler tick
///
/// Handlers have already run when `draw` is called; this clears the
/// surface to the configured color and presents. Lost or outdated
/// surfaces are reconfigured and retried once.
pub struct SurfaceRenderer {
    context: RenderContext,
    clear_color: wgpu::Color,
}

impl SurfaceRenderer {
    pub fn new(context: RenderContext, clear_color: wgpu::Color) -> Self {
        Self {
            context,
            clear_color,
        }
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn set_clear_color(&mut self, clear_color: wgpu::Color) {
        self.clear_color = clear_color;
    }

    /// Resize the underlying surface
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }

    fn acquire_frame(&self) -> Result<wgpu::SurfaceTexture> {
        match self.context.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.context.reconfigure();
                self.context
                    .surface
                    .get_current_texture()
                    .map_err(|e| RenderError::SurfaceError(e.to_string()).into())
            }
            Err(e) => Err(RenderError::SurfaceError(e.to_string()).into()),
        }
    }
}

impl Renderer for SurfaceRenderer {
    fn draw(&mut self, _ctx: &FrameContext) -> Result<()> {
        let frame = self.acquire_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Trellis Frame Encoder"),
            });

        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Trellis Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
