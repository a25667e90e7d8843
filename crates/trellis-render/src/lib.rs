//! Trellis Render - GPU surface management and frame presentation
//!
//! Implements the frame loop's drawing collaborator:
//! - `RenderContext` - wgpu surface, device, and queue for a window
//! - `SurfaceRenderer` - presents one frame per scheduler tick
//!
//! Scene content is out of scope here; the renderer clears and
//! presents, giving frame handlers a fixed point the loop draws at.

mod context;
mod surface_renderer;

pub use context::{RenderContext, RenderError};
pub use surface_renderer::SurfaceRenderer;
