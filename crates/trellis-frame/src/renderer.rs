//! Renderer seam between the scheduler and the drawing backend

use crate::context::FrameContext;
use trellis_core::Result;

/// Sink for completed frames
///
/// The scheduler calls `draw` exactly once per tick that renders,
/// after every handler for that tick has run.
pub trait Renderer {
    fn draw(&mut self, ctx: &FrameContext) -> Result<()>;
}
