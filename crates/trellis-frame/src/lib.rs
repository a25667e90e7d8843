//! Trellis Frame - Per-frame callback scheduling
//!
//! Provides the render loop's coordination core:
//! - `FrameClock` — per-frame delta and total time tracking
//! - `FrameRecord` / `HandlerRegistry` — ordered handler bookkeeping
//! - `FrameScheduler` — the per-tick driver: invalidation check, sort,
//!   dispatch, draw
//! - `FrameHandle` — consumer-facing start/stop lifecycle handle
//! - `RenderRoot` / `LoopContext` — owned registry and registration
//!   entry point
//!
//! Scheduling is single-threaded and cooperative: one tick per
//! rendered frame, handlers invoked sequentially in sort order.

mod clock;
mod context;
mod environment;
mod handle;
mod handler;
mod registry;
mod renderer;
mod root;
mod scheduler;

pub use clock::FrameClock;
pub use context::{FrameContext, FrameInvalidation};
pub use environment::RenderCapability;
pub use handle::FrameHandle;
pub use handler::{FrameOptions, FrameRecord, InvalidationMode};
pub use registry::HandlerRegistry;
pub use renderer::Renderer;
pub use root::{LoopContext, RenderRoot};
pub use scheduler::{FrameScheduler, TickOutcome};
