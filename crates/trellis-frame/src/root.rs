//! Render root owning the registry and scheduler

use crate::context::{FrameContext, FrameInvalidation};
use crate::environment::RenderCapability;
use crate::handle::FrameHandle;
use crate::handler::{FrameOptions, FrameRecord};
use crate::registry::HandlerRegistry;
use crate::renderer::Renderer;
use crate::scheduler::{FrameScheduler, TickOutcome};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use trellis_core::{Result, TrellisError};

/// Owner of one render loop's handler registry and scheduler
///
/// There is no global registry: whoever runs the loop constructs a
/// `RenderRoot` and hands [`LoopContext`]s to nested consumers. One
/// root, one registry, one ordered dispatch pass per frame.
pub struct RenderRoot {
    registry: Rc<RefCell<HandlerRegistry>>,
    scheduler: FrameScheduler,
    capability: RenderCapability,
}

impl RenderRoot {
    pub fn new(capability: RenderCapability) -> Self {
        Self {
            registry: Rc::new(RefCell::new(HandlerRegistry::new())),
            scheduler: FrameScheduler::new(),
            capability,
        }
    }

    /// Registration context for nested consumers
    pub fn context(&self) -> LoopContext {
        LoopContext {
            registry: Rc::downgrade(&self.registry),
            invalidation: self.scheduler.invalidation(),
            capability: self.capability,
        }
    }

    pub fn capability(&self) -> RenderCapability {
        self.capability
    }

    /// Whether the next tick would render
    pub fn frame_due(&self) -> bool {
        !self.capability.is_headless() && self.scheduler.frame_due(&self.registry.borrow())
    }

    /// Request a frame on the next tick
    pub fn invalidate(&self) {
        self.scheduler.invalidate();
    }

    /// Number of currently registered handlers
    pub fn handler_count(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Run one scheduler tick, drawing through `renderer` if a frame
    /// is due
    pub fn tick<R: Renderer>(&mut self, renderer: &mut R) -> Result<TickOutcome> {
        if self.capability.is_headless() {
            return Ok(TickOutcome::Skipped);
        }
        self.scheduler.tick(&self.registry, renderer)
    }
}

/// Cloneable registration entry point handed to consumers
///
/// Holds only weak references; registering through a context whose
/// root is gone is a synchronous configuration error.
#[derive(Clone)]
pub struct LoopContext {
    registry: Weak<RefCell<HandlerRegistry>>,
    invalidation: FrameInvalidation,
    capability: RenderCapability,
}

impl LoopContext {
    /// Register a per-frame callback and return its lifecycle handle
    ///
    /// With `autostart` (the default) the handler is inserted
    /// immediately; otherwise it stays out of the registry until
    /// [`FrameHandle::start`]. In a headless environment the returned
    /// handle is inert. Fails fast if the owning root has been torn
    /// down.
    pub fn on_frame(
        &self,
        callback: impl FnMut(&FrameContext, f64) -> Result<()> + 'static,
        options: FrameOptions,
    ) -> Result<FrameHandle> {
        let record = FrameRecord::new(callback, &options);

        if self.capability.is_headless() {
            return Ok(FrameHandle::inert(record));
        }

        let registry = self.registry.upgrade().ok_or_else(|| {
            TrellisError::MissingRenderRoot(
                "frame handler registered outside a live render root".into(),
            )
        })?;

        let handle = FrameHandle::new(record, Rc::downgrade(&registry));
        if options.autostart {
            handle.start();
        }
        Ok(handle)
    }

    /// Request a frame on the next tick
    ///
    /// The external frame-request mechanism manual-mode handlers rely
    /// on. Harmless in a headless environment.
    pub fn invalidate(&self) {
        self.invalidation.invalidate();
    }
}
