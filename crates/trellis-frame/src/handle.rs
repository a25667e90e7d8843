//! Consumer-facing registration handle

use crate::handler::FrameRecord;
use crate::registry::HandlerRegistry;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use trellis_reactive::Observable;

/// Lifecycle handle for one registered frame handler
///
/// `start` and `stop` toggle registry membership and are idempotent.
/// Dropping the handle performs the terminal teardown: a final `stop`
/// after which the handle is inert (`start` becomes a no-op). The
/// `started` observable is derived from registry membership and never
/// desyncs from it.
pub struct FrameHandle {
    record: Rc<FrameRecord>,
    registry: Weak<RefCell<HandlerRegistry>>,
    started: Observable<bool>,
    released: Cell<bool>,
}

impl FrameHandle {
    pub(crate) fn new(record: Rc<FrameRecord>, registry: Weak<RefCell<HandlerRegistry>>) -> Self {
        Self {
            record,
            registry,
            started: Observable::new(false),
            released: Cell::new(false),
        }
    }

    /// Handle for an environment with no render loop: `start`/`stop`
    /// never touch a registry and `started` stays false forever.
    pub(crate) fn inert(record: Rc<FrameRecord>) -> Self {
        Self::new(record, Weak::new())
    }

    /// Insert the handler into the registry
    ///
    /// No-op if already started, after the terminal teardown, or when
    /// no live registry exists.
    pub fn start(&self) {
        if self.released.get() || self.started.get() {
            return;
        }
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        registry.borrow_mut().insert(&self.record);
        self.started.set(true);
    }

    /// Remove the handler from the registry
    ///
    /// No-op if already stopped. Takes effect by the next tick at the
    /// latest; a tick already dispatching finishes its snapshot.
    pub fn stop(&self) {
        if !self.started.get() {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(&self.record);
        }
        self.started.set(false);
    }

    /// Whether the handler is currently registered
    pub fn is_started(&self) -> bool {
        self.started.get()
    }

    /// Observable registration state
    ///
    /// Flips exactly when registry membership changes.
    pub fn started(&self) -> Observable<bool> {
        self.started.clone()
    }

    /// Terminal teardown: a final `stop`, after which the handle is
    /// inert
    ///
    /// Idempotent; also invoked on drop, which ties teardown to the
    /// owning consumer's lifetime.
    pub fn release(&self) {
        if self.released.get() {
            return;
        }
        self.stop();
        self.released.set(true);
    }

    pub(crate) fn record(&self) -> &Rc<FrameRecord> {
        &self.record
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        self.release();
    }
}
