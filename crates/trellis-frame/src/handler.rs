//! Frame handler records and registration options

use crate::context::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use trellis_core::Result;

type FrameCallback = Box<dyn FnMut(&FrameContext, f64) -> Result<()>>;

/// How a handler's presence relates to frame production
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationMode {
    /// The handler's presence keeps frames rendering every tick
    Auto,
    /// The handler requests frames itself via [`FrameContext::invalidate`]
    Manual,
}

/// Options accepted when registering a frame handler
#[derive(Debug, Clone)]
pub struct FrameOptions {
    /// Insert the handler into the registry immediately (default: true)
    pub autostart: bool,
    /// Sort key; handlers run from low to high, unset sorts as 0
    pub order: Option<f32>,
    /// Auto-invalidate while registered (default: true)
    pub invalidate: bool,
    /// Diagnostic tag used in dispatch error reports
    pub debug_label: Option<String>,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            autostart: true,
            order: None,
            invalidate: true,
            debug_label: None,
        }
    }
}

impl FrameOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, order: f32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }

    /// Opt out of auto-invalidation; the handler requests frames itself
    pub fn manual(mut self) -> Self {
        self.invalidate = false;
        self
    }

    pub fn with_debug_label(mut self, label: impl Into<String>) -> Self {
        self.debug_label = Some(label.into());
        self
    }
}

/// One registered per-frame callback
///
/// Records are compared by `Rc` pointer identity, never by value:
/// registering the same closure twice produces two distinct records.
/// The invalidation mode is fixed at construction.
pub struct FrameRecord {
    callback: RefCell<FrameCallback>,
    order: Option<f32>,
    mode: InvalidationMode,
    debug_label: Option<String>,
}

impl FrameRecord {
    pub(crate) fn new(
        callback: impl FnMut(&FrameContext, f64) -> Result<()> + 'static,
        options: &FrameOptions,
    ) -> Rc<Self> {
        let mode = if options.invalidate {
            InvalidationMode::Auto
        } else {
            InvalidationMode::Manual
        };
        Rc::new(Self {
            callback: RefCell::new(Box::new(callback)),
            order: options.order,
            mode,
            debug_label: options.debug_label.clone(),
        })
    }

    pub fn mode(&self) -> InvalidationMode {
        self.mode
    }

    pub fn order(&self) -> Option<f32> {
        self.order
    }

    /// Effective sort key: unset order sorts as 0
    pub fn sort_order(&self) -> f32 {
        self.order.unwrap_or(0.0)
    }

    pub fn debug_label(&self) -> Option<&str> {
        self.debug_label.as_deref()
    }

    pub(crate) fn invoke(&self, ctx: &FrameContext, delta: f64) -> Result<()> {
        (self.callback.borrow_mut())(ctx, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = FrameOptions::default();
        assert!(options.autostart);
        assert!(options.invalidate);
        assert_eq!(options.order, None);
        assert_eq!(options.debug_label, None);
    }

    #[test]
    fn test_option_builders() {
        let options = FrameOptions::new()
            .with_order(5.0)
            .with_autostart(false)
            .manual()
            .with_debug_label("physics");

        assert_eq!(options.order, Some(5.0));
        assert!(!options.autostart);
        assert!(!options.invalidate);
        assert_eq!(options.debug_label.as_deref(), Some("physics"));
    }

    #[test]
    fn test_mode_follows_invalidate_option() {
        let auto = FrameRecord::new(|_, _| Ok(()), &FrameOptions::default());
        assert_eq!(auto.mode(), InvalidationMode::Auto);

        let manual = FrameRecord::new(|_, _| Ok(()), &FrameOptions::new().manual());
        assert_eq!(manual.mode(), InvalidationMode::Manual);
    }

    #[test]
    fn test_unset_order_sorts_as_zero() {
        let record = FrameRecord::new(|_, _| Ok(()), &FrameOptions::default());
        assert_eq!(record.order(), None);
        assert_eq!(record.sort_order(), 0.0);

        let ordered = FrameRecord::new(|_, _| Ok(()), &FrameOptions::new().with_order(-2.5));
        assert_eq!(ordered.sort_order(), -2.5);
    }

    #[test]
    fn test_identity_not_value() {
        let options = FrameOptions::default();
        let a = FrameRecord::new(|_, _| Ok(()), &options);
        let b = FrameRecord::new(|_, _| Ok(()), &options);

        assert!(Rc::ptr_eq(&a, &a));
        assert!(!Rc::ptr_eq(&a, &b));
    }
}
