//! Per-tick context shared with every frame handler

use std::cell::Cell;
use std::rc::Rc;

/// Shared flag through which a single frame is explicitly requested
///
/// Cloning yields another handle to the same flag. The scheduler
/// consumes the flag when it starts a frame, so one request produces
/// exactly one rendered frame (unless auto handlers keep the loop
/// running anyway).
#[derive(Clone, Default)]
pub struct FrameInvalidation {
    requested: Rc<Cell<bool>>,
}

impl FrameInvalidation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that a frame be rendered on the next tick
    pub fn invalidate(&self) {
        self.requested.set(true);
    }

    /// Whether a frame request is outstanding
    pub fn pending(&self) -> bool {
        self.requested.get()
    }

    pub(crate) fn clear(&self) {
        self.requested.set(false);
    }
}

/// Context handed to every handler on every rendered frame
///
/// Carries the loop's time bookkeeping and the invalidation handle
/// manual-mode handlers use to request further frames.
pub struct FrameContext {
    total_time: f64,
    frame_count: u64,
    invalidation: FrameInvalidation,
}

impl FrameContext {
    pub(crate) fn new(total_time: f64, frame_count: u64, invalidation: FrameInvalidation) -> Self {
        Self {
            total_time,
            frame_count,
            invalidation,
        }
    }

    /// Total elapsed time across rendered frames in seconds
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Number of frames rendered so far, including this one
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Request a frame on the next tick
    ///
    /// This is the mechanism manual-mode handlers use; requests made
    /// during dispatch schedule the *next* tick, never re-enter the
    /// current one.
    pub fn invalidate(&self) {
        self.invalidation.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidation_flag() {
        let flag = FrameInvalidation::new();
        assert!(!flag.pending());

        flag.invalidate();
        assert!(flag.pending());

        flag.clear();
        assert!(!flag.pending());
    }

    #[test]
    fn test_clones_share_flag() {
        let flag = FrameInvalidation::new();
        let other = flag.clone();

        other.invalidate();
        assert!(flag.pending());
    }

    #[test]
    fn test_context_invalidate_reaches_flag() {
        let flag = FrameInvalidation::new();
        let ctx = FrameContext::new(1.5, 3, flag.clone());

        assert_eq!(ctx.total_time(), 1.5);
        assert_eq!(ctx.frame_count(), 3);

        ctx.invalidate();
        assert!(flag.pending());
    }
}
