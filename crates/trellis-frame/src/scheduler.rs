//! Per-tick frame driver

use crate::clock::FrameClock;
use crate::context::{FrameContext, FrameInvalidation};
use crate::registry::HandlerRegistry;
use crate::renderer::Renderer;
use std::cell::RefCell;
use trellis_core::Result;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No frame was due; nothing ran and nothing drew
    Skipped,
    /// Handlers ran in order and a frame was drawn
    Rendered,
}

/// Drives one scheduler pass per rendered frame
///
/// Each tick: decide whether a frame is due, sort the registry if
/// dirty, dispatch every handler in order, then draw. Handlers run
/// strictly sequentially; registry mutations made during dispatch
/// become visible on the next tick.
pub struct FrameScheduler {
    clock: FrameClock,
    invalidation: FrameInvalidation,
    frame_count: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            clock: FrameClock::new(),
            invalidation: FrameInvalidation::new(),
            frame_count: 0,
        }
    }

    /// Handle to the shared frame-request flag
    pub fn invalidation(&self) -> FrameInvalidation {
        self.invalidation.clone()
    }

    /// Request a frame on the next tick
    pub fn invalidate(&self) {
        self.invalidation.invalidate();
    }

    /// Whether the next tick would render
    ///
    /// A frame is due while any auto-invalidating handler is
    /// registered, or when an explicit request is outstanding.
    pub fn frame_due(&self, registry: &HandlerRegistry) -> bool {
        registry.has_auto_handlers() || self.invalidation.pending()
    }

    /// Number of frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run one tick against the registry and draw through `renderer`
    ///
    /// Dispatch iterates a snapshot of the sorted union set, so a
    /// handler that starts or stops other handlers cannot change
    /// which handlers run this tick or their order. A handler
    /// returning `Err` is logged and skipped; the remaining handlers
    /// and the draw still run.
    pub fn tick<R: Renderer>(
        &mut self,
        registry: &RefCell<HandlerRegistry>,
        renderer: &mut R,
    ) -> Result<TickOutcome> {
        if !self.frame_due(&registry.borrow()) {
            return Ok(TickOutcome::Skipped);
        }

        // Consume the request up front: invalidations issued by the
        // handlers below belong to the next tick.
        self.invalidation.clear();

        let delta = self.clock.tick();
        self.frame_count += 1;
        let ctx = FrameContext::new(
            self.clock.total_time(),
            self.frame_count,
            self.invalidation.clone(),
        );

        // Registry borrow is released before dispatch so handlers may
        // start/stop handles freely.
        let snapshot = registry.borrow_mut().sorted_snapshot();
        for record in &snapshot {
            if let Err(err) = record.invoke(&ctx, delta) {
                match record.debug_label() {
                    Some(label) => log::error!("frame handler '{label}' failed: {err}"),
                    None => log::error!("frame handler failed: {err}"),
                }
            }
        }

        renderer.draw(&ctx)?;
        Ok(TickOutcome::Rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{FrameOptions, FrameRecord};
    use std::rc::Rc;

    struct CountingRenderer {
        frames: u32,
    }

    impl CountingRenderer {
        fn new() -> Self {
            Self { frames: 0 }
        }
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, _ctx: &FrameContext) -> Result<()> {
            self.frames += 1;
            Ok(())
        }
    }

    fn registry_with(records: &[Rc<FrameRecord>]) -> RefCell<HandlerRegistry> {
        let mut registry = HandlerRegistry::new();
        for record in records {
            registry.insert(record);
        }
        RefCell::new(registry)
    }

    #[test]
    fn test_no_handlers_no_frame() {
        let registry = RefCell::new(HandlerRegistry::new());
        let mut scheduler = FrameScheduler::new();
        let mut renderer = CountingRenderer::new();

        assert_eq!(
            scheduler.tick(&registry, &mut renderer).unwrap(),
            TickOutcome::Skipped
        );
        assert_eq!(renderer.frames, 0);
        assert_eq!(scheduler.frame_count(), 0);
    }

    #[test]
    fn test_auto_handler_keeps_rendering() {
        let record = FrameRecord::new(|_, _| Ok(()), &FrameOptions::default());
        let registry = registry_with(&[record]);
        let mut scheduler = FrameScheduler::new();
        let mut renderer = CountingRenderer::new();

        for _ in 0..3 {
            assert_eq!(
                scheduler.tick(&registry, &mut renderer).unwrap(),
                TickOutcome::Rendered
            );
        }
        assert_eq!(renderer.frames, 3);
        assert_eq!(scheduler.frame_count(), 3);
    }

    #[test]
    fn test_manual_handler_renders_only_on_request() {
        let calls = Rc::new(RefCell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        let record = FrameRecord::new(
            move |_, _| {
                *calls_clone.borrow_mut() += 1;
                Ok(())
            },
            &FrameOptions::new().manual(),
        );
        let registry = registry_with(&[record]);
        let mut scheduler = FrameScheduler::new();
        let mut renderer = CountingRenderer::new();

        // No request: nothing renders, handler never runs
        for _ in 0..3 {
            assert_eq!(
                scheduler.tick(&registry, &mut renderer).unwrap(),
                TickOutcome::Skipped
            );
        }
        assert_eq!(*calls.borrow(), 0);

        // One request: exactly one frame, then quiet again
        scheduler.invalidate();
        assert_eq!(
            scheduler.tick(&registry, &mut renderer).unwrap(),
            TickOutcome::Rendered
        );
        assert_eq!(
            scheduler.tick(&registry, &mut renderer).unwrap(),
            TickOutcome::Skipped
        );
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(renderer.frames, 1);
    }

    #[test]
    fn test_dispatch_in_sorted_order() {
        let log = Rc::new(RefCell::new(Vec::new()));

        let make = |name: &'static str, options: FrameOptions| {
            let log = Rc::clone(&log);
            FrameRecord::new(
                move |_, _| {
                    log.borrow_mut().push(name);
                    Ok(())
                },
                &options,
            )
        };

        // Registered in sequence: A(10), B(5), C(unset)
        let a = make("a", FrameOptions::new().with_order(10.0));
        let b = make("b", FrameOptions::new().with_order(5.0));
        let c = make("c", FrameOptions::default());

        let registry = registry_with(&[a, b, c]);
        let mut scheduler = FrameScheduler::new();
        let mut renderer = CountingRenderer::new();

        scheduler.tick(&registry, &mut renderer).unwrap();
        assert_eq!(*log.borrow(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_handler_error_does_not_stop_siblings() {
        let log = Rc::new(RefCell::new(Vec::new()));

        let ok1 = {
            let log = Rc::clone(&log);
            FrameRecord::new(
                move |_, _| {
                    log.borrow_mut().push("first");
                    Ok(())
                },
                &FrameOptions::new().with_order(1.0),
            )
        };
        let failing = FrameRecord::new(
            |_, _| Err(trellis_core::TrellisError::HandlerError("boom".into())),
            &FrameOptions::new().with_order(2.0).with_debug_label("bad"),
        );
        let ok2 = {
            let log = Rc::clone(&log);
            FrameRecord::new(
                move |_, _| {
                    log.borrow_mut().push("last");
                    Ok(())
                },
                &FrameOptions::new().with_order(3.0),
            )
        };

        let registry = registry_with(&[ok1, failing, ok2]);
        let mut scheduler = FrameScheduler::new();
        let mut renderer = CountingRenderer::new();

        // The tick itself succeeds and still draws
        assert_eq!(
            scheduler.tick(&registry, &mut renderer).unwrap(),
            TickOutcome::Rendered
        );
        assert_eq!(*log.borrow(), vec!["first", "last"]);
        assert_eq!(renderer.frames, 1);

        // Registry state is untouched by the failure
        assert_eq!(registry.borrow().len(), 3);
        assert_eq!(
            scheduler.tick(&registry, &mut renderer).unwrap(),
            TickOutcome::Rendered
        );
    }

    #[test]
    fn test_mid_tick_insert_lands_next_tick() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = Rc::new(RefCell::new(HandlerRegistry::new()));

        let late = {
            let log = Rc::clone(&log);
            FrameRecord::new(
                move |_, _| {
                    log.borrow_mut().push("late");
                    Ok(())
                },
                // Order -1 would run before the inserter if it leaked
                // into the current tick
                &FrameOptions::new().with_order(-1.0),
            )
        };

        let inserter = {
            let log = Rc::clone(&log);
            let registry = Rc::clone(&registry);
            let late = Rc::clone(&late);
            FrameRecord::new(
                move |_, _| {
                    log.borrow_mut().push("inserter");
                    registry.borrow_mut().insert(&late);
                    Ok(())
                },
                &FrameOptions::default(),
            )
        };

        registry.borrow_mut().insert(&inserter);
        let mut scheduler = FrameScheduler::new();
        let mut renderer = CountingRenderer::new();

        scheduler.tick(&registry, &mut renderer).unwrap();
        assert_eq!(*log.borrow(), vec!["inserter"]);

        scheduler.tick(&registry, &mut renderer).unwrap();
        assert_eq!(*log.borrow(), vec!["inserter", "late", "inserter"]);
    }

    #[test]
    fn test_mid_tick_remove_lands_next_tick() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = Rc::new(RefCell::new(HandlerRegistry::new()));

        let victim = {
            let log = Rc::clone(&log);
            FrameRecord::new(
                move |_, _| {
                    log.borrow_mut().push("victim");
                    Ok(())
                },
                &FrameOptions::new().with_order(2.0),
            )
        };

        let remover = {
            let registry = Rc::clone(&registry);
            let victim = Rc::clone(&victim);
            FrameRecord::new(
                move |_, _| {
                    registry.borrow_mut().remove(&victim);
                    Ok(())
                },
                &FrameOptions::new().with_order(1.0),
            )
        };

        registry.borrow_mut().insert(&remover);
        registry.borrow_mut().insert(&victim);
        let mut scheduler = FrameScheduler::new();
        let mut renderer = CountingRenderer::new();

        // Victim still runs this tick despite being removed first
        scheduler.tick(&registry, &mut renderer).unwrap();
        assert_eq!(*log.borrow(), vec!["victim"]);

        scheduler.tick(&registry, &mut renderer).unwrap();
        assert_eq!(*log.borrow(), vec!["victim"]);
    }

    #[test]
    fn test_invalidate_during_dispatch_schedules_next_tick() {
        let registry = Rc::new(RefCell::new(HandlerRegistry::new()));
        let ticks = Rc::new(RefCell::new(0u32));

        let ticks_clone = Rc::clone(&ticks);
        let record = FrameRecord::new(
            move |ctx, _| {
                let mut count = ticks_clone.borrow_mut();
                *count += 1;
                // Request one follow-up frame, once
                if *count == 1 {
                    ctx.invalidate();
                }
                Ok(())
            },
            &FrameOptions::new().manual(),
        );
        registry.borrow_mut().insert(&record);

        let mut scheduler = FrameScheduler::new();
        let mut renderer = CountingRenderer::new();

        scheduler.invalidate();
        assert_eq!(
            scheduler.tick(&registry, &mut renderer).unwrap(),
            TickOutcome::Rendered
        );
        // The in-dispatch request produces exactly one more frame
        assert_eq!(
            scheduler.tick(&registry, &mut renderer).unwrap(),
            TickOutcome::Rendered
        );
        assert_eq!(
            scheduler.tick(&registry, &mut renderer).unwrap(),
            TickOutcome::Skipped
        );
        assert_eq!(*ticks.borrow(), 2);
    }

    #[test]
    fn test_frame_due_tracks_auto_and_requests() {
        let registry = RefCell::new(HandlerRegistry::new());
        let scheduler = FrameScheduler::new();

        assert!(!scheduler.frame_due(&registry.borrow()));

        scheduler.invalidate();
        assert!(scheduler.frame_due(&registry.borrow()));
        scheduler.invalidation().clear();

        let auto = FrameRecord::new(|_, _| Ok(()), &FrameOptions::default());
        registry.borrow_mut().insert(&auto);
        assert!(scheduler.frame_due(&registry.borrow()));
    }
}
