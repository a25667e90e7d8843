//! Handler registry with deferred ordering

use crate::handler::{FrameRecord, InvalidationMode};
use std::rc::Rc;

/// The render loop's three handler collections
///
/// `all` is the authoritative execution order; it always contains
/// exactly the union of `auto` and `manual`. Sorting is deferred:
/// mutations mark the registry dirty and the scheduler sorts at most
/// once per tick, never per mutation.
pub struct HandlerRegistry {
    auto: Vec<Rc<FrameRecord>>,
    manual: Vec<Rc<FrameRecord>>,
    all: Vec<Rc<FrameRecord>>,
    needs_sort: bool,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            auto: Vec::new(),
            manual: Vec::new(),
            all: Vec::new(),
            needs_sort: false,
        }
    }

    /// Add a record to its mode set and the union set
    ///
    /// Idempotent: a record already present is left untouched.
    pub fn insert(&mut self, record: &Rc<FrameRecord>) {
        let mode_set = match record.mode() {
            InvalidationMode::Auto => &mut self.auto,
            InvalidationMode::Manual => &mut self.manual,
        };
        if !contains(mode_set, record) {
            mode_set.push(Rc::clone(record));
        }
        if !contains(&self.all, record) {
            self.all.push(Rc::clone(record));
        }
        self.needs_sort = true;
    }

    /// Remove a record from its mode set and the union set
    ///
    /// No-op when the record is absent.
    pub fn remove(&mut self, record: &Rc<FrameRecord>) {
        let mode_set = match record.mode() {
            InvalidationMode::Auto => &mut self.auto,
            InvalidationMode::Manual => &mut self.manual,
        };
        mode_set.retain(|r| !Rc::ptr_eq(r, record));
        self.all.retain(|r| !Rc::ptr_eq(r, record));
        // Set conservatively; removal itself never reorders survivors
        self.needs_sort = true;
    }

    /// Whether a record is currently registered
    pub fn contains(&self, record: &Rc<FrameRecord>) -> bool {
        contains(&self.all, record)
    }

    /// Re-sort the union set if any mutation happened since the last
    /// sort
    ///
    /// Stable sort on the effective order key, so records with equal
    /// (or unset) keys keep their insertion order.
    pub fn sort_if_needed(&mut self) {
        if self.needs_sort {
            self.all
                .sort_by(|a, b| a.sort_order().total_cmp(&b.sort_order()));
            self.needs_sort = false;
        }
    }

    /// Handlers in execution order, sorting first if required
    pub(crate) fn sorted_snapshot(&mut self) -> Vec<Rc<FrameRecord>> {
        self.sort_if_needed();
        self.all.clone()
    }

    /// Whether any auto-invalidating handler is registered
    pub fn has_auto_handlers(&self) -> bool {
        !self.auto.is_empty()
    }

    /// Total number of registered handlers
    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

fn contains(set: &[Rc<FrameRecord>], record: &Rc<FrameRecord>) -> bool {
    set.iter().any(|r| Rc::ptr_eq(r, record))
}
