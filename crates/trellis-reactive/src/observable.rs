//! Shared observable value with change notification

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    subscribers: Vec<(u64, Callback<T>)>,
    next_id: u64,
}

/// A shared, subscribable value cell
///
/// Cloning an `Observable` produces another handle to the same cell.
/// Setting a value equal to the current one is a no-op: no
/// notification is delivered. Subscribers are notified in
/// subscription order, after the value has been stored.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Observable<T> {
    /// Create a new cell holding `value`
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Access the current value by reference
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Register a callback invoked after every value change
    ///
    /// The callback stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription
    where
        T: 'static,
    {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Rc::new(f)));
            id
        };

        let weak = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl<T: Clone> Observable<T> {
    /// Get a clone of the current value
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Store a new value and notify subscribers
    ///
    /// No-op when the new value equals the current one.
    pub fn set(&self, value: T) {
        // Store first, then notify with no borrow held so callbacks
        // may read, set, or subscribe without re-entrant panics.
        let notified = value.clone();
        let callbacks: Vec<Callback<T>> = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.subscribers.iter().map(|(_, cb)| Rc::clone(cb)).collect()
        };

        for cb in callbacks {
            cb(&notified);
        }
    }
}

/// Guard for a single [`Observable::subscribe`] registration
///
/// Dropping the guard removes the callback before the next
/// notification cycle. Outliving the observable is fine; the guard
/// becomes inert.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Detach the guard, leaving the callback registered for the
    /// lifetime of the observable
    pub fn forget(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}
