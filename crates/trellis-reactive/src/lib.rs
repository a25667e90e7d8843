//! Trellis Reactive - Single-threaded observable cells
//!
//! Provides the change-notification primitive used across Trellis:
//! - `Observable<T>` - a shared value with subscriber callbacks
//! - `Subscription` - guard that unsubscribes when dropped
//!
//! Observables are single-threaded (`Rc`-based), matching the
//! cooperative scheduling model of the frame loop.

mod observable;

pub use observable::{Observable, Subscription};
