//! Trellis XR - Current input device tracking
//!
//! Exposes the session's controllers as handedness-keyed observable
//! cells. Each cell holds the current controller or nothing; writes
//! are last-write-wins with no queuing.

mod controller;

pub use controller::{Controller, ControllerCells, Handedness};
