//! Trellis Core - Foundational types for the Trellis rendering library
//!
//! This crate provides the types every other Trellis crate depends on:
//! - `TrellisError` - the workspace-wide error enum
//! - `Result` - result alias over `TrellisError`

mod error;

pub use error::{Result, TrellisError};
