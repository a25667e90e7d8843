//! Trellis App - Windowed render-loop driver
//!
//! This crate provides the `TrellisApp` application handler that owns
//! the render root, drives scheduler ticks from winit's event loop,
//! and degrades gracefully when no display is available.

mod app;
mod config;

pub use app::TrellisApp;
pub use config::{AppConfig, ColorConfig, WindowConfig};
