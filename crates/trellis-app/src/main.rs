//! Trellis demo binary
//!
//! Opens a window, registers a few frame handlers, and runs the loop.
//! Reads `trellis.toml` from the working directory when present.
//!
//! Usage:
//!   trellis-app [config.toml]

use anyhow::Result;
use trellis_app::{AppConfig, TrellisApp};
use trellis_frame::FrameOptions;

fn main() -> Result<()> {
    env_logger::init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "trellis.toml".to_string());
    let config = AppConfig::load_or_default(&config_path)?;

    let app = TrellisApp::new(config);
    let ctx = app.context();

    // Frame-rate report once per second of accumulated frame time
    let mut frames = 0u32;
    let mut elapsed = 0.0f64;
    let _heartbeat = ctx.on_frame(
        move |_, delta| {
            frames += 1;
            elapsed += delta;
            if elapsed >= 1.0 {
                log::info!("{frames} frames in {elapsed:.2}s");
                frames = 0;
                elapsed = 0.0;
            }
            Ok(())
        },
        FrameOptions::new().with_debug_label("heartbeat"),
    )?;

    // Late handler: runs after everything else on each frame
    let _tail = ctx.on_frame(
        |frame, _| {
            log::trace!("frame {} complete", frame.frame_count());
            Ok(())
        },
        FrameOptions::new()
            .with_order(100.0)
            .with_debug_label("frame-tail"),
    )?;

    app.run()
}
