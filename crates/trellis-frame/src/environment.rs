//! Render environment detection

/// Whether a render loop can exist at all
///
/// `Headless` is a first-class degenerate mode, not an error:
/// registration yields inert handles and no handler ever runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderCapability {
    /// A display is available; the loop runs normally
    Windowed,
    /// No display; handles are inert and nothing renders
    Headless,
}

impl RenderCapability {
    /// Detect display availability for the current process
    pub fn detect() -> Self {
        #[cfg(target_os = "linux")]
        {
            use std::env;
            if env::var_os("DISPLAY").is_none() && env::var_os("WAYLAND_DISPLAY").is_none() {
                return Self::Headless;
            }
        }
        Self::Windowed
    }

    pub fn is_headless(self) -> bool {
        self == Self::Headless
    }
}
