//! Application configuration loaded from TOML

use serde::{Deserialize, Serialize};
use std::path::Path;
use trellis_core::{Result, TrellisError};

/// Root structure of a Trellis application config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub clear_color: ColorConfig,
}

/// Window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_title() -> String {
    "Trellis".to_string()
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Surface clear color, linear RGBA in 0..=1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            r: 0.05,
            g: 0.05,
            b: 0.08,
            a: 1.0,
        }
    }
}

impl ColorConfig {
    pub fn to_wgpu(&self) -> wgpu::Color {
        wgpu::Color {
            r: self.r,
            g: self.g,
            b: self.b,
            a: self.a,
        }
    }
}

impl AppConfig {
    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| TrellisError::ConfigError(e.to_string()))
    }

    /// Load a config file, falling back to defaults when it does not
    /// exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.window.title, "Trellis");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert!((config.clear_color.a - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [window]
            title = "Demo"

            [clear_color]
            r = 0.1
            g = 0.2
            b = 0.3
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Demo");
        // Unset fields fall back to defaults
        assert_eq!(config.window.width, 1280);
        assert!((config.clear_color.a - 1.0).abs() < 1e-10);
        assert!((config.clear_color.g - 0.2).abs() < 1e-10);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.window.height, 720);
    }

    #[test]
    fn test_invalid_config_reports_error() {
        let result: std::result::Result<AppConfig, _> = toml::from_str("window = 3");
        assert!(result.is_err());
    }
}
