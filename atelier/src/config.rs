use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Kiosk configuration, read from a TOML file. Every field has a default,
/// so the kiosk runs with no configuration at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding one `<style>.onnx` artifact per catalog entry.
    pub model_dir: Option<PathBuf>,

    /// Directory captures and styled outputs are written to.
    pub images_dir: Option<PathBuf>,

    pub capture: CaptureConfig,
    pub viewer: ViewerConfig,

    /// Per-style intensity scale overrides, for artifacts trained with a
    /// normalization other than raw 0-255.
    pub scales: HashMap<String, ScaleConfig>,
}

/// Settings for the external still-image tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    pub command: String,
    pub width: u32,
    pub height: u32,
    pub timeout_ms: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            command: "rpicam-still".into(),
            width: 1920,
            height: 1080,
            timeout_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Viewer command line, e.g. `["feh", "--fullscreen"]`; the styled
    /// image path is appended. When empty, the platform opener is used.
    pub command: Vec<String>,

    /// Process name to kill before launching the viewer, so a kiosk screen
    /// shows one image at a time.
    pub replace: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleConfig {
    pub input: f32,
    pub output: f32,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str(&data)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Load an explicit config file, or the default location when it
    /// exists, or the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("atelier/config.toml"))
}
