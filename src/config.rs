//! Editor configuration module.
//!
//! Handles loading, validating, and merging `phototune.toml`. Stock defaults
//! are overridden by whatever keys the user file sets; everything else keeps
//! its default.
//!
//! ## Config File Location
//!
//! `phototune.toml` in the working directory is picked up automatically.
//! `--config <path>` loads a specific file instead (and fails if it's missing).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! default_image = "images/default.jpg"  # Opened on startup when set
//!
//! [display]
//! width = 1280              # Preview area width in pixels
//! height = 720              # Preview area height in pixels
//! filter = "triangle"       # nearest | triangle | catmull-rom | gaussian | lanczos3
//!
//! [sliders.saturation]
//! min = -1.0
//! max = 3.0
//!
//! [sliders.sharpness]
//! min = -1.0
//! max = 3.0
//!
//! [sliders.contrast]
//! min = -1.0
//! max = 3.0
//!
//! [sliders.brightness]
//! min = 0.0                 # Must not be negative
//! max = 3.0
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Adjustment, SliderRange};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "phototune.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Editor configuration loaded from `phototune.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Image opened when no input is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_image: Option<String>,
    /// Preview area settings.
    pub display: DisplayConfig,
    /// Range each factor control reports within.
    pub sliders: SlidersConfig,
}

impl EditorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::Validation(
                "display.width and display.height must be non-zero".into(),
            ));
        }
        for adjustment in Adjustment::ALL {
            let range = self.sliders.range(adjustment);
            if !range.min.is_finite() || !range.max.is_finite() {
                return Err(ConfigError::Validation(format!(
                    "sliders.{adjustment} bounds must be finite"
                )));
            }
            if range.min > range.max {
                return Err(ConfigError::Validation(format!(
                    "sliders.{adjustment}.min must not exceed max"
                )));
            }
        }
        if self.sliders.brightness.min < 0.0 {
            return Err(ConfigError::Validation(
                "sliders.brightness.min must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Preview area settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    /// Resampling filter for the working image.
    pub filter: ResizeFilter,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            filter: ResizeFilter::Triangle,
        }
    }
}

/// Resampling filters, named as in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Slider bounds for each adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlidersConfig {
    pub saturation: SliderRange,
    pub sharpness: SliderRange,
    pub contrast: SliderRange,
    pub brightness: SliderRange,
}

impl Default for SlidersConfig {
    fn default() -> Self {
        Self {
            saturation: SliderRange::new(-1.0, 3.0),
            sharpness: SliderRange::new(-1.0, 3.0),
            contrast: SliderRange::new(-1.0, 3.0),
            brightness: SliderRange::new(0.0, 3.0),
        }
    }
}

impl SlidersConfig {
    pub fn range(&self, adjustment: Adjustment) -> SliderRange {
        match adjustment {
            Adjustment::Saturation => self.saturation,
            Adjustment::Sharpness => self.sharpness,
            Adjustment::Contrast => self.contrast,
            Adjustment::Brightness => self.brightness,
        }
    }

    /// Clamp and round a raw control value for `adjustment`.
    pub fn apply(&self, adjustment: Adjustment, value: f32) -> f32 {
        self.range(adjustment).apply(value)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(EditorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<EditorConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: EditorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `phototune.toml` from `dir`, falling back to defaults when absent.
pub fn load_config(dir: &Path) -> Result<EditorConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return resolve_config(None);
    }
    load_config_file(&config_path)
}

/// Load a specific config file. A missing file is an error.
pub fn load_config_file(path: &Path) -> Result<EditorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `phototune.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# phototune configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as ./phototune.toml or pass --config <path>.
# Unknown keys will cause an error.

# Image opened when a session starts without an explicit input.
# default_image = "images/default.jpg"

# ---------------------------------------------------------------------------
# Preview area
# ---------------------------------------------------------------------------
[display]
# Size of the area the working image is fitted into, in pixels.
width = 1280
height = 720

# Resampling filter used to derive the working image.
# One of: nearest, triangle, catmull-rom, gaussian, lanczos3
filter = "triangle"

# ---------------------------------------------------------------------------
# Factor sliders
# ---------------------------------------------------------------------------
# Every factor is 1.0 at rest. Input is clamped to [min, max] and rounded to
# two decimals before it reaches the pipeline.

[sliders.saturation]
min = -1.0
max = 3.0

[sliders.sharpness]
min = -1.0
max = 3.0

[sliders.contrast]
min = -1.0
max = 3.0

# Brightness has no negative range.
[sliders.brightness]
min = 0.0
max = 3.0
"##
}
