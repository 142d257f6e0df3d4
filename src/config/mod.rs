// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[viewer]` - Drag sensitivity, zoom step and autoplay cadence
//! - `[preload]` - Per-frame timeout, image cache capacity and frame limit
//!
//! Every field is optional; missing or out-of-range values resolve to the
//! defaults in [`defaults`] when turned into [`ViewerTuning`] or
//! [`PreloadSettings`].
//!
//! # Examples
//!
//! ```no_run
//! use iced_turntable::config;
//!
//! let (mut config, _warning) = config::load();
//! config.viewer.drag_sensitivity_px = Some(2.0);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::media::PreloadSettings;
use crate::ui::state::{DragSensitivity, ZoomStep};
use crate::ui::viewer::{AutoplayCadence, ViewerTuning};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Viewer interaction settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    /// Pixels of horizontal drag per frame step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag_sensitivity_px: Option<f32>,

    /// Scale change per zoom in/out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_step: Option<f32>,

    /// Per-frame autoplay interval for sparse frame sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slow_interval_ms: Option<u64>,

    /// Per-frame autoplay interval for dense frame sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast_interval_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub few_frames_threshold: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub many_frames_threshold: Option<usize>,
}

/// Frame preloading settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PreloadConfig {
    /// Seconds allowed for a single frame to fetch and decode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Bound on the shared image cache. Absent means never evict.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_capacity: Option<usize>,

    /// Maximum frames kept from one product's image list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_frames: Option<usize>,
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub preload: PreloadConfig,
}

impl Config {
    /// Resolves the viewer section into validated tuning values.
    #[must_use]
    pub fn viewer_tuning(&self) -> ViewerTuning {
        let viewer = &self.viewer;
        let interval = |ms: Option<u64>, default: u64| {
            Duration::from_millis(ms.unwrap_or(default).clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS))
        };

        ViewerTuning {
            drag_sensitivity: viewer
                .drag_sensitivity_px
                .map(DragSensitivity::new)
                .unwrap_or_default(),
            zoom_step: viewer.zoom_step.map(ZoomStep::new).unwrap_or_default(),
            cadence: AutoplayCadence::new(
                interval(viewer.slow_interval_ms, DEFAULT_SLOW_INTERVAL_MS),
                interval(viewer.fast_interval_ms, DEFAULT_FAST_INTERVAL_MS),
                viewer
                    .few_frames_threshold
                    .unwrap_or(DEFAULT_FEW_FRAMES_THRESHOLD),
                viewer
                    .many_frames_threshold
                    .unwrap_or(DEFAULT_MANY_FRAMES_THRESHOLD),
            ),
        }
    }

    /// Resolves the preload section into validated settings.
    #[must_use]
    pub fn preload_settings(&self) -> PreloadSettings {
        let preload = &self.preload;
        PreloadSettings {
            timeout: Duration::from_secs(
                preload
                    .timeout_secs
                    .unwrap_or(DEFAULT_PRELOAD_TIMEOUT_SECS)
                    .clamp(MIN_PRELOAD_TIMEOUT_SECS, MAX_PRELOAD_TIMEOUT_SECS),
            ),
            cache_capacity: preload
                .cache_capacity
                .and_then(|c| NonZeroUsize::new(c.max(MIN_CACHE_CAPACITY))),
            max_frames: preload.max_frames.unwrap_or(DEFAULT_MAX_FRAMES).max(1),
        }
    }
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable settings");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
