//! Sync and preview configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[serde(default)]` on every section means a config file only has to
//! name the values it changes; everything else falls back to
//! `Default::default()`. An empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use svgsync_syntax::DEFAULT_PROXIMITY;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What the highlighter looks at
    pub highlight: HighlightConfig,

    /// Fit and zoom behavior of the preview
    pub view: ViewConfig,

    /// Overlay colors and sizes
    pub overlay: OverlayConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Ignoring unreadable config: {}", err);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads from the default config path.
    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("svgsync").join("config.toml"))
    }

    /// Writes the config as TOML.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Highlighter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Tags whose `d` attribute holds path data
    pub drawing_tags: Vec<String>,

    /// Tags whose `points` attribute holds a vertex list
    pub point_list_tags: Vec<String>,

    /// Max distance (bytes) for the nearest-segment fallback
    pub proximity_threshold: usize,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            drawing_tags: vec!["path".to_string()],
            point_list_tags: vec!["polygon".to_string(), "polyline".to_string()],
            proximity_threshold: DEFAULT_PROXIMITY,
        }
    }
}

/// Preview view configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Space kept free around a fitted element, in container pixels
    pub padding: f64,

    /// Upper bound on the fit scale
    pub max_scale: f64,

    /// Factor applied per zoom in/out step
    pub zoom_step: f64,

    /// Container size used by headless rendering
    pub container_width: f64,
    pub container_height: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            max_scale: 10.0,
            zoom_step: 1.2,
            container_width: 800.0,
            container_height: 600.0,
        }
    }
}

/// Overlay appearance.
///
/// Sizes are ratios of the canvas extent so overlays look the same on a
/// 24-unit icon and a 2000-unit drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Segment stroke and point fill
    pub segment_color: String,

    /// Outline of point markers and dots
    pub point_outline_color: String,

    /// Control handles and control dots
    pub handle_color: String,

    /// Polygon vertices
    pub vertex_color: String,

    /// The vertex under the cursor
    pub active_vertex_color: String,

    /// Bounding box rectangle
    pub bounding_box_color: String,

    pub stroke_ratio: f64,
    pub point_ratio: f64,
    pub vertex_ratio: f64,
    pub active_vertex_ratio: f64,
    pub vertex_stroke_ratio: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            segment_color: "lime".to_string(),
            point_outline_color: "#00cc00".to_string(),
            handle_color: "#00ff88".to_string(),
            vertex_color: "blue".to_string(),
            active_vertex_color: "red".to_string(),
            bounding_box_color: "#ff00ff".to_string(),
            stroke_ratio: 0.006,
            point_ratio: 0.01,
            vertex_ratio: 0.008,
            active_vertex_ratio: 0.016,
            vertex_stroke_ratio: 0.003,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
