//! Configuration for the boundary editor
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Geometry tolerances (simplification, overlap, circle tessellation)
//! - Location search (geocoder endpoint, result limit)
//! - Map camera preferences

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Geometry engine tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Douglas-Peucker tolerance applied after freehand strokes, in metres
    pub simplify_tolerance_m: f64,
    /// Intersection area with a sibling above which it counts as overlap, in m²
    pub overlap_tolerance_m2: f64,
    /// Number of vertices used to tessellate a drawn circle
    pub circle_segments: usize,
    /// Spline samples generated per ring edge when smoothing
    pub smooth_samples_per_segment: usize,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            simplify_tolerance_m: 2.5,
            overlap_tolerance_m2: 10.0,
            circle_segments: 64,
            smooth_samples_per_segment: 8,
        }
    }
}

/// Location search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Geocoder search endpoint (Nominatim-compatible)
    pub endpoint: String,
    /// User agent sent with every lookup
    pub user_agent: String,
    /// Maximum number of candidates requested
    pub result_limit: usize,
    /// Camera zoom used when flying to a search result
    pub fly_to_zoom: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: format!("agromap/{}", env!("CARGO_PKG_VERSION")),
            result_limit: 5,
            fly_to_zoom: 15.0,
        }
    }
}

/// Map camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Padding applied when fitting the camera to a boundary, in pixels
    pub fit_padding_px: u32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self { fit_padding_px: 40 }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    /// Geometry tolerances
    pub geometry: GeometrySettings,
    /// Location search
    pub search: SearchSettings,
    /// Map camera
    pub map: MapSettings,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config location: `<config dir>/agromap/editor.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(base.join("agromap").join("editor.toml"))
    }

    /// Load the config from the default location, falling back to defaults
    /// when no file exists yet.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!("No editor config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let g = &self.geometry;
        if !(g.simplify_tolerance_m.is_finite() && g.simplify_tolerance_m > 0.0) {
            return Err(SettingsError::invalid(
                "geometry.simplify_tolerance_m",
                "must be > 0",
            ));
        }
        if !(g.overlap_tolerance_m2.is_finite() && g.overlap_tolerance_m2 >= 0.0) {
            return Err(SettingsError::invalid(
                "geometry.overlap_tolerance_m2",
                "must be >= 0",
            ));
        }
        if g.circle_segments < 8 {
            return Err(SettingsError::invalid(
                "geometry.circle_segments",
                "must be at least 8",
            ));
        }
        if g.smooth_samples_per_segment == 0 {
            return Err(SettingsError::invalid(
                "geometry.smooth_samples_per_segment",
                "must be > 0",
            ));
        }

        if self.search.endpoint.trim().is_empty() {
            return Err(SettingsError::invalid("search.endpoint", "must not be empty"));
        }
        if self.search.result_limit == 0 {
            return Err(SettingsError::invalid("search.result_limit", "must be > 0"));
        }
        if !(self.search.fly_to_zoom.is_finite() && self.search.fly_to_zoom > 0.0) {
            return Err(SettingsError::invalid("search.fly_to_zoom", "must be > 0"));
        }

        Ok(())
    }
}

enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}
