//! Agromap Settings Crate
//!
//! Handles editor configuration: geometry tolerances, drawing defaults,
//! geocoder endpoint and camera preferences.

pub mod config;
pub mod error;

pub use config::{EditorConfig, GeometrySettings, MapSettings, SearchSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
