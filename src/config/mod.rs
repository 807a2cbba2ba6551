// SPDX-License-Identifier: MPL-2.0
//! User preferences stored in `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[identity]` - Simulated identity delays and code validity
//! - `[capture]` - Camera and classifier backends, canned analysis
//! - `[location]` - Location backend, GPS simulation and the reference bin
//!
//! Every field is optional; missing or out-of-range values fall back to the
//! constants in [`defaults`] through the accessor methods of each section.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. `--config-dir` or `ECO_WASTE_CONFIG_DIR`
//! 3. Platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use eco_waste::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("hi".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::capture::{WasteAnalysis, WasteCategory};
use crate::domain::geo::{AcceptanceRadius, BinSite, Coordinate};
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Backend selection
// =============================================================================

/// Camera adapter used by the capture flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CameraBackend {
    /// Simulated rear camera producing rendered snapshots.
    #[default]
    Placeholder,
    /// No camera; every photo is the fallback image.
    None,
}

/// Location adapter used by the capture flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LocationBackend {
    /// Random fixes around the reference bin.
    #[default]
    Simulated,
    /// Location permission refused; always the fallback position.
    Denied,
}

/// Waste classifier adapter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierBackend {
    /// Canned analysis from `[capture]`.
    #[default]
    Static,
    /// Classification always unavailable.
    None,
}

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "hi").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Simulated identity service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdentityConfig {
    /// Delay before the code is reported as sent (milliseconds).
    #[serde(default = "default_code_delay_ms", skip_serializing_if = "Option::is_none")]
    pub code_delay_ms: Option<u64>,

    /// Delay before the code is reported as verified (milliseconds).
    #[serde(
        default = "default_verify_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub verify_delay_ms: Option<u64>,

    /// Validity of a dispatched code (seconds).
    #[serde(
        default = "default_code_validity_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub code_validity_secs: Option<u64>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            code_delay_ms: default_code_delay_ms(),
            verify_delay_ms: default_verify_delay_ms(),
            code_validity_secs: default_code_validity_secs(),
        }
    }
}

impl IdentityConfig {
    #[must_use]
    pub fn code_delay(&self) -> Duration {
        let ms = self.code_delay_ms.unwrap_or(DEFAULT_CODE_DELAY_MS);
        Duration::from_millis(ms.min(MAX_SIMULATED_DELAY_MS))
    }

    #[must_use]
    pub fn verify_delay(&self) -> Duration {
        let ms = self.verify_delay_ms.unwrap_or(DEFAULT_VERIFY_DELAY_MS);
        Duration::from_millis(ms.min(MAX_SIMULATED_DELAY_MS))
    }

    #[must_use]
    pub fn code_validity(&self) -> Duration {
        let secs = self
            .code_validity_secs
            .unwrap_or(DEFAULT_CODE_VALIDITY_SECS)
            .clamp(MIN_CODE_VALIDITY_SECS, MAX_CODE_VALIDITY_SECS);
        Duration::from_secs(secs)
    }
}

/// Capture flow settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraBackend>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<ClassifierBackend>,

    /// Category reported by the static classifier (e.g. "mixed_plastic").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_category: Option<String>,

    /// Weight reported by the static classifier (kilograms).
    #[serde(
        default = "default_analysis_weight_kg",
        skip_serializing_if = "Option::is_none"
    )]
    pub analysis_weight_kg: Option<f64>,

    /// Points awarded by the static classifier.
    #[serde(
        default = "default_analysis_points",
        skip_serializing_if = "Option::is_none"
    )]
    pub analysis_points: Option<u32>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            camera: Some(CameraBackend::default()),
            classifier: Some(ClassifierBackend::default()),
            analysis_category: None,
            analysis_weight_kg: default_analysis_weight_kg(),
            analysis_points: default_analysis_points(),
        }
    }
}

impl CaptureConfig {
    /// Analysis returned by the static classifier.
    #[must_use]
    pub fn analysis(&self) -> WasteAnalysis {
        let category = self
            .analysis_category
            .as_deref()
            .and_then(WasteCategory::from_str_opt)
            .unwrap_or(WasteCategory::MixedPlastic);
        let weight = self
            .analysis_weight_kg
            .filter(|w| w.is_finite())
            .unwrap_or(DEFAULT_ANALYSIS_WEIGHT_KG)
            .clamp(0.0, MAX_ANALYSIS_WEIGHT_KG);
        let points = self
            .analysis_points
            .unwrap_or(DEFAULT_ANALYSIS_POINTS)
            .min(MAX_ANALYSIS_POINTS);
        WasteAnalysis::new(category, weight, points)
    }
}

/// Location and reference bin settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<LocationBackend>,

    /// Per-axis jitter of simulated fixes (degrees).
    #[serde(default = "default_gps_jitter_deg", skip_serializing_if = "Option::is_none")]
    pub jitter_deg: Option<f64>,

    /// Simulated time to obtain a fix (milliseconds).
    #[serde(
        default = "default_location_latency_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub latency_ms: Option<u64>,

    #[serde(default = "default_bin_latitude", skip_serializing_if = "Option::is_none")]
    pub bin_latitude: Option<f64>,

    #[serde(default = "default_bin_longitude", skip_serializing_if = "Option::is_none")]
    pub bin_longitude: Option<f64>,

    /// Radius around the bin accepted as a valid disposal (metres).
    #[serde(
        default = "default_acceptance_radius_m",
        skip_serializing_if = "Option::is_none"
    )]
    pub acceptance_radius_m: Option<f64>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: Some(LocationBackend::default()),
            jitter_deg: default_gps_jitter_deg(),
            latency_ms: default_location_latency_ms(),
            bin_latitude: default_bin_latitude(),
            bin_longitude: default_bin_longitude(),
            acceptance_radius_m: default_acceptance_radius_m(),
        }
    }
}

impl LocationConfig {
    /// Reference bin and acceptance radius, clamped to valid ranges.
    #[must_use]
    pub fn bin_site(&self) -> BinSite {
        let latitude = self
            .bin_latitude
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_BIN_LATITUDE);
        let longitude = self
            .bin_longitude
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_BIN_LONGITUDE);
        let radius = self
            .acceptance_radius_m
            .unwrap_or(DEFAULT_ACCEPTANCE_RADIUS_M);
        BinSite::new(
            Coordinate::new(latitude, longitude),
            AcceptanceRadius::new(radius),
        )
    }

    /// Stores `site` so that it is written on the next save.
    pub fn set_bin_site(&mut self, site: &BinSite) {
        self.bin_latitude = Some(site.location.latitude());
        self.bin_longitude = Some(site.location.longitude());
        self.acceptance_radius_m = Some(site.radius.metres());
    }

    #[must_use]
    pub fn jitter(&self) -> f64 {
        self.jitter_deg
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_GPS_JITTER_DEG)
            .clamp(0.0, MAX_GPS_JITTER_DEG)
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        let ms = self.latency_ms.unwrap_or(DEFAULT_LOCATION_LATENCY_MS);
        Duration::from_millis(ms.min(MAX_LOCATION_LATENCY_MS))
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub location: LocationConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_code_delay_ms() -> Option<u64> {
    Some(DEFAULT_CODE_DELAY_MS)
}

fn default_verify_delay_ms() -> Option<u64> {
    Some(DEFAULT_VERIFY_DELAY_MS)
}

fn default_code_validity_secs() -> Option<u64> {
    Some(DEFAULT_CODE_VALIDITY_SECS)
}

fn default_analysis_weight_kg() -> Option<f64> {
    Some(DEFAULT_ANALYSIS_WEIGHT_KG)
}

fn default_analysis_points() -> Option<u32> {
    Some(DEFAULT_ANALYSIS_POINTS)
}

fn default_gps_jitter_deg() -> Option<f64> {
    Some(DEFAULT_GPS_JITTER_DEG)
}

fn default_location_latency_ms() -> Option<u64> {
    Some(DEFAULT_LOCATION_LATENCY_MS)
}

fn default_bin_latitude() -> Option<f64> {
    Some(DEFAULT_BIN_LATITUDE)
}

fn default_bin_longitude() -> Option<f64> {
    Some(DEFAULT_BIN_LONGITUDE)
}

fn default_acceptance_radius_m() -> Option<f64> {
    Some(DEFAULT_ACCEPTANCE_RADIUS_M)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Load / Save
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns `(config, warning_key)`; on failure the default config is used.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from `base_dir`, or the default directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "config not loaded, using defaults");
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

/// Loads configuration from a specific file.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and [`Error::Config`]
/// when it is not valid TOML for [`Config`].
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration under `base_dir`, or the default directory.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific file, creating parent directories.
///
/// # Errors
///
/// Returns [`Error::Io`] on filesystem failures and [`Error::Config`] when
/// serialisation fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
