use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::filter::{BoundsError, FilterBounds};
use crate::data::generator::{DEFAULT_ROWS, DEFAULT_SEED};
use crate::map::{DEFAULT_RADIUS_M, ViewState};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "AIRE_MONITOR_CONFIG";
/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "aire-monitor.toml";
/// Deepest zoom level web map tiles go to.
pub const MAX_ZOOM: f64 = 24.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("rows must be positive, got 0")]
    NoRows,
    #[error("point radius must be a positive number of metres, got {0}")]
    BadRadius(f64),
    #[error("view latitude must be a finite value strictly between -90 and 90, got {0}")]
    BadLatitude(f64),
    #[error("view longitude must be a finite value in [-180, 180], got {0}")]
    BadLongitude(f64),
    #[error("view zoom must be a finite value in [0, 24], got {0}")]
    BadZoom(f64),
    #[error("minimum point size must be a positive number of pixels, got {0}")]
    BadMinPointPx(f32),
    #[error("initial bounds: {0}")]
    Bounds(#[from] BoundsError),
}

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Startup settings. Every field has a default, so a partial TOML file
/// only overrides what it names.
///
/// ```toml
/// rows = 250
/// seed = 7
///
/// [initial_bounds]
/// pm25_max = 80.0
/// pm10_max = 150.0
/// co_max = 2.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub rows: usize,
    pub seed: u64,
    pub initial_bounds: FilterBounds,
    pub view: ViewState,
    /// Scatter point radius in metres.
    pub point_radius_m: f64,
    /// Points never shrink below this many pixels on screen.
    pub min_point_px: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            seed: DEFAULT_SEED,
            initial_bounds: FilterBounds::default(),
            view: ViewState::default(),
            point_radius_m: DEFAULT_RADIUS_M,
            min_point_px: 3.0,
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if !(self.point_radius_m.is_finite() && self.point_radius_m > 0.0) {
            return Err(ConfigError::BadRadius(self.point_radius_m));
        }
        if !(self.min_point_px.is_finite() && self.min_point_px > 0.0) {
            return Err(ConfigError::BadMinPointPx(self.min_point_px));
        }
        let view = &self.view;
        // Mercator scale is undefined at the poles.
        if !(view.latitude.is_finite() && view.latitude.abs() < 90.0) {
            return Err(ConfigError::BadLatitude(view.latitude));
        }
        if !(view.longitude.is_finite() && view.longitude.abs() <= 180.0) {
            return Err(ConfigError::BadLongitude(view.longitude));
        }
        if !(view.zoom.is_finite() && (0.0..=MAX_ZOOM).contains(&view.zoom)) {
            return Err(ConfigError::BadZoom(view.zoom));
        }
        self.initial_bounds.validated()?;
        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: DashboardConfig = toml::from_str(text).context("parsing config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load from `$AIRE_MONITOR_CONFIG`, else `./aire-monitor.toml`, else defaults.
    ///
    /// An explicitly named file that fails to load is an error; a missing
    /// default file is not.
    pub fn discover() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
            log::info!("Loading config from {} ({CONFIG_ENV})", path.display());
            return Self::load(&path);
        }
        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            log::info!("Loading config from {}", local.display());
            return Self::load(local);
        }
        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Pollutant;

    #[test]
    fn defaults_are_valid() {
        let c = DashboardConfig::default();
        assert_eq!(c.rows, 100);
        assert_eq!(c.seed, 42);
        assert_eq!(c.point_radius_m, 200.0);
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let c = DashboardConfig::from_toml_str("rows = 250\n").unwrap();
        assert_eq!(c.rows, 250);
        assert_eq!(c.seed, 42);
        assert_eq!(c.initial_bounds, FilterBounds::default());
    }

    #[test]
    fn reads_bounds_table() {
        let c = DashboardConfig::from_toml_str(
            "[initial_bounds]\npm25_max = 80.0\npm10_max = 150.0\nco_max = 2.5\n",
        )
        .unwrap();
        assert_eq!(c.initial_bounds.max(Pollutant::Pm25), 80.0);
        assert_eq!(c.initial_bounds.max(Pollutant::Co), 2.5);
    }

    #[test]
    fn zero_rows_rejected() {
        let err = DashboardConfig::from_toml_str("rows = 0\n").unwrap_err();
        assert_eq!(err.downcast_ref::<ConfigError>(), Some(&ConfigError::NoRows));
    }

    #[test]
    fn out_of_range_bounds_rejected() {
        let err = DashboardConfig::from_toml_str(
            "[initial_bounds]\npm25_max = 500.0\npm10_max = 150.0\nco_max = 2.5\n",
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Bounds(BoundsError::OutOfRange { .. }))
        ));
    }

    fn config_error(text: &str) -> ConfigError {
        let err = DashboardConfig::from_toml_str(text).unwrap_err();
        err.downcast::<ConfigError>().unwrap()
    }

    #[test]
    fn polar_latitude_rejected() {
        assert_eq!(config_error("[view]\nlatitude = 90.0\n"), ConfigError::BadLatitude(90.0));
        assert_eq!(config_error("[view]\nlatitude = -95.0\n"), ConfigError::BadLatitude(-95.0));
        assert!(matches!(
            config_error("[view]\nlatitude = nan\n"),
            ConfigError::BadLatitude(v) if v.is_nan()
        ));
    }

    #[test]
    fn longitude_out_of_range_rejected() {
        assert_eq!(config_error("[view]\nlongitude = 181.0\n"), ConfigError::BadLongitude(181.0));
        assert!(matches!(
            config_error("[view]\nlongitude = inf\n"),
            ConfigError::BadLongitude(v) if v.is_infinite()
        ));
    }

    #[test]
    fn non_finite_zoom_rejected() {
        assert!(matches!(
            config_error("[view]\nzoom = nan\n"),
            ConfigError::BadZoom(v) if v.is_nan()
        ));
        assert!(matches!(
            config_error("[view]\nzoom = inf\n"),
            ConfigError::BadZoom(v) if v.is_infinite()
        ));
        assert_eq!(config_error("[view]\nzoom = 2000.0\n"), ConfigError::BadZoom(2000.0));
        assert_eq!(config_error("[view]\nzoom = -1.0\n"), ConfigError::BadZoom(-1.0));
    }

    #[test]
    fn bad_min_point_px_rejected() {
        assert_eq!(config_error("min_point_px = 0.0\n"), ConfigError::BadMinPointPx(0.0));
        assert_eq!(config_error("min_point_px = -2.0\n"), ConfigError::BadMinPointPx(-2.0));
        assert!(matches!(
            config_error("min_point_px = nan\n"),
            ConfigError::BadMinPointPx(v) if v.is_nan()
        ));
    }

    #[test]
    fn valid_view_gives_finite_geometry() {
        let c = DashboardConfig::from_toml_str("[view]\nlatitude = 89.5\nzoom = 3.0\n").unwrap();
        let e = c.view.extent(800.0, 600.0);
        assert!(c.view.radius_pixels(c.point_radius_m).is_finite());
        assert!([e.min_lon, e.max_lon, e.min_lat, e.max_lat].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(DashboardConfig::from_toml_str("colour = \"red\"\n").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "seed = 9\n[view]\nlatitude = 19.4\nlongitude = -99.1\nzoom = 11.0\npitch = 0.0\n").unwrap();
        let c = DashboardConfig::load(&path).unwrap();
        assert_eq!(c.seed, 9);
        assert_eq!(c.view.zoom, 11.0);
    }
}
