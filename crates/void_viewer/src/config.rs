//! Viewer Configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment overrides: `VOID_VIEWER_UPDATE_RATE=30`
//! 2. Config file named by `VOID_VIEWER_CONFIG`
//! 3. `viewer.toml` in the working directory
//! 4. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! [pacing]
//! render_enabled = true
//! update_rate = 30.0          # Hz; 0 renders whenever idle
//! idle_threshold_ms = 10000.0
//!
//! [simulation]
//! duration_ms = 2000
//! burst_ms = 1500
//! interactor_interval_ms = 4
//! draw_cost_ms = 2
//!
//! [view]
//! annotation = "Void Viewer"
//! background = "#000000"
//! background2 = "#333333"
//! gradient = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use void_pacing::{interval_ms_for_update_rate, CoalescerConfig, DEFAULT_IDLE_THRESHOLD_MS};
use void_view::{Background, Rgb};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "VOID_VIEWER_CONFIG";

/// Environment variable overriding the update rate
pub const UPDATE_RATE_ENV: &str = "VOID_VIEWER_UPDATE_RATE";

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "viewer.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {var}: {value}")]
    InvalidOverride { var: &'static str, value: String },

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Pacing section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Whether the view renders at all
    pub render_enabled: bool,
    /// Desired update rate in Hz; takes precedence over `target_interval_ms`
    pub update_rate: Option<f64>,
    /// Target interval between renders
    pub target_interval_ms: Option<f64>,
    /// Intervals above this render when idle
    pub idle_threshold_ms: f64,
}

impl PacingConfig {
    /// Resolve into a coalescer configuration
    pub fn coalescer_config(&self) -> CoalescerConfig {
        let defaults = CoalescerConfig::default();
        let target_interval_ms = match (self.update_rate, self.target_interval_ms) {
            (Some(rate), _) => interval_ms_for_update_rate(rate),
            (None, Some(interval)) => interval,
            (None, None) => defaults.target_interval_ms,
        };

        CoalescerConfig {
            render_enabled: self.render_enabled,
            target_interval_ms,
            idle_threshold_ms: self.idle_threshold_ms,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            render_enabled: true,
            update_rate: None,
            target_interval_ms: None,
            idle_threshold_ms: DEFAULT_IDLE_THRESHOLD_MS,
        }
    }
}

/// Simulation section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Total run time
    pub duration_ms: u64,
    /// How long the simulated interactor keeps emitting render events
    pub burst_ms: u64,
    /// Interval between interactor render events
    pub interactor_interval_ms: u64,
    /// Time each draw blocks for
    pub draw_cost_ms: u64,
    /// Renderer layers in the headless window
    pub layers: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            burst_ms: 1500,
            interactor_interval_ms: 4, // 250 Hz mouse
            draw_cost_ms: 2,
            layers: 1,
        }
    }
}

/// View section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Upper-left annotation text
    pub annotation: String,
    /// Background colour
    pub background: Rgb,
    /// Gradient top colour
    pub background2: Rgb,
    /// Draw a gradient background
    pub gradient: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        let background = Background::default();
        Self {
            annotation: "Void Viewer".to_string(),
            background: background.color,
            background2: background.color2,
            gradient: background.gradient,
        }
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub pacing: PacingConfig,
    pub simulation: SimulationConfig,
    pub view: ViewSettings,
    /// File the configuration was loaded from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl ViewerConfig {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load_from_file(path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => {
                log::info!("No viewer config found, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_path = Some(path.to_path_buf());
        log::info!("Loaded viewer config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply overrides looked up through `lookup`
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(UPDATE_RATE_ENV) {
            let rate: f64 = value.trim().parse().map_err(|_| ConfigError::InvalidOverride {
                var: UPDATE_RATE_ENV,
                value: value.clone(),
            })?;
            self.pacing.update_rate = Some(rate);
            log::info!("Update rate from env: {} Hz", rate);
        }
        Ok(())
    }

    /// Reject values the viewer cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.layers == 0 {
            return Err(ConfigError::Invalid {
                field: "simulation.layers",
                reason: "a window needs at least one layer".to_string(),
            });
        }
        if self.simulation.interactor_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "simulation.interactor_interval_ms",
                reason: "must be at least 1 ms".to_string(),
            });
        }
        Ok(())
    }

    /// Log a summary of the configuration
    pub fn print_summary(&self) {
        let pacing = self.pacing.coalescer_config();
        log::info!("Viewer configuration:");
        log::info!(
            "  Source:    {}",
            self.config_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "defaults".to_string())
        );
        log::info!("  Rendering: {}", if pacing.render_enabled { "enabled" } else { "disabled" });
        log::info!("  Interval:  {:.2} ms", pacing.target_interval_ms);
        log::info!(
            "  Run:       {} ms ({} ms interactor burst every {} ms)",
            self.simulation.duration_ms,
            self.simulation.burst_ms,
            self.simulation.interactor_interval_ms
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        let pacing = config.pacing.coalescer_config();
        assert!(pacing.render_enabled);
        assert!((pacing.target_interval_ms - 1000.0 / 60.0).abs() < 1e-9);
        assert_eq!(config.simulation.interactor_interval_ms, 4);
        assert_eq!(config.view.annotation, "Void Viewer");
    }

    #[test]
    fn test_parse_full_file() {
        let config = ViewerConfig::from_toml(
            r##"
            [pacing]
            update_rate = 30.0
            idle_threshold_ms = 5000.0

            [simulation]
            duration_ms = 500
            draw_cost_ms = 0

            [view]
            annotation = "Axial"
            background = "#102030"
            gradient = true
            "##,
        )
        .unwrap();

        let pacing = config.pacing.coalescer_config();
        assert!((pacing.target_interval_ms - 33.333).abs() < 0.01);
        assert_eq!(pacing.idle_threshold_ms, 5000.0);
        assert_eq!(config.simulation.duration_ms, 500);
        assert_eq!(config.simulation.burst_ms, 1500);
        assert_eq!(config.view.annotation, "Axial");
        assert_eq!(config.view.background.to_rgb8(), [0x10, 0x20, 0x30]);
        assert!(config.view.gradient);
    }

    #[test]
    fn test_update_rate_wins_over_interval() {
        let config = ViewerConfig::from_toml(
            r#"
            [pacing]
            update_rate = 50.0
            target_interval_ms = 100.0
            "#,
        )
        .unwrap();
        assert!((config.pacing.coalescer_config().target_interval_ms - 20.0).abs() < 1e-9);

        let config = ViewerConfig::from_toml("[pacing]\ntarget_interval_ms = 100.0\n").unwrap();
        assert_eq!(config.pacing.coalescer_config().target_interval_ms, 100.0);
    }

    #[test]
    fn test_bad_colour_is_rejected() {
        assert!(ViewerConfig::from_toml("[view]\nbackground = \"red\"\n").is_err());
    }

    #[test]
    fn test_env_override() {
        let mut config = ViewerConfig::default();
        config
            .apply_overrides(|var| (var == UPDATE_RATE_ENV).then(|| "24".to_string()))
            .unwrap();
        assert_eq!(config.pacing.update_rate, Some(24.0));

        let err = config
            .apply_overrides(|_| Some("fast".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride { .. }));
    }

    #[test]
    fn test_zero_layers_is_rejected() {
        let config = ViewerConfig::from_toml("[simulation]\nlayers = 0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "simulation.layers", .. }));

        let config = ViewerConfig::from_toml("[simulation]\ninteractor_interval_ms = 0\n").unwrap();
        assert!(config.validate().is_err());
        assert!(ViewerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_infinite_idle_threshold_falls_back_to_default() {
        let config = ViewerConfig::from_toml("[pacing]\nidle_threshold_ms = inf\n").unwrap();
        let pacing = config.pacing.coalescer_config().sanitized();
        assert_eq!(pacing.idle_threshold_ms, DEFAULT_IDLE_THRESHOLD_MS);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ViewerConfig::load_from_file("/nonexistent/viewer.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
