//! TOML-based application configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::engine::access::RoleParseError;
use crate::engine::{ALL_LOCATIONS, Role, User, Viewer};
use crate::fleet::month::MonthParseError;
use crate::fleet::{Baseline, Site, YearMonth};

/// Top-level application configuration parsed from TOML.
///
/// All fields have defaults matching the `demo` preset. Load from TOML with
/// [`AppConfig::from_toml_file`] or use [`AppConfig::demo`] for the built-in
/// default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Where the fleet snapshot comes from.
    #[serde(default)]
    pub data: DataConfig,
    /// Who the report is computed for.
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// Expected-generation assumptions applied when sites are loaded.
    #[serde(default)]
    pub baseline: Baseline,
    /// Demo fleet generator parameters.
    #[serde(default)]
    pub demo: DemoConfig,
    /// Log verbosity.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Snapshot source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// `"demo"` (seeded generator) or `"csv"` (files below).
    pub source: String,
    /// Site register CSV, required for `"csv"`.
    pub sites: Option<PathBuf>,
    /// Meter readings CSV, required for `"csv"`.
    pub readings: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: "demo".to_string(),
            sites: None,
            readings: None,
        }
    }
}

/// Viewer identity and location selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Display name.
    pub name: String,
    /// `"ADMIN"` or `"USER"` (case-insensitive).
    pub role: String,
    /// `"<atoll>. <island>"` or `"all"`.
    pub location: Option<String>,
    /// Site ids the viewer may see; every site when absent.
    pub accessible_sites: Option<Vec<u32>>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            name: "Administrator".to_string(),
            role: "ADMIN".to_string(),
            location: None,
            accessible_sites: None,
        }
    }
}

/// Demo fleet generator parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Random seed.
    pub seed: u64,
    /// Months of history per site (must be > 0).
    pub months: usize,
    /// Most recent month as `YYYY-MM`; the current month when absent.
    pub through: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            months: 12,
            through: None,
        }
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"demo.months"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl AppConfig {
    /// Administrator view over a seeded demo fleet.
    pub fn demo() -> Self {
        Self::default()
    }

    /// Island operator view over the same demo fleet.
    pub fn demo_operator() -> Self {
        Self {
            viewer: ViewerConfig {
                name: "Operator".to_string(),
                role: "USER".to_string(),
                location: Some("K. Male'".to_string()),
                accessible_sites: None,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "demo_operator"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "demo_operator" => Ok(Self::demo_operator()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let d = &self.data;
        match d.source.as_str() {
            "demo" => {}
            "csv" => {
                if d.sites.is_none() {
                    errors.push(ConfigError::new("data.sites", "required when source is \"csv\""));
                }
                if d.readings.is_none() {
                    errors.push(ConfigError::new(
                        "data.readings",
                        "required when source is \"csv\"",
                    ));
                }
            }
            other => errors.push(ConfigError::new(
                "data.source",
                format!("must be \"demo\" or \"csv\", got \"{other}\""),
            )),
        }

        let v = &self.viewer;
        if let Err(e) = v.role.parse::<Role>() {
            errors.push(ConfigError::new("viewer.role", e.to_string()));
        }
        if v.location.as_deref().is_some_and(|l| l.trim().is_empty()) {
            errors.push(ConfigError::new(
                "viewer.location",
                format!("must not be empty, use \"{ALL_LOCATIONS}\" for no restriction"),
            ));
        }

        let b = &self.baseline;
        if !b.peak_sun_hours.is_finite() || b.peak_sun_hours <= 0.0 {
            errors.push(ConfigError::new("baseline.peak_sun_hours", "must be > 0"));
        }
        if !b.days_in_month.is_finite() || b.days_in_month <= 0.0 {
            errors.push(ConfigError::new("baseline.days_in_month", "must be > 0"));
        }

        if self.demo.months == 0 {
            errors.push(ConfigError::new("demo.months", "must be > 0"));
        }
        if let Some(through) = &self.demo.through {
            if let Err(e) = through.parse::<YearMonth>() {
                errors.push(ConfigError::new("demo.through", e.to_string()));
            }
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ConfigError::new(
                "logging.level",
                format!(
                    "must be one of {}, got \"{}\"",
                    LOG_LEVELS.join(", "),
                    self.logging.level
                ),
            ));
        }

        errors
    }

    /// Last month of the demo history window.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `demo.through` is not `YYYY-MM`.
    pub fn demo_through(&self) -> Result<YearMonth, ConfigError> {
        match &self.demo.through {
            Some(s) => s
                .parse()
                .map_err(|e: MonthParseError| {
                    ConfigError::new("demo.through", e.to_string())
                }),
            None => Ok(YearMonth::current()),
        }
    }

    /// Builds the viewer for a loaded fleet.
    ///
    /// Without an explicit access list the viewer may see every site in
    /// `sites`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `viewer.role` is not a known role.
    pub fn viewer(&self, sites: &[Site]) -> Result<Viewer, ConfigError> {
        let v = &self.viewer;
        let role: Role = v
            .role
            .parse()
            .map_err(|e: RoleParseError| {
                ConfigError::new("viewer.role", e.to_string())
            })?;
        let accessible_sites = match &v.accessible_sites {
            Some(ids) => ids.clone(),
            None => sites.iter().map(Site::id).collect(),
        };
        let user = User {
            id: v.name.to_lowercase().replace(' ', "-"),
            name: v.name.clone(),
            role,
            accessible_sites,
        };
        Ok(Viewer::new(user, v.location.clone()))
    }
}
