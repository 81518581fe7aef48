//! Snapshot data sources.

pub mod load;

pub use load::{LoadError, load_readings_csv, load_sites_csv, read_readings_csv, read_sites_csv};

use crate::config::{AppConfig, ConfigError};
use crate::demo::demo_snapshot;
use crate::fleet::FleetSnapshot;

/// Loads the snapshot selected by `config.data.source`.
///
/// # Errors
///
/// Returns a `LoadError` if a CSV file cannot be read, or a `Config` error
/// when the source is unknown or a required path is missing.
pub fn load_snapshot(config: &AppConfig) -> Result<FleetSnapshot, LoadError> {
    let data = &config.data;
    match data.source.as_str() {
        "demo" => {
            let through = config.demo_through()?;
            Ok(demo_snapshot(config.demo.seed, through, config.demo.months))
        }
        "csv" => {
            let sites_path = data.sites.as_deref().ok_or_else(|| ConfigError {
                field: "data.sites".into(),
                message: "required when source is \"csv\"".into(),
            })?;
            let readings_path = data.readings.as_deref().ok_or_else(|| ConfigError {
                field: "data.readings".into(),
                message: "required when source is \"csv\"".into(),
            })?;
            let sites = load_sites_csv(sites_path, &config.baseline)?;
            let readings = load_readings_csv(readings_path)?;
            Ok(FleetSnapshot::new(sites, readings))
        }
        other => Err(ConfigError {
            field: "data.source".into(),
            message: format!("must be \"demo\" or \"csv\", got \"{other}\""),
        }
        .into()),
    }
}
