//! Command-line interface argument parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{AppConfig, ConfigError};
use crate::engine::Role;

/// solar-fleet - performance summary for a fleet of solar installations
///
/// Loads a fleet snapshot (seeded demo data or CSV files), computes the
/// latest-month statistics for one viewer, and prints the report.
///
/// Examples:
///   solar-fleet
///   solar-fleet --preset demo_operator
///   solar-fleet --sites sites.csv --readings readings.csv --role user --location "K. Male'"
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE", conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Built-in preset (demo, demo_operator)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Site register CSV; switches the data source to CSV
    #[arg(long, value_name = "FILE", requires = "readings")]
    pub sites: Option<PathBuf>,

    /// Meter readings CSV
    #[arg(long, value_name = "FILE", requires = "sites")]
    pub readings: Option<PathBuf>,

    /// Viewer role (ADMIN or USER)
    #[arg(long, value_name = "ROLE")]
    pub role: Option<Role>,

    /// Selected location, "<atoll>. <island>" or "all"
    #[arg(long, value_name = "LABEL")]
    pub location: Option<String>,

    /// Comma-separated site ids the viewer may access
    #[arg(long, value_name = "IDS", value_delimiter = ',')]
    pub user_sites: Option<Vec<u32>>,

    /// Demo fleet seed
    #[arg(long, value_name = "U64")]
    pub seed: Option<u64>,

    /// Last month of demo data (YYYY-MM)
    #[arg(long, value_name = "MONTH")]
    pub through: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Serve the report over HTTP instead of printing it
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}

impl Args {
    /// Resolves the base configuration and applies command-line overrides.
    ///
    /// Uses `--config` if given, else `--preset`, else the `demo` preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be loaded or the preset is
    /// unknown.
    pub fn resolve_config(&self) -> Result<AppConfig, ConfigError> {
        let mut cfg = match (&self.config, &self.preset) {
            (Some(path), _) => AppConfig::from_toml_file(path)?,
            (None, Some(name)) => AppConfig::from_preset(name)?,
            (None, None) => AppConfig::demo(),
        };
        self.apply_overrides(&mut cfg);
        Ok(cfg)
    }

    fn apply_overrides(&self, cfg: &mut AppConfig) {
        if let (Some(sites), Some(readings)) = (&self.sites, &self.readings) {
            cfg.data.source = "csv".to_string();
            cfg.data.sites = Some(sites.clone());
            cfg.data.readings = Some(readings.clone());
        }
        if let Some(role) = self.role {
            cfg.viewer.role = role.to_string();
        }
        if let Some(location) = &self.location {
            cfg.viewer.location = Some(location.clone());
        }
        if let Some(ids) = &self.user_sites {
            cfg.viewer.accessible_sites = Some(ids.clone());
        }
        if let Some(seed) = self.seed {
            cfg.demo.seed = seed;
        }
        if let Some(through) = &self.through {
            cfg.demo.through = Some(through.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("solar-fleet").chain(args.iter().copied()))
            .expect("parse should succeed")
    }

    #[test]
    fn defaults_to_demo_preset() {
        let cfg = parse(&[]).resolve_config().expect("demo config");
        assert_eq!(cfg.data.source, "demo");
        assert_eq!(cfg.viewer.role, "ADMIN");
    }

    #[test]
    fn csv_paths_switch_source() {
        let cfg = parse(&["--sites", "s.csv", "--readings", "r.csv"])
            .resolve_config()
            .expect("config");
        assert_eq!(cfg.data.source, "csv");
        assert_eq!(cfg.data.sites, Some(PathBuf::from("s.csv")));
    }

    #[test]
    fn sites_without_readings_is_rejected() {
        assert!(Args::try_parse_from(["solar-fleet", "--sites", "s.csv"]).is_err());
    }

    #[test]
    fn config_and_preset_conflict() {
        assert!(
            Args::try_parse_from(["solar-fleet", "--config", "a.toml", "--preset", "demo"])
                .is_err()
        );
    }

    #[test]
    fn viewer_overrides_apply() {
        let cfg = parse(&[
            "--preset",
            "demo",
            "--role",
            "user",
            "--location",
            "ADH. Omadhoo",
            "--user-sites",
            "4,32",
            "--seed",
            "9",
            "-vv",
        ])
        .resolve_config()
        .expect("config");
        assert_eq!(cfg.viewer.role, "USER");
        assert_eq!(cfg.viewer.location.as_deref(), Some("ADH. Omadhoo"));
        assert_eq!(cfg.viewer.accessible_sites, Some(vec![4, 32]));
        assert_eq!(cfg.demo.seed, 9);
    }

    #[test]
    fn verbose_counts() {
        assert_eq!(parse(&["-vvv"]).verbose, 3);
    }

    #[test]
    fn unknown_preset_errors() {
        let err = parse(&["--preset", "nope"]).resolve_config().unwrap_err();
        assert_eq!(err.field, "preset");
    }

    #[test]
    fn bad_role_is_rejected() {
        assert!(Args::try_parse_from(["solar-fleet", "--role", "root"]).is_err());
    }
}
