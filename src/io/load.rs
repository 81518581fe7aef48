//! CSV import for the site register and meter readings.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::fleet::{Baseline, Reading, Site};

/// Column header of the site register.
pub const SITES_HEADER: &str = "id,name,atoll,island,capacity_kw,meter_number,\
                                commissioned_date,gps_coordinates";

/// Column header of the readings file.
pub const READINGS_HEADER: &str = "site_id,date,value_kwh";

/// Failure to load snapshot data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {message}")]
    InvalidRow { line: usize, message: String },
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

#[derive(Debug, Deserialize)]
struct SiteRow {
    id: u32,
    name: String,
    atoll: String,
    island: String,
    capacity_kw: f64,
    #[serde(default)]
    meter_number: String,
    #[serde(default)]
    commissioned_date: String,
    #[serde(default)]
    gps_coordinates: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReadingRow {
    site_id: u32,
    date: String,
    value_kwh: f64,
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Loads the site register from a CSV file.
///
/// Expected monthly generation is derived from `capacity_kw` with `baseline`;
/// any expectation column in the file is ignored.
///
/// # Errors
///
/// Returns a `LoadError` if the file cannot be opened or a row is invalid.
pub fn load_sites_csv(path: &Path, baseline: &Baseline) -> Result<Vec<Site>, LoadError> {
    let sites = read_sites_csv(open(path)?, baseline)?;
    tracing::info!(path = %path.display(), sites = sites.len(), "loaded site register");
    Ok(sites)
}

/// Reads the site register from any CSV source.
///
/// # Errors
///
/// Returns a `LoadError` if a row cannot be parsed or has a blank atoll or
/// island.
pub fn read_sites_csv(input: impl Read, baseline: &Baseline) -> Result<Vec<Site>, LoadError> {
    let mut rdr = reader(input);
    let mut sites = Vec::new();
    for (idx, row) in rdr.deserialize::<SiteRow>().enumerate() {
        let row = row?;
        let line = idx + 2;
        if row.atoll.is_empty() || row.island.is_empty() {
            return Err(LoadError::InvalidRow {
                line,
                message: format!("site {} has a blank atoll or island", row.id),
            });
        }
        let site = Site::with_baseline(
            row.id,
            row.name,
            row.atoll,
            row.island,
            row.capacity_kw,
            baseline,
        )
        .with_metadata(row.meter_number, row.commissioned_date, row.gps_coordinates);
        sites.push(site);
    }
    Ok(sites)
}

/// Loads monthly meter readings from a CSV file.
///
/// # Errors
///
/// Returns a `LoadError` if the file cannot be opened or a row is invalid.
pub fn load_readings_csv(path: &Path) -> Result<Vec<Reading>, LoadError> {
    let readings = read_readings_csv(open(path)?)?;
    tracing::info!(path = %path.display(), readings = readings.len(), "loaded meter readings");
    Ok(readings)
}

/// Reads monthly meter readings from any CSV source.
///
/// Only column types are checked here; duplicates, negative values and
/// malformed months are reported by
/// [`FleetSnapshot::validate`](crate::fleet::FleetSnapshot::validate).
///
/// # Errors
///
/// Returns a `LoadError` if a row cannot be parsed.
pub fn read_readings_csv(input: impl Read) -> Result<Vec<Reading>, LoadError> {
    let mut rdr = reader(input);
    rdr.deserialize::<ReadingRow>()
        .map(|row| -> Result<Reading, LoadError> {
            let row = row?;
            Ok(Reading::new(row.site_id, row.date, row.value_kwh))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sites_derive_expectation() {
        let csv = format!(
            "{SITES_HEADER}\n\
             1,Dhiffushi Harbour,K,Dhiffushi,40,87394,1/26/2018,\"4.441086, 73.714748\"\n\
             4,Omadhoo new PH,ADH,Omadhoo,38.94,19100006525,28/Aug/2021,\n"
        );
        let sites = read_sites_csv(csv.as_bytes(), &Baseline::default()).expect("valid csv");
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].expected_monthly_kwh(), 5400.0);
        assert_eq!(
            sites[0].gps_coordinates.as_deref(),
            Some("4.441086, 73.714748")
        );
        assert_eq!(sites[1].gps_coordinates, None);
        assert_eq!(sites[1].meter_number, "19100006525");
    }

    #[test]
    fn custom_baseline_applies() {
        let csv = "id,name,atoll,island,capacity_kw\n1,a,K,Male',10\n";
        let baseline = Baseline {
            peak_sun_hours: 5.0,
            days_in_month: 30.0,
        };
        let sites = read_sites_csv(csv.as_bytes(), &baseline).expect("valid csv");
        assert_eq!(sites[0].expected_monthly_kwh(), 1500.0);
        assert!(sites[0].meter_number.is_empty());
    }

    #[test]
    fn blank_island_is_rejected() {
        let csv = "id,name,atoll,island,capacity_kw\n1,a,K,Male',10\n2,b,K, ,10\n";
        let err = read_sites_csv(csv.as_bytes(), &Baseline::default()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { line: 3, .. }), "{err}");
    }

    #[test]
    fn non_numeric_capacity_is_csv_error() {
        let csv = "id,name,atoll,island,capacity_kw\n1,a,K,Male',lots\n";
        let err = read_sites_csv(csv.as_bytes(), &Baseline::default()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn readings_parse() {
        let csv = format!("{READINGS_HEADER}\n1,2024-03,2700\n1, 2024-02 ,5400.5\n");
        let readings = read_readings_csv(csv.as_bytes()).expect("valid csv");
        assert_eq!(
            readings,
            vec![
                Reading::new(1, "2024-03", 2700.0),
                Reading::new(1, "2024-02", 5400.5),
            ]
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_readings_csv(Path::new("/nonexistent/readings.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/readings.csv"));
    }
}
