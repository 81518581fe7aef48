//! Per-site status and monthly history.

use std::fmt;

use serde::Serialize;

use super::stats::{LOW_PERFORMER_THRESHOLD_PCT, site_efficiency};
use crate::engine::classify::GOOD_THRESHOLD_PCT;
use crate::fleet::{Reading, Site, YearMonth};

/// Fraction of expected generation drawn as the low-performance threshold line.
pub const THRESHOLD_FRACTION: f64 = 0.5;

/// Alert flag for a site's most recent reading.
///
/// Unlike [`PerformanceBand`](super::PerformanceBand), exactly 50 % is `Low`
/// here, matching the low-performer count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteFlag {
    Good,
    Medium,
    Low,
    NoData,
}

/// Snapshot of one site's latest reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteStatus {
    pub site_id: u32,
    pub name: String,
    pub location: String,
    /// Most recent reading of this site, in any month.
    pub latest: Option<Reading>,
    /// Efficiency of `latest` (%), 0 without a reading.
    pub efficiency: f64,
    pub flag: SiteFlag,
}

impl SiteStatus {
    /// Builds the status of `site` from all readings in the snapshot.
    pub fn for_site(site: &Site, readings: &[Reading]) -> Self {
        let latest = readings
            .iter()
            .filter(|r| r.site_id == site.id())
            .max_by(|a, b| a.date.cmp(&b.date))
            .cloned();

        let (efficiency, flag) = match &latest {
            Some(r) => {
                let eff = site_efficiency(site, r);
                let flag = if eff <= LOW_PERFORMER_THRESHOLD_PCT {
                    SiteFlag::Low
                } else if eff < GOOD_THRESHOLD_PCT {
                    SiteFlag::Medium
                } else {
                    SiteFlag::Good
                };
                (eff, flag)
            }
            None => (0.0, SiteFlag::NoData),
        };

        Self {
            site_id: site.id(),
            name: site.name.clone(),
            location: site.location_label(),
            latest,
            efficiency,
            flag,
        }
    }
}

/// One month in a site's history chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub month: YearMonth,
    /// Metered production, `None` when the month has no reading.
    pub production_kwh: Option<f64>,
    pub expected_kwh: f64,
    /// Half of `expected_kwh`.
    pub threshold_kwh: f64,
}

/// Trailing monthly history of one site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteHistory {
    pub site_id: u32,
    /// Oldest month first.
    pub points: Vec<HistoryPoint>,
    /// Production of the final month of the window, 0 without a reading.
    pub current_month_kwh: f64,
    /// Sum over every reading of the site, not only the window.
    pub lifetime_kwh: f64,
}

impl SiteHistory {
    /// History for the `months` calendar months ending at `through`.
    pub fn trailing(site: &Site, readings: &[Reading], through: YearMonth, months: usize) -> Self {
        let own: Vec<&Reading> = readings.iter().filter(|r| r.site_id == site.id()).collect();
        let expected = site.expected_monthly_kwh();

        let points = through
            .trailing(months)
            .into_iter()
            .map(|month| {
                let key = month.to_string();
                let production_kwh = own.iter().find(|r| r.date == key).map(|r| r.value_kwh);
                HistoryPoint {
                    month,
                    production_kwh,
                    expected_kwh: expected,
                    threshold_kwh: expected * THRESHOLD_FRACTION,
                }
            })
            .collect();

        let through_key = through.to_string();
        let current_month_kwh = own
            .iter()
            .find(|r| r.date == through_key)
            .map_or(0.0, |r| r.value_kwh);
        let lifetime_kwh = own.iter().map(|r| r.value_kwh).sum();

        Self {
            site_id: site.id(),
            points,
            current_month_kwh,
            lifetime_kwh,
        }
    }
}

/// Energy value scaled to kWh, MWh or GWh for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnergyQuantity {
    Kwh(f64),
    Mwh(f64),
    Gwh(f64),
}

impl EnergyQuantity {
    pub fn humanize(kwh: f64) -> Self {
        if kwh >= 1_000_000.0 {
            Self::Gwh(kwh / 1_000_000.0)
        } else if kwh >= 1_000.0 {
            Self::Mwh(kwh / 1_000.0)
        } else {
            Self::Kwh(kwh)
        }
    }
}

impl fmt::Display for EnergyQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kwh(v) => write!(f, "{v} kWh"),
            Self::Mwh(v) => write!(f, "{v:.2} MWh"),
            Self::Gwh(v) => write!(f, "{v:.2} GWh"),
        }
    }
}
