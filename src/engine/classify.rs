//! Three-bucket performance distribution for the reporting month.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::month::{readings_for_month, resolve_latest_month};
use super::stats::site_efficiency;
use crate::fleet::{Reading, Site};

/// Lower efficiency bound (%) of the `good` band.
pub const GOOD_THRESHOLD_PCT: f64 = 70.0;

/// Lower efficiency bound (%) of the `medium` band.
pub const MEDIUM_THRESHOLD_PCT: f64 = 50.0;

/// Performance band of a single site-month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceBand {
    /// Efficiency >= 70 %.
    Good,
    /// 50 % <= efficiency < 70 %.
    Medium,
    /// Efficiency < 50 %.
    Low,
}

impl PerformanceBand {
    pub fn of(efficiency_pct: f64) -> Self {
        if efficiency_pct >= GOOD_THRESHOLD_PCT {
            Self::Good
        } else if efficiency_pct >= MEDIUM_THRESHOLD_PCT {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Legend label used by the dashboard distribution chart.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good (≥70%)",
            Self::Medium => "Medium (50-69%)",
            Self::Low => "Low (<50%)",
        }
    }
}

/// Site counts per band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PerformanceBreakdown {
    pub good: usize,
    pub medium: usize,
    pub low: usize,
}

impl PerformanceBreakdown {
    pub fn total(&self) -> usize {
        self.good + self.medium + self.low
    }

    pub fn count(&self, band: PerformanceBand) -> usize {
        match band {
            PerformanceBand::Good => self.good,
            PerformanceBand::Medium => self.medium,
            PerformanceBand::Low => self.low,
        }
    }

    /// Bands with at least one site, in good/medium/low order.
    pub fn non_empty(&self) -> Vec<(PerformanceBand, usize)> {
        [
            PerformanceBand::Good,
            PerformanceBand::Medium,
            PerformanceBand::Low,
        ]
        .into_iter()
        .map(|band| (band, self.count(band)))
        .filter(|&(_, n)| n > 0)
        .collect()
    }

    fn record(&mut self, band: PerformanceBand) {
        match band {
            PerformanceBand::Good => self.good += 1,
            PerformanceBand::Medium => self.medium += 1,
            PerformanceBand::Low => self.low += 1,
        }
    }
}

impl fmt::Display for PerformanceBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "good={}  medium={}  low={}", self.good, self.medium, self.low)
    }
}

/// Classifies every site that reported in the latest month of `readings`.
///
/// Sites without a reading that month are not counted. A site with no
/// expected generation has efficiency 0 and falls in the `low` band.
pub fn classify_performance<'a, S>(sites: S, readings: &[Reading]) -> PerformanceBreakdown
where
    S: IntoIterator<Item = &'a Site>,
{
    match resolve_latest_month(readings) {
        Some(month) => classify_for_month(sites, readings, month),
        None => PerformanceBreakdown::default(),
    }
}

/// Classifies every site that reported in `month`.
pub fn classify_for_month<'a, S>(sites: S, readings: &[Reading], month: &str) -> PerformanceBreakdown
where
    S: IntoIterator<Item = &'a Site>,
{
    let mut by_site: HashMap<u32, &Reading> = HashMap::new();
    for r in readings_for_month(readings, month) {
        by_site.entry(r.site_id).or_insert(r);
    }

    let mut breakdown = PerformanceBreakdown::default();
    for site in sites {
        if let Some(reading) = by_site.get(&site.id()) {
            breakdown.record(PerformanceBand::of(site_efficiency(site, reading)));
        }
    }
    breakdown
}
