//! Immutable fleet snapshot handed to the engine.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use super::month::YearMonth;
use super::reading::Reading;
use super::site::Site;

/// Data-entry problem found in a snapshot.
///
/// The engine does not reject these; it assumes a clean snapshot. Callers
/// that ingest external data run [`FleetSnapshot::validate`] first.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotIssue {
    #[error("site id {0} appears more than once")]
    DuplicateSite(u32),
    #[error("site {site_id} has more than one reading for {date}")]
    DuplicateReading { site_id: u32, date: String },
    #[error("site {site_id} reading for {date} has invalid value {value_kwh}")]
    InvalidValue {
        site_id: u32,
        date: String,
        value_kwh: f64,
    },
    #[error("site {site_id} reading has malformed month \"{date}\"")]
    MalformedDate { site_id: u32, date: String },
    #[error("reading for {date} references unknown site {site_id}")]
    UnknownSite { site_id: u32, date: String },
    #[error("site {site_id} has invalid capacity {capacity_kw}")]
    InvalidCapacity { site_id: u32, capacity_kw: f64 },
}

/// Sites and readings as read from the data source at one point in time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FleetSnapshot {
    pub sites: Vec<Site>,
    pub readings: Vec<Reading>,
}

impl FleetSnapshot {
    pub fn new(sites: Vec<Site>, readings: Vec<Reading>) -> Self {
        Self { sites, readings }
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty() && self.readings.is_empty()
    }

    pub fn site(&self, id: u32) -> Option<&Site> {
        self.sites.iter().find(|s| s.id() == id)
    }

    /// Id to assign to the next created site: one past the current maximum.
    ///
    /// `None` once the maximum id is `u32::MAX`.
    pub fn next_site_id(&self) -> Option<u32> {
        match self.sites.iter().map(Site::id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Readings of one site, newest month first.
    pub fn readings_for_site(&self, site_id: u32) -> Vec<&Reading> {
        let mut readings: Vec<&Reading> = self
            .readings
            .iter()
            .filter(|r| r.site_id == site_id)
            .collect();
        readings.sort_by(|a, b| b.date.cmp(&a.date));
        readings
    }

    /// Checks the data-entry invariants and returns every violation found.
    ///
    /// Returns an empty vector if the snapshot is clean.
    pub fn validate(&self) -> Vec<SnapshotIssue> {
        let mut issues = Vec::new();

        let mut site_ids = HashSet::with_capacity(self.sites.len());
        for site in &self.sites {
            if !site_ids.insert(site.id()) {
                issues.push(SnapshotIssue::DuplicateSite(site.id()));
            }
            let cap = site.capacity_kw();
            if !cap.is_finite() || cap < 0.0 {
                issues.push(SnapshotIssue::InvalidCapacity {
                    site_id: site.id(),
                    capacity_kw: cap,
                });
            }
        }

        let mut seen = HashSet::with_capacity(self.readings.len());
        for r in &self.readings {
            if r.date.parse::<YearMonth>().is_err() {
                issues.push(SnapshotIssue::MalformedDate {
                    site_id: r.site_id,
                    date: r.date.clone(),
                });
            }
            if !r.value_kwh.is_finite() || r.value_kwh < 0.0 {
                issues.push(SnapshotIssue::InvalidValue {
                    site_id: r.site_id,
                    date: r.date.clone(),
                    value_kwh: r.value_kwh,
                });
            }
            if !site_ids.contains(&r.site_id) {
                issues.push(SnapshotIssue::UnknownSite {
                    site_id: r.site_id,
                    date: r.date.clone(),
                });
            }
            if !seen.insert((r.site_id, r.date.as_str())) {
                issues.push(SnapshotIssue::DuplicateReading {
                    site_id: r.site_id,
                    date: r.date.clone(),
                });
            }
        }

        issues
    }
}
