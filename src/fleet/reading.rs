//! Monthly meter readings.

use serde::{Deserialize, Serialize};

/// Observed production of one site for one calendar month.
///
/// At most one reading may exist per `(site_id, date)`; the engine assumes
/// callers uphold this and [`FleetSnapshot::validate`] reports violations.
///
/// [`FleetSnapshot::validate`]: super::FleetSnapshot::validate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Site this reading belongs to.
    pub site_id: u32,
    /// Reporting month, `YYYY-MM`.
    pub date: String,
    /// Metered production for the month (kWh, >= 0).
    pub value_kwh: f64,
}

/// Correction to an existing reading. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingAmendment {
    pub date: Option<String>,
    pub value_kwh: Option<f64>,
}

impl Reading {
    pub fn new(site_id: u32, date: impl Into<String>, value_kwh: f64) -> Self {
        Self {
            site_id,
            date: date.into(),
            value_kwh,
        }
    }

    /// Applies a correction. The site reference cannot be changed.
    pub fn amend(&mut self, amendment: ReadingAmendment) {
        if let Some(date) = amendment.date {
            self.date = date;
        }
        if let Some(value) = amendment.value_kwh {
            self.value_kwh = value;
        }
    }
}
