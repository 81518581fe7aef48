//! Solar installation records and the baseline used to derive expected yield.

use serde::{Deserialize, Serialize};

/// Baseline peak sun hours per day used to derive expected generation.
pub const PEAK_SUN_HOURS: f64 = 4.5;

/// Baseline number of days in a month used to derive expected generation.
pub const DAYS_IN_MONTH: f64 = 30.0;

/// Assumptions used to turn installed capacity into an expected monthly yield.
///
/// Applied exactly once, when a [`Site`] is created.
///
/// # Examples
///
/// ```
/// use solar_fleet::fleet::Baseline;
///
/// let b = Baseline::default();
/// assert_eq!(b.expected_monthly_kwh(40.0), 5400.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Baseline {
    /// Peak sun hours per day.
    pub peak_sun_hours: f64,
    /// Days per month.
    pub days_in_month: f64,
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            peak_sun_hours: PEAK_SUN_HOURS,
            days_in_month: DAYS_IN_MONTH,
        }
    }
}

impl Baseline {
    /// Expected monthly generation (kWh) for the given installed capacity (kW).
    pub fn expected_monthly_kwh(&self, capacity_kw: f64) -> f64 {
        capacity_kw * self.peak_sun_hours * self.days_in_month
    }
}

/// A solar installation.
///
/// `id`, `capacity_kw` and `expected_monthly_kwh` are fixed at creation.
/// Only the descriptive fields in [`SiteEdit`] can change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Site {
    id: u32,
    /// Display name of the installation.
    pub name: String,
    /// Coarse region.
    pub atoll: String,
    /// Fine region within the atoll.
    pub island: String,
    capacity_kw: f64,
    expected_monthly_kwh: f64,
    /// Utility meter number, free text.
    pub meter_number: String,
    /// Commission date as entered by the operator.
    pub commissioned_date: String,
    /// Optional `"lat, lon"` string.
    pub gps_coordinates: Option<String>,
}

/// Mutable fields of a [`Site`]. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteEdit {
    pub name: Option<String>,
    pub atoll: Option<String>,
    pub island: Option<String>,
    pub meter_number: Option<String>,
    pub commissioned_date: Option<String>,
    /// `Some(None)` clears the coordinates.
    pub gps_coordinates: Option<Option<String>>,
}

impl Site {
    /// Creates a site with the default baseline (4.5 sun hours, 30 days).
    ///
    /// # Examples
    ///
    /// ```
    /// use solar_fleet::fleet::Site;
    ///
    /// let site = Site::new(1, "Harbour", "K", "Dhiffushi", 40.0);
    /// assert_eq!(site.expected_monthly_kwh(), 5400.0);
    /// assert_eq!(site.location_label(), "K. Dhiffushi");
    /// ```
    pub fn new(
        id: u32,
        name: impl Into<String>,
        atoll: impl Into<String>,
        island: impl Into<String>,
        capacity_kw: f64,
    ) -> Self {
        Self::with_baseline(id, name, atoll, island, capacity_kw, &Baseline::default())
    }

    /// Creates a site deriving the expected yield from a custom baseline.
    pub fn with_baseline(
        id: u32,
        name: impl Into<String>,
        atoll: impl Into<String>,
        island: impl Into<String>,
        capacity_kw: f64,
        baseline: &Baseline,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            atoll: atoll.into(),
            island: island.into(),
            capacity_kw,
            expected_monthly_kwh: baseline.expected_monthly_kwh(capacity_kw),
            meter_number: String::new(),
            commissioned_date: String::new(),
            gps_coordinates: None,
        }
    }

    /// Sets meter and commissioning metadata, builder style.
    pub fn with_metadata(
        mut self,
        meter_number: impl Into<String>,
        commissioned_date: impl Into<String>,
        gps_coordinates: Option<String>,
    ) -> Self {
        self.meter_number = meter_number.into();
        self.commissioned_date = commissioned_date.into();
        self.gps_coordinates = gps_coordinates.filter(|g| !g.trim().is_empty());
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Installed capacity (kW).
    pub fn capacity_kw(&self) -> f64 {
        self.capacity_kw
    }

    /// Expected monthly generation (kWh), derived at creation.
    pub fn expected_monthly_kwh(&self) -> f64 {
        self.expected_monthly_kwh
    }

    /// `"<atoll>. <island>"`, the form used for operator location selection.
    pub fn location_label(&self) -> String {
        format!("{}. {}", self.atoll, self.island)
    }

    /// Applies an edit to the mutable fields. Identity and capacity never change.
    pub fn apply_edit(&mut self, edit: SiteEdit) {
        if let Some(name) = edit.name {
            self.name = name;
        }
        if let Some(atoll) = edit.atoll {
            self.atoll = atoll;
        }
        if let Some(island) = edit.island {
            self.island = island;
        }
        if let Some(meter) = edit.meter_number {
            self.meter_number = meter;
        }
        if let Some(date) = edit.commissioned_date {
            self.commissioned_date = date;
        }
        if let Some(gps) = edit.gps_coordinates {
            self.gps_coordinates = gps;
        }
    }
}
