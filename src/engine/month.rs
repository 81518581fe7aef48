//! Reporting-month resolution.

use crate::fleet::Reading;

/// Returns the most recent month present in `readings`.
///
/// Months are `YYYY-MM` strings, so the lexicographic maximum is the
/// chronological maximum. Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use solar_fleet::engine::resolve_latest_month;
/// use solar_fleet::fleet::Reading;
///
/// let readings = vec![
///     Reading::new(1, "2024-01", 1.0),
///     Reading::new(1, "2024-03", 1.0),
///     Reading::new(1, "2024-02", 1.0),
/// ];
/// assert_eq!(resolve_latest_month(&readings), Some("2024-03"));
/// ```
pub fn resolve_latest_month(readings: &[Reading]) -> Option<&str> {
    readings.iter().map(|r| r.date.as_str()).max()
}

/// Readings whose month equals `month`.
pub fn readings_for_month<'a>(readings: &'a [Reading], month: &str) -> Vec<&'a Reading> {
    readings.iter().filter(|r| r.date == month).collect()
}
