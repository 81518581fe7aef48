//! Per-group production statistics for a single reporting month.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::fleet::{Reading, Site};

/// Avoided CO2 per kWh of solar generation (tonnes).
pub const CO2_TONNES_PER_KWH: f64 = 0.0007;

/// CO2 absorbed by one tree per year (tonnes).
pub const CO2_TONNES_PER_TREE_YEAR: f64 = 0.022;

/// Efficiency (%) at or below which a site counts as low performing.
pub const LOW_PERFORMER_THRESHOLD_PCT: f64 = 50.0;

/// Aggregate statistics for a group of sites in one month.
///
/// Percentages and counts are not additive across groups; always recompute
/// from the underlying sites instead of summing two `StatData` values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatData {
    /// Installed capacity of every site in the group (kW).
    pub total_capacity: f64,
    /// Expected generation of sites that reported this month (kWh).
    pub total_expected: f64,
    /// Metered generation of sites that reported this month (kWh).
    pub total_production: f64,
    /// Reporting sites at or below 50 % efficiency.
    pub low_performing_count: usize,
    /// `total_production / total_expected` as a percentage, 0 when nothing is expected.
    pub efficiency: f64,
    /// Avoided emissions (tonnes CO2).
    pub co2_reduction: f64,
    /// Trees needed to absorb the same CO2 in a year.
    pub equivalent_trees: f64,
}

/// Efficiency of one site for one reading, as a percentage.
///
/// A site with no expected generation has efficiency 0.
pub fn site_efficiency(site: &Site, reading: &Reading) -> f64 {
    let expected = site.expected_monthly_kwh();
    if expected > 0.0 {
        reading.value_kwh / expected * 100.0
    } else {
        0.0
    }
}

/// Whether a reading marks its site as a low performer (efficiency <= 50 %).
///
/// Sites with no expected generation are never low performers.
pub fn is_low_performer(site: &Site, reading: &Reading) -> bool {
    site.expected_monthly_kwh() > 0.0 && site_efficiency(site, reading) <= LOW_PERFORMER_THRESHOLD_PCT
}

/// Computes [`StatData`] for `sites` given readings already filtered to one month.
///
/// Every site contributes its capacity; only sites with a matching reading
/// contribute expected and metered energy. If a site has more than one
/// reading in the slice the first one is used.
///
/// # Examples
///
/// ```
/// use solar_fleet::engine::compute_group_stats;
/// use solar_fleet::fleet::{Reading, Site};
///
/// let sites = vec![Site::new(1, "A", "K", "Male'", 40.0)];
/// let readings = vec![Reading::new(1, "2024-03", 2700.0)];
/// let stats = compute_group_stats(&sites, &readings);
/// assert_eq!(stats.efficiency, 50.0);
/// assert_eq!(stats.low_performing_count, 1);
/// ```
pub fn compute_group_stats<'a, S, R>(sites: S, readings_for_month: R) -> StatData
where
    S: IntoIterator<Item = &'a Site>,
    R: IntoIterator<Item = &'a Reading>,
{
    let mut by_site: HashMap<u32, &Reading> = HashMap::new();
    for r in readings_for_month {
        by_site.entry(r.site_id).or_insert(r);
    }

    let mut total_capacity = 0.0_f64;
    let mut total_expected = 0.0_f64;
    let mut total_production = 0.0_f64;
    let mut low_performing_count = 0_usize;

    for site in sites {
        total_capacity += site.capacity_kw();
        let Some(reading) = by_site.get(&site.id()) else {
            continue;
        };
        total_expected += site.expected_monthly_kwh();
        total_production += reading.value_kwh;
        if is_low_performer(site, reading) {
            low_performing_count += 1;
        }
    }

    let efficiency = if total_expected > 0.0 {
        total_production / total_expected * 100.0
    } else {
        0.0
    };
    let co2_reduction = total_production * CO2_TONNES_PER_KWH;
    let equivalent_trees = if co2_reduction > 0.0 {
        co2_reduction / CO2_TONNES_PER_TREE_YEAR
    } else {
        0.0
    };

    StatData {
        total_capacity,
        total_expected,
        total_production,
        low_performing_count,
        efficiency,
        co2_reduction,
        equivalent_trees,
    }
}

impl fmt::Display for StatData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "capacity={:.2} kWp  generation={:.0} kWh  efficiency={:.1}%  \
             low={}  co2={:.1} t  trees={:.0}",
            self.total_capacity,
            self.total_production,
            self.efficiency,
            self.low_performing_count,
            self.co2_reduction,
            self.equivalent_trees.round(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(id: u32, capacity_kw: f64) -> Site {
        Site::new(id, format!("Site {id}"), "K", "Male'", capacity_kw)
    }

    #[test]
    fn empty_input_is_all_zero() {
        let stats = compute_group_stats(&[] as &[Site], &[] as &[Reading]);
        assert_eq!(stats, StatData::default());
    }

    #[test]
    fn exactly_fifty_percent_is_low() {
        let sites = vec![site(1, 40.0)];
        let readings = vec![Reading::new(1, "2024-03", 2700.0)];
        let stats = compute_group_stats(&sites, &readings);
        assert_eq!(sites[0].expected_monthly_kwh(), 5400.0);
        assert_eq!(stats.efficiency, 50.0);
        assert_eq!(stats.low_performing_count, 1);
    }

    #[test]
    fn just_above_fifty_percent_is_not_low() {
        let sites = vec![site(1, 40.0)];
        let readings = vec![Reading::new(1, "2024-03", 2701.0)];
        let stats = compute_group_stats(&sites, &readings);
        assert!(stats.efficiency > 50.0);
        assert_eq!(stats.low_performing_count, 0);
    }

    #[test]
    fn capacity_counts_sites_without_readings() {
        let sites = vec![site(1, 40.0), site(2, 10.0)];
        let readings = vec![Reading::new(1, "2024-03", 5400.0)];
        let stats = compute_group_stats(&sites, &readings);
        assert_eq!(stats.total_capacity, 50.0);
        assert_eq!(stats.total_expected, 5400.0);
        assert_eq!(stats.total_production, 5400.0);
        assert_eq!(stats.efficiency, 100.0);
    }

    #[test]
    fn zero_capacity_site_is_guarded() {
        let sites = vec![site(1, 0.0)];
        let readings = vec![Reading::new(1, "2024-03", 10.0)];
        let stats = compute_group_stats(&sites, &readings);
        assert_eq!(stats.total_capacity, 0.0);
        assert_eq!(stats.total_expected, 0.0);
        assert_eq!(stats.efficiency, 0.0);
        assert_eq!(stats.low_performing_count, 0);
        assert!(stats.efficiency.is_finite());
        assert_eq!(site_efficiency(&sites[0], &readings[0]), 0.0);
    }

    #[test]
    fn environmental_equivalents() {
        let sites = vec![site(1, 40.0)];
        let readings = vec![Reading::new(1, "2024-03", 1000.0)];
        let stats = compute_group_stats(&sites, &readings);
        assert!((stats.co2_reduction - 0.7).abs() < 1e-12);
        assert!((stats.equivalent_trees - 0.7 / 0.022).abs() < 1e-9);
    }

    #[test]
    fn no_production_means_no_trees() {
        let sites = vec![site(1, 40.0)];
        let readings = vec![Reading::new(1, "2024-03", 0.0)];
        let stats = compute_group_stats(&sites, &readings);
        assert_eq!(stats.co2_reduction, 0.0);
        assert_eq!(stats.equivalent_trees, 0.0);
        assert_eq!(stats.low_performing_count, 1);
    }

    #[test]
    fn readings_for_other_sites_are_ignored() {
        let sites = vec![site(1, 40.0)];
        let readings = vec![Reading::new(2, "2024-03", 9999.0)];
        let stats = compute_group_stats(&sites, &readings);
        assert_eq!(stats.total_production, 0.0);
        assert_eq!(stats.efficiency, 0.0);
    }

    #[test]
    fn accepts_borrowed_partitions() {
        let sites = vec![site(1, 40.0), site(2, 20.0)];
        let subset: Vec<&Site> = sites.iter().filter(|s| s.id() == 2).collect();
        let readings = vec![Reading::new(2, "2024-03", 2700.0)];
        let stats = compute_group_stats(subset, &readings);
        assert_eq!(stats.total_capacity, 20.0);
        assert_eq!(stats.total_production, 2700.0);
    }

    #[test]
    fn display_does_not_panic() {
        let s = format!("{}", StatData::default());
        assert!(s.contains("efficiency"));
    }
}
