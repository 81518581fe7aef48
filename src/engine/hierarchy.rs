//! Atoll → island rollup of group statistics.

use std::collections::HashMap;

use serde::Serialize;

use super::month::{readings_for_month, resolve_latest_month};
use super::stats::{StatData, compute_group_stats};
use crate::fleet::{Reading, Site};

/// Statistics for one atoll and each of its islands.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AtollSummary {
    /// Computed over every site in the atoll, not summed from `islands`.
    pub stats: StatData,
    /// Island name → statistics for that island's sites.
    pub islands: HashMap<String, StatData>,
}

impl AtollSummary {
    /// Island names in ascending order, for display.
    pub fn sorted_island_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.islands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Atoll name → summary. Iteration order is unspecified.
pub type Hierarchy = HashMap<String, AtollSummary>;

/// Atoll names of `hierarchy` in ascending order, for display.
pub fn sorted_atoll_names(hierarchy: &Hierarchy) -> Vec<&str> {
    let mut names: Vec<&str> = hierarchy.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

/// Builds the atoll/island hierarchy for the latest month in `readings`.
///
/// Returns an empty hierarchy when there are no readings at all.
pub fn build_hierarchy<'a, S>(sites: S, readings: &[Reading]) -> Hierarchy
where
    S: IntoIterator<Item = &'a Site>,
{
    match resolve_latest_month(readings) {
        Some(month) => build_hierarchy_for_month(sites, readings, month),
        None => Hierarchy::new(),
    }
}

/// Builds the atoll/island hierarchy for an explicit month.
///
/// Every atoll present in `sites` gets an entry, even if none of its sites
/// reported in `month`.
pub fn build_hierarchy_for_month<'a, S>(sites: S, readings: &[Reading], month: &str) -> Hierarchy
where
    S: IntoIterator<Item = &'a Site>,
{
    let month_readings = readings_for_month(readings, month);

    let mut by_atoll: HashMap<&'a str, Vec<&'a Site>> = HashMap::new();
    for site in sites {
        by_atoll.entry(site.atoll.as_str()).or_default().push(site);
    }

    by_atoll
        .into_iter()
        .map(|(atoll, atoll_sites)| {
            let stats =
                compute_group_stats(atoll_sites.iter().copied(), month_readings.iter().copied());

            let mut by_island: HashMap<&str, Vec<&Site>> = HashMap::new();
            for &site in &atoll_sites {
                by_island.entry(site.island.as_str()).or_default().push(site);
            }
            let islands = by_island
                .into_iter()
                .map(|(island, island_sites)| {
                    let stats = compute_group_stats(island_sites, month_readings.iter().copied());
                    (island.to_string(), stats)
                })
                .collect();

            (atoll.to_string(), AtollSummary { stats, islands })
        })
        .collect()
}
