//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::engine::{
    AtollSummary, PerformanceBand, PerformanceBreakdown, SiteHistory, SiteStatus, StatData,
};

/// Headline figures for the viewer's scope.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Latest month in the snapshot, `null` without readings.
    pub latest_month: Option<String>,
    pub overall: StatData,
    pub breakdown: PerformanceBreakdown,
    /// Non-empty bands only, in good/medium/low order.
    pub bands: Vec<BandCount>,
}

/// One slice of the performance distribution.
#[derive(Debug, Serialize)]
pub struct BandCount {
    pub band: PerformanceBand,
    pub label: &'static str,
    pub count: usize,
}

impl From<(PerformanceBand, usize)> for BandCount {
    fn from((band, count): (PerformanceBand, usize)) -> Self {
        Self {
            band,
            label: band.label(),
            count,
        }
    }
}

/// Statistics for one island.
#[derive(Debug, Serialize)]
pub struct IslandView {
    pub name: String,
    pub stats: StatData,
}

/// Statistics for one atoll with its islands sorted by name.
#[derive(Debug, Serialize)]
pub struct AtollView {
    pub name: String,
    pub stats: StatData,
    pub islands: Vec<IslandView>,
}

impl AtollView {
    pub fn new(name: &str, summary: &AtollSummary) -> Self {
        let islands = summary
            .sorted_island_names()
            .into_iter()
            .filter_map(|island| {
                summary.islands.get(island).map(|stats| IslandView {
                    name: island.to_string(),
                    stats: stats.clone(),
                })
            })
            .collect();
        Self {
            name: name.to_string(),
            stats: summary.stats.clone(),
            islands,
        }
    }
}

/// Optional viewer overrides for the atolls endpoint.
#[derive(Debug, Deserialize)]
pub struct AtollQuery {
    /// `ADMIN` or `USER`, case-insensitive.
    pub role: Option<String>,
    /// `"<atoll>. <island>"` or `"all"`.
    pub location: Option<String>,
}

/// One site's status and history.
#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub status: SiteStatus,
    pub history: SiteHistory,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::build_hierarchy;
    use crate::fleet::{Reading, Site};

    #[test]
    fn atoll_view_sorts_islands() {
        let sites = vec![
            Site::new(1, "a", "K", "Male'", 40.0),
            Site::new(2, "b", "K", "Dhiffushi", 40.0),
        ];
        let readings = vec![Reading::new(1, "2024-03", 2700.0)];
        let h = build_hierarchy(&sites, &readings);
        let view = AtollView::new("K", &h["K"]);
        let names: Vec<&str> = view.islands.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Dhiffushi", "Male'"]);
        assert_eq!(view.stats.total_capacity, 80.0);
    }

    #[test]
    fn band_count_carries_label() {
        let c = BandCount::from((PerformanceBand::Medium, 4));
        assert_eq!(c.label, "Medium (50-69%)");
        assert_eq!(c.count, 4);
    }
}
