//! Assembled fleet report for one viewer.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::access::{Role, User, accessible_sites, filter_visible_atolls, scope_sites};
use super::classify::{PerformanceBreakdown, classify_for_month};
use super::hierarchy::{Hierarchy, build_hierarchy_for_month, sorted_atoll_names};
use super::month::{readings_for_month, resolve_latest_month};
use super::site_view::{EnergyQuantity, SiteStatus};
use super::stats::{StatData, compute_group_stats};
use crate::fleet::{FleetSnapshot, Reading};

/// Who is looking at the report and which location they selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewer {
    pub user: User,
    /// `"<atoll>. <island>"`, `"all"`, or `None`.
    pub selected_location: Option<String>,
}

impl Viewer {
    pub fn new(user: User, selected_location: Option<String>) -> Self {
        Self {
            user,
            selected_location,
        }
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// Everything a dashboard shows for one viewer and one snapshot.
///
/// Overall statistics and the performance breakdown cover the viewer's
/// scoped sites (narrowed to the selected island). The hierarchy covers
/// every site the viewer may access, and `visible_atolls` selects which of
/// its atolls to present.
#[derive(Debug, Clone, Serialize)]
pub struct FleetReport {
    /// Latest month in the snapshot, `None` without readings.
    pub latest_month: Option<String>,
    pub overall: StatData,
    pub breakdown: PerformanceBreakdown,
    pub hierarchy: Hierarchy,
    /// Sorted ascending.
    pub visible_atolls: Vec<String>,
    /// Scoped sites ordered by id.
    pub sites: Vec<SiteStatus>,
}

impl FleetReport {
    /// Computes the report. Never fails; an empty snapshot yields zeros.
    pub fn build(snapshot: &FleetSnapshot, viewer: &Viewer) -> Self {
        let selected = viewer.selected_location.as_deref();
        let scoped = scope_sites(&viewer.user, &snapshot.sites, selected);
        let accessible = accessible_sites(&viewer.user, &snapshot.sites);
        let latest_month = resolve_latest_month(&snapshot.readings).map(str::to_string);

        let (overall, breakdown, hierarchy) = match latest_month.as_deref() {
            Some(month) => {
                let month_readings = readings_for_month(&snapshot.readings, month);
                (
                    compute_group_stats(scoped.iter().copied(), month_readings.iter().copied()),
                    classify_for_month(scoped.iter().copied(), &snapshot.readings, month),
                    build_hierarchy_for_month(
                        accessible.iter().copied(),
                        &snapshot.readings,
                        month,
                    ),
                )
            }
            None => (
                compute_group_stats(scoped.iter().copied(), std::iter::empty::<&Reading>()),
                PerformanceBreakdown::default(),
                Hierarchy::new(),
            ),
        };

        let visible_atolls =
            filter_visible_atolls(&sorted_atoll_names(&hierarchy), viewer.role(), selected);

        let mut sites: Vec<SiteStatus> = scoped
            .iter()
            .map(|s| SiteStatus::for_site(s, &snapshot.readings))
            .collect();
        sites.sort_by_key(|s| s.site_id);

        tracing::debug!(
            latest_month = ?latest_month,
            scoped_sites = scoped.len(),
            accessible_sites = accessible.len(),
            atolls = visible_atolls.len(),
            "fleet report built"
        );

        Self {
            latest_month,
            overall,
            breakdown,
            hierarchy,
            visible_atolls,
            sites,
        }
    }
}

impl fmt::Display for FleetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Fleet Report ---")?;
        writeln!(
            f,
            "Reporting month:       {}",
            self.latest_month.as_deref().unwrap_or("n/a")
        )?;
        let o = &self.overall;
        writeln!(f, "Installed capacity:    {:.2} kWp", o.total_capacity)?;
        writeln!(
            f,
            "Generation:            {}",
            EnergyQuantity::humanize(o.total_production)
        )?;
        writeln!(f, "Overall efficiency:    {:.1}%", o.efficiency)?;
        writeln!(f, "Low performing sites:  {}", o.low_performing_count)?;
        writeln!(f, "CO2 reduction:         {:.1} t", o.co2_reduction)?;
        writeln!(f, "Equivalent trees:      {:.0}", o.equivalent_trees.round())?;
        writeln!(f, "Performance:           {}", self.breakdown)?;

        for atoll in &self.visible_atolls {
            let Some(summary) = self.hierarchy.get(atoll) else {
                continue;
            };
            writeln!(f)?;
            writeln!(f, "{atoll} Atoll: {}", summary.stats)?;
            for island in summary.sorted_island_names() {
                if let Some(stats) = summary.islands.get(island) {
                    writeln!(f, "  {island}: {stats}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::Site;

    fn snapshot() -> FleetSnapshot {
        FleetSnapshot::new(
            vec![
                Site::new(1, "a", "K", "Male'", 40.0),
                Site::new(2, "b", "K", "Dhiffushi", 40.0),
                Site::new(3, "c", "ADH", "Omadhoo", 40.0),
            ],
            vec![
                Reading::new(1, "2024-03", 2700.0),
                Reading::new(2, "2024-03", 5400.0),
                Reading::new(3, "2024-03", 4050.0),
                Reading::new(3, "2024-02", 100.0),
            ],
        )
    }

    fn operator(location: &str) -> Viewer {
        Viewer::new(
            User {
                id: "op".into(),
                name: "Op".into(),
                role: Role::User,
                accessible_sites: vec![1, 2, 3],
            },
            Some(location.to_string()),
        )
    }

    #[test]
    fn admin_report_covers_fleet() {
        let snap = snapshot();
        let viewer = Viewer::new(User::admin_for("root", &snap.sites), None);
        let report = FleetReport::build(&snap, &viewer);
        assert_eq!(report.latest_month.as_deref(), Some("2024-03"));
        assert_eq!(report.overall.total_production, 12150.0);
        assert_eq!(report.overall.low_performing_count, 1);
        assert_eq!(report.breakdown.total(), 3);
        assert_eq!(report.visible_atolls, vec!["ADH", "K"]);
        assert_eq!(report.sites.len(), 3);
    }

    #[test]
    fn operator_overall_is_island_scoped_but_atoll_is_whole() {
        let snap = snapshot();
        let report = FleetReport::build(&snap, &operator("K. Male'"));
        assert_eq!(report.overall.total_production, 2700.0);
        assert_eq!(report.visible_atolls, vec!["K"]);
        assert_eq!(report.hierarchy["K"].stats.total_production, 8100.0);
        assert_eq!(report.sites.len(), 1);
    }

    #[test]
    fn empty_snapshot_reports_zeros() {
        let report = FleetReport::build(
            &FleetSnapshot::default(),
            &Viewer::new(User::admin_for("root", &[]), None),
        );
        assert!(report.latest_month.is_none());
        assert_eq!(report.overall, StatData::default());
        assert!(report.hierarchy.is_empty());
        assert!(report.visible_atolls.is_empty());
    }

    #[test]
    fn display_lists_visible_atolls() {
        let snap = snapshot();
        let report = FleetReport::build(&snap, &operator("ADH. Omadhoo"));
        let text = report.to_string();
        assert!(text.contains("ADH Atoll"));
        assert!(!text.contains("K Atoll"));
        assert!(text.contains("  Omadhoo:"));
    }
}
