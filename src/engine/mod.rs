//! Aggregation and performance-classification engine.
//!
//! Every function here is pure: it borrows a snapshot of sites and readings
//! and returns owned results without mutating its inputs.

/// Viewer roles, access lists, and location filters.
pub mod access;
pub mod classify;
pub mod hierarchy;
pub mod month;
pub mod report;
/// Per-site status, history, and energy formatting.
pub mod site_view;
pub mod stats;

pub use access::{
    ALL_LOCATIONS, Location, Role, User, accessible_sites, filter_visible_atolls,
    location_options, scope_sites,
};
pub use classify::{
    PerformanceBand, PerformanceBreakdown, classify_for_month, classify_performance,
};
pub use hierarchy::{
    AtollSummary, Hierarchy, build_hierarchy, build_hierarchy_for_month, sorted_atoll_names,
};
pub use month::{readings_for_month, resolve_latest_month};
pub use report::{FleetReport, Viewer};
pub use site_view::{EnergyQuantity, HistoryPoint, SiteFlag, SiteHistory, SiteStatus};
pub use stats::{StatData, compute_group_stats, is_low_performer, site_efficiency};
