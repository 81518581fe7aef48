//! Fleet data model: installations, monthly meter readings, and snapshots.

pub mod month;
pub mod reading;
pub mod site;
pub mod snapshot;

pub use month::YearMonth;
pub use reading::{Reading, ReadingAmendment};
pub use site::{Baseline, Site, SiteEdit};
pub use snapshot::{FleetSnapshot, SnapshotIssue};
