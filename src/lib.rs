//! Performance summaries for a fleet of solar installations grouped by atoll
//! and island.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod demo;
/// Aggregation, classification, and access filtering.
pub mod engine;
pub mod fleet;
pub mod io;
pub mod logging;
