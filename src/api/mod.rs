//! Read-only REST API over a computed fleet report.
//!
//! Provides three GET endpoints:
//! - `/summary`: latest month, overall statistics, and performance breakdown
//! - `/atolls`: visible atolls with per-island statistics
//! - `/sites/{id}`: one site's status and trailing monthly history

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::engine::{FleetReport, Viewer};
use crate::fleet::FleetSnapshot;

pub use types::{AtollView, BandCount, ErrorResponse, IslandView, SiteResponse, SummaryResponse};

/// Months of history returned by `/sites/{id}`.
pub const HISTORY_MONTHS: usize = 12;

/// Immutable application state shared across all request handlers.
///
/// Built once at startup and wrapped in `Arc`; no locks needed since all
/// data is read-only.
pub struct AppState {
    /// Snapshot the report was computed from.
    pub snapshot: FleetSnapshot,
    /// Viewer the report was computed for.
    pub viewer: Viewer,
    /// Precomputed report for `viewer`.
    pub report: FleetReport,
}

impl AppState {
    pub fn new(snapshot: FleetSnapshot, viewer: Viewer) -> Self {
        let report = FleetReport::build(&snapshot, &viewer);
        Self {
            snapshot,
            viewer,
            report,
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/atolls", get(handlers::get_atolls))
        .route("/sites/{id}", get(handlers::get_site))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
