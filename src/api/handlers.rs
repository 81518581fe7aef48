//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use super::types::{
    AtollQuery, AtollView, BandCount, ErrorResponse, SiteResponse, SummaryResponse,
};
use super::{AppState, HISTORY_MONTHS};
use crate::engine::{Role, SiteHistory, SiteStatus, filter_visible_atolls, sorted_atoll_names};
use crate::fleet::YearMonth;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: String) -> ApiError {
    (status, Json(ErrorResponse { error: message }))
}

/// Returns the headline figures for the configured viewer.
///
/// `GET /summary` → 200 + `SummaryResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    let report = &state.report;
    Json(SummaryResponse {
        latest_month: report.latest_month.clone(),
        overall: report.overall.clone(),
        breakdown: report.breakdown,
        bands: report
            .breakdown
            .non_empty()
            .into_iter()
            .map(BandCount::from)
            .collect(),
    })
}

/// Returns visible atolls, sorted, each with sorted island statistics.
///
/// `GET /atolls` → the configured viewer's atolls
/// `GET /atolls?role=USER&location=K.%20Male'` → filtered as that viewer
/// `GET /atolls?role=root` → 400 + `ErrorResponse`
pub async fn get_atolls(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AtollQuery>,
) -> Result<Json<Vec<AtollView>>, ApiError> {
    let role = match query.role.as_deref() {
        Some(r) => r
            .parse::<Role>()
            .map_err(|e| error(StatusCode::BAD_REQUEST, e.to_string()))?,
        None => state.viewer.role(),
    };
    let location = query
        .location
        .as_deref()
        .or(state.viewer.selected_location.as_deref());

    let hierarchy = &state.report.hierarchy;
    let visible = filter_visible_atolls(&sorted_atoll_names(hierarchy), role, location);
    let atolls: Vec<AtollView> = visible
        .iter()
        .filter_map(|name| hierarchy.get(name).map(|summary| AtollView::new(name, summary)))
        .collect();

    Ok(Json(atolls))
}

/// Returns one site's latest status and trailing history.
///
/// `GET /sites/{id}` → 200 + `SiteResponse` JSON
/// `GET /sites/999` → 404 when the site is unknown or not accessible
pub async fn get_site(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<SiteResponse>, ApiError> {
    let site = state
        .snapshot
        .site(id)
        .filter(|s| state.viewer.user.accessible_sites.contains(&s.id()))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, format!("site {id} not found")))?;

    let through = state
        .report
        .latest_month
        .as_deref()
        .and_then(|m| m.parse::<YearMonth>().ok())
        .unwrap_or_else(YearMonth::current);

    Ok(Json(SiteResponse {
        status: SiteStatus::for_site(site, &state.snapshot.readings),
        history: SiteHistory::trailing(site, &state.snapshot.readings, through, HISTORY_MONTHS),
    }))
}
