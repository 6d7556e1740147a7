//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::{Departure, filter_and_sort};
use crate::upstream::UpstreamError;

use super::dto::DeparturesQuery;
use super::report::DeparturesReport;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/departures", get(departures_text))
        .route("/departures/json", get(departures_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Plain-text departures report.
async fn departures_text(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let query = DeparturesQuery::from_pairs(pairs);
    let (site_id, departures) = load_departures(&state, query).await?;

    let body = DeparturesReport::new(&site_id, &departures)
        .render()
        .map_err(AppError::Render)?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response())
}

/// Departures as a JSON array; `[]` when nothing matches.
async fn departures_json(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let query = DeparturesQuery::from_pairs(pairs);
    let (_, departures) = load_departures(&state, query).await?;
    Ok(Json(departures).into_response())
}

/// Fetch, filter and sort the departures for the requested site.
async fn load_departures(
    state: &AppState,
    query: DeparturesQuery,
) -> Result<(String, Vec<Departure>), AppError> {
    let site_id = query
        .site_id()
        .map(str::to_owned)
        .ok_or(AppError::MissingSiteId)?;

    let response = state.upstream.fetch_departures(&site_id).await?;
    let departures = filter_and_sort(&response.departures, &query.into_filter());

    Ok((site_id, departures))
}

/// Application error type.
///
/// Every variant is reported as a single plain-text line, whichever
/// endpoint was called.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No (or an empty) `siteId` query parameter
    #[error("siteId query parameter is required")]
    MissingSiteId,

    #[error("Error fetching departure data: {0}")]
    Fetch(#[from] UpstreamError),

    #[error("Error rendering departures: {0}")]
    Render(#[source] askama::Error),
}

impl AppError {
    /// Status code for this error.
    ///
    /// Every variant, `MissingSiteId` included, maps to 500.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingSiteId => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Fetch(_) | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        warn!(%status, error = %message, "request failed");

        (
            status,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            format!("{message}\n"),
        )
            .into_response()
    }
}
