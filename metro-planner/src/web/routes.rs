//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/lines", get(list_lines))
        .route("/api/stations", get(list_stations))
        .route("/api/routes", get(plan_routes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every line with its stations.
async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    Json(LinesResponse::from_network(state.planner.network()))
}

/// List every station with its zone and lines.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    Json(StationsResponse::from_network(state.planner.network()))
}

/// Plan routes between two stations.
async fn plan_routes(
    State(state): State<AppState>,
    Query(query): Query<RoutesQuery>,
) -> Result<Json<RoutesResponse>, AppError> {
    let from = required(query.from, "from")?;
    let to = required(query.to, "to")?;

    let network = state.planner.network();
    for station in [&from, &to] {
        if !network.contains_station(station) {
            return Err(AppError::NotFound {
                message: format!("Unknown station: {station}"),
            });
        }
    }

    let routes = state.planner.plan(&from, &to);
    info!(%from, %to, routes = routes.len(), "Planned routes");

    Ok(Json(RoutesResponse { from, to, routes }))
}

/// Returns the trimmed parameter, or a bad request if it is missing or blank.
fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::BadRequest {
            message: format!("Missing query parameter: {name}"),
        }),
    }
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound { message: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        warn!(%status, %message, "Request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
