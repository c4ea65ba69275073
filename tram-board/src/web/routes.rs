//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::board::BoardError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_departures))
        .route("/as-text", get(departures_as_text))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All upcoming departures towards CERN.
async fn list_departures(State(state): State<AppState>) -> Result<Json<DeparturesResponse>, AppError> {
    let departures = state.board.departures().await?;
    Ok(Json(DeparturesResponse { departures }))
}

/// The next departures as a German sentence.
async fn departures_as_text(
    State(state): State<AppState>,
    query: Result<Query<TextRequest>, QueryRejection>,
) -> Result<Json<TextResponse>, AppError> {
    let Query(req) = query.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;

    let count = req.count();
    if count == 0 {
        return Err(AppError::BadRequest {
            message: "num must be at least 1".to_string(),
        });
    }

    let text = state.board.describe(count).await?;
    Ok(Json(TextResponse { text }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
}

impl From<BoardError> for AppError {
    fn from(e: BoardError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(status = %StatusCode::BAD_REQUEST, "{message}");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Upstream { message } => {
                error!(status = %StatusCode::BAD_GATEWAY, "{message}");
                (StatusCode::BAD_GATEWAY, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
