//! API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<ServerState>`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::data::{historical, parse_date, DataResolver};
use crate::scoring::{self, status::TierGuide};
use crate::types::{Assessment, BottomError, MarketData, ScoreResult};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct ServerState {
    pub resolver: DataResolver,
}

impl ServerState {
    pub fn new(resolver: DataResolver) -> Self {
        Self { resolver }
    }
}

pub type AppState = Arc<ServerState>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    /// ISO date; defaults to today.
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Maps domain errors onto HTTP responses.
pub struct ApiError(BottomError);

impl From<BottomError> for ApiError {
    fn from(e: BottomError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            BottomError::InvalidDate(_) | BottomError::DateOutOfRange { .. } => {
                StatusCode::BAD_REQUEST
            }
            BottomError::Llm { .. } | BottomError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            BottomError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/score?date=YYYY-MM-DD
pub async fn get_score(
    State(state): State<AppState>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<Assessment>, ApiError> {
    let date = match query.date.as_deref() {
        Some(s) => parse_date(s)?,
        None => state.resolver.today(),
    };
    let assessment = state.resolver.assess(date).await?;
    Ok(Json(assessment))
}

/// POST /api/score scores caller-supplied indicators directly.
pub async fn post_score(Json(data): Json<MarketData>) -> Json<ScoreResult> {
    let result = scoring::score(&data);
    debug!(data = %data, total = result.total_score, "Scored posted indicators");
    Json(result)
}

/// GET /api/history
pub async fn get_history() -> Json<Vec<Assessment>> {
    Json(historical::history())
}

/// GET /api/tiers
pub async fn get_tiers() -> Json<Vec<TierGuide>> {
    Json(scoring::status::tier_guide())
}

/// GET /health
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
