use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::services::analytics::{self, AnalyticsSummary};
use crate::state::AppState;

use super::auth::authenticate;

// GET /api/analytics
//
// Computed on demand by summing over the full booking set; there are no
// pre-computed rollups.
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let business = authenticate(&state, &headers)?;

    let (bookings, reviews) = {
        let db = state.db.lock().unwrap();
        (
            queries::get_bookings_for_business(&db, &business.id)?,
            queries::list_reviews(&db, &business.id)?,
        )
    };

    Ok(Json(analytics::summarize(&bookings, &reviews)))
}

#[derive(Deserialize)]
pub struct InsightRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct InsightResponse {
    pub answer: String,
}

// POST /api/insights
pub async fn get_insight(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<InsightRequest>,
) -> Result<Json<InsightResponse>, AppError> {
    let business = authenticate(&state, &headers)?;

    let question = payload.question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("question is required".to_string()));
    }

    let (bookings, reviews) = {
        let db = state.db.lock().unwrap();
        (
            queries::get_bookings_for_business(&db, &business.id)?,
            queries::list_reviews(&db, &business.id)?,
        )
    };
    let summary = analytics::summarize(&bookings, &reviews);
    let metrics = serde_json::to_value(&summary).unwrap_or_default();

    let answer = state
        .insights
        .advise(question, &metrics)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(InsightResponse { answer }))
}
