use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Review;
use crate::state::AppState;

use super::auth::authenticate;

// GET /api/reviews
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Review>>, AppError> {
    let business = authenticate(&state, &headers)?;

    let reviews = {
        let db = state.db.lock().unwrap();
        queries::list_reviews(&db, &business.id)?
    };
    Ok(Json(reviews))
}

#[derive(Deserialize)]
pub struct ReviewRequest {
    pub client_name: String,
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

// POST /api/reviews — owner-entered (e.g. transcribed from elsewhere).
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<Review>, AppError> {
    let business = authenticate(&state, &headers)?;

    if payload.client_name.trim().is_empty() {
        return Err(AppError::Validation("client name is required".to_string()));
    }
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::Validation("rating must be 1-5".to_string()));
    }

    let review = Review {
        id: uuid::Uuid::new_v4().to_string(),
        business_id: business.id,
        client_name: payload.client_name.trim().to_string(),
        rating: payload.rating,
        comment: payload.comment,
        created_at: Utc::now().naive_utc(),
    };

    {
        let db = state.db.lock().unwrap();
        queries::create_review(&db, &review)?;
    }
    Ok(Json(review))
}

// DELETE /api/reviews/:id
pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let business = authenticate(&state, &headers)?;

    let deleted = {
        let db = state.db.lock().unwrap();
        queries::delete_review(&db, &id, &business.id)?
    };

    if deleted {
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::NotFound("review".to_string()))
    }
}
