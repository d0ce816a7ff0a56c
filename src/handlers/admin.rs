use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Business, BusinessStatus};
use crate::state::AppState;

/// Platform admin uses a static bearer token, separate from business
/// sessions.
fn check_admin(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() || token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// GET /api/admin/businesses
pub async fn list_businesses(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Business>>, AppError> {
    check_admin(&headers, &state.config.admin_token)?;

    let businesses = {
        let db = state.db.lock().unwrap();
        queries::list_businesses(&db)?
    };
    Ok(Json(businesses))
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

// POST /api/admin/businesses/:id/status
pub async fn update_business_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<StatusRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_admin(&headers, &state.config.admin_token)?;

    let status = BusinessStatus::parse(&payload.status)
        .ok_or_else(|| AppError::Validation(format!("unknown status: {}", payload.status)))?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::update_business_status(&db, &id, status)?
    };

    if updated {
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::NotFound("business".to_string()))
    }
}
