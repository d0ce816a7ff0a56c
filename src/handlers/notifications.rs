use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Notification;
use crate::state::AppState;

use super::auth::authenticate;

// GET /api/notifications
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Notification>>, AppError> {
    let business = authenticate(&state, &headers)?;

    let notifications = {
        let db = state.db.lock().unwrap();
        queries::list_notifications(&db, &business.id, 50)?
    };
    Ok(Json(notifications))
}

// POST /api/notifications/:id/read
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let business = authenticate(&state, &headers)?;

    let marked = {
        let db = state.db.lock().unwrap();
        queries::mark_notification_read(&db, &id, &business.id)?
    };

    if marked {
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::NotFound("notification".to_string()))
    }
}
