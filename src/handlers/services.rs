use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use base64::Engine;
use chrono::Utc;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Service;
use crate::services::storage;
use crate::state::AppState;

use super::auth::authenticate;

// GET /api/services
//
// Owner view includes soft-deleted services; the public listing does not.
pub async fn list_services(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Service>>, AppError> {
    let business = authenticate(&state, &headers)?;

    let services = {
        let db = state.db.lock().unwrap();
        queries::get_services_by_business_id(&db, &business.id, true)?
    };
    Ok(Json(services))
}

#[derive(Deserialize)]
pub struct ServiceRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    pub duration_minutes: i32,
}

fn validate_service(req: &ServiceRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("service name is required".to_string()));
    }
    if req.price_cents < 0 {
        return Err(AppError::Validation("price cannot be negative".to_string()));
    }
    if req.duration_minutes <= 0 {
        return Err(AppError::Validation(
            "duration must be a positive number of minutes".to_string(),
        ));
    }
    Ok(())
}

// POST /api/services
pub async fn create_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ServiceRequest>,
) -> Result<Json<Service>, AppError> {
    let business = authenticate(&state, &headers)?;
    validate_service(&payload)?;

    let now = Utc::now().naive_utc();
    let service = Service {
        id: uuid::Uuid::new_v4().to_string(),
        business_id: business.id,
        name: payload.name.trim().to_string(),
        description: payload.description,
        price_cents: payload.price_cents,
        duration_minutes: payload.duration_minutes,
        image_url: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    {
        let db = state.db.lock().unwrap();
        queries::create_service(&db, &service)?;
    }
    Ok(Json(service))
}

fn owned_service(
    db: &rusqlite::Connection,
    business_id: &str,
    service_id: &str,
) -> Result<Service, AppError> {
    queries::get_service(db, service_id)?
        .filter(|s| s.business_id == business_id)
        .ok_or_else(|| AppError::NotFound("service".to_string()))
}

// PUT /api/services/:id
pub async fn update_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<ServiceRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let business = authenticate(&state, &headers)?;
    validate_service(&payload)?;

    let updated = {
        let db = state.db.lock().unwrap();
        let service = owned_service(&db, &business.id, &id)?;
        queries::update_service(
            &db,
            &service.id,
            payload.name.trim(),
            payload.description.as_deref(),
            payload.price_cents,
            payload.duration_minutes,
        )?
    };
    Ok(Json(serde_json::json!({ "ok": updated })))
}

// DELETE /api/services/:id — soft delete via is_active.
pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let business = authenticate(&state, &headers)?;

    let deleted = {
        let db = state.db.lock().unwrap();
        let service = owned_service(&db, &business.id, &id)?;
        queries::deactivate_service(&db, &service.id)?
    };
    Ok(Json(serde_json::json!({ "ok": deleted })))
}

#[derive(Deserialize)]
pub struct ImageUploadRequest {
    /// Base64-encoded image bytes.
    pub data: String,
    pub mime: String,
}

// POST /api/services/:id/image
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<ImageUploadRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let business = authenticate(&state, &headers)?;

    let ext = storage::extension_for_mime(&payload.mime)
        .ok_or_else(|| AppError::Validation(format!("unsupported image type: {}", payload.mime)))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&payload.data)
        .map_err(|_| AppError::Validation("image data is not valid base64".to_string()))?;
    if bytes.len() > storage::MAX_UPLOAD_BYTES {
        return Err(AppError::PayloadTooLarge);
    }

    let previous = {
        let db = state.db.lock().unwrap();
        owned_service(&db, &business.id, &id)?.image_url
    };

    let key = format!("{}.{ext}", uuid::Uuid::new_v4());
    let url = state
        .storage
        .put(&key, &bytes, &payload.mime)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    {
        let db = state.db.lock().unwrap();
        queries::set_service_image(&db, &id, &url)?;
    }

    // Replaced images are deleted best-effort.
    if let Some(old_key) = previous.as_deref().and_then(|u| u.strip_prefix("/uploads/")) {
        if let Err(e) = state.storage.delete(old_key).await {
            tracing::warn!(error = %e, key = %old_key, "failed to delete replaced image");
        }
    }

    Ok(Json(serde_json::json!({ "url": url })))
}
