use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Integration;
use crate::state::AppState;

use super::auth::authenticate;

// GET /api/integrations
pub async fn list_integrations(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Integration>>, AppError> {
    let business = authenticate(&state, &headers)?;

    let integrations = {
        let db = state.db.lock().unwrap();
        queries::list_integrations(&db, &business.id)?
    };
    Ok(Json(integrations))
}

#[derive(Deserialize)]
pub struct IntegrationRequest {
    pub provider: String,
}

// POST /api/integrations/connect
pub async fn connect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<IntegrationRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let business = authenticate(&state, &headers)?;

    let provider = payload.provider.trim().to_lowercase();
    if provider.is_empty() {
        return Err(AppError::Validation("provider is required".to_string()));
    }

    {
        let db = state.db.lock().unwrap();
        queries::connect_integration(&db, &business.id, &provider)?;
    }
    Ok(Json(serde_json::json!({ "ok": true, "provider": provider })))
}

// POST /api/integrations/disconnect
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<IntegrationRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let business = authenticate(&state, &headers)?;

    let provider = payload.provider.trim().to_lowercase();
    let disconnected = {
        let db = state.db.lock().unwrap();
        queries::disconnect_integration(&db, &business.id, &provider)?
    };

    if disconnected {
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::NotFound(format!("integration '{provider}'")))
    }
}
