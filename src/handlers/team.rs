use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::TeamMember;
use crate::state::AppState;

use super::auth::authenticate;

// GET /api/team
pub async fn list_team(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<TeamMember>>, AppError> {
    let business = authenticate(&state, &headers)?;

    let members = {
        let db = state.db.lock().unwrap();
        queries::list_team_members(&db, &business.id)?
    };
    Ok(Json(members))
}

#[derive(Deserialize)]
pub struct TeamMemberRequest {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub email: Option<String>,
}

// POST /api/team
pub async fn add_team_member(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<TeamMemberRequest>,
) -> Result<Json<TeamMember>, AppError> {
    let business = authenticate(&state, &headers)?;

    if payload.name.trim().is_empty() || payload.role.trim().is_empty() {
        return Err(AppError::Validation("name and role are required".to_string()));
    }

    let member = TeamMember {
        id: uuid::Uuid::new_v4().to_string(),
        business_id: business.id,
        name: payload.name.trim().to_string(),
        role: payload.role.trim().to_string(),
        email: payload.email,
        is_active: true,
        created_at: Utc::now().naive_utc(),
    };

    {
        let db = state.db.lock().unwrap();
        queries::create_team_member(&db, &member)?;
    }
    Ok(Json(member))
}

// DELETE /api/team/:id — soft delete.
pub async fn remove_team_member(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let business = authenticate(&state, &headers)?;

    let removed = {
        let db = state.db.lock().unwrap();
        queries::deactivate_team_member(&db, &id, &business.id)?
    };

    if removed {
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::NotFound("team member".to_string()))
    }
}
