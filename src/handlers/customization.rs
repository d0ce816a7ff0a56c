use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::ClientCustomization;
use crate::state::AppState;

use super::auth::authenticate;

// GET /api/client-customization
pub async fn get_customization(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ClientCustomization>, AppError> {
    let business = authenticate(&state, &headers)?;

    let customization = {
        let db = state.db.lock().unwrap();
        queries::get_customization(&db, &business.id)?
    };
    Ok(Json(
        customization.unwrap_or_else(|| ClientCustomization::defaults(&business.id)),
    ))
}

#[derive(Deserialize)]
pub struct CustomizationRequest {
    pub primary_color: String,
    pub accent_color: String,
    pub show_services: bool,
    pub show_reviews: bool,
    pub show_team: bool,
    #[serde(default)]
    pub welcome_message: Option<String>,
}

// POST /api/client-customization
pub async fn save_customization(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CustomizationRequest>,
) -> Result<Json<ClientCustomization>, AppError> {
    let business = authenticate(&state, &headers)?;

    for color in [&payload.primary_color, &payload.accent_color] {
        let valid = color.starts_with('#')
            && (color.len() == 4 || color.len() == 7)
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(AppError::Validation(format!("invalid color: {color}")));
        }
    }

    let customization = ClientCustomization {
        business_id: business.id,
        primary_color: payload.primary_color,
        accent_color: payload.accent_color,
        show_services: payload.show_services,
        show_reviews: payload.show_reviews,
        show_team: payload.show_team,
        welcome_message: payload.welcome_message,
    };

    {
        let db = state.db.lock().unwrap();
        queries::upsert_customization(&db, &customization)?;
    }
    Ok(Json(customization))
}
