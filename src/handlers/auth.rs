use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Business, BusinessStatus, User};
use crate::services::slug;
use crate::state::AppState;

/// Keyed digest for stored credentials. The real deployment hands auth
/// to an external provider; this keeps login self-contained for the API.
pub fn digest_password(secret: &str, password: &str) -> String {
    let mut mac = match Hmac::<Sha1>::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return String::new(),
    };
    mac.update(password.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

/// Resolves the Bearer session token to the owner's business.
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Business, AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let db = state.db.lock().unwrap();
    let user_id = queries::get_session_user_id(&db, token)?.ok_or(AppError::Unauthorized)?;
    let business =
        queries::get_business_for_user(&db, &user_id)?.ok_or(AppError::Unauthorized)?;

    if business.status == BusinessStatus::Suspended {
        return Err(AppError::Forbidden);
    }

    Ok(business)
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub business_name: String,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub business: Business,
}

// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("a valid email is required".to_string()));
    }
    if payload.password.len() < 8 {
        return Err(AppError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    let business_name = payload.business_name.trim();
    if business_name.is_empty() {
        return Err(AppError::Validation("business name is required".to_string()));
    }

    let now = Utc::now().naive_utc();
    let db = state.db.lock().unwrap();

    if queries::get_user_by_email(&db, &email)?.is_some() {
        return Err(AppError::Validation("email is already registered".to_string()));
    }

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email,
        password_digest: digest_password(&state.config.session_secret, &payload.password),
        created_at: now,
    };
    queries::create_user(&db, &user)?;

    let business = Business {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.id.clone(),
        slug: slug::unique_slug(&db, business_name)?,
        name: business_name.to_string(),
        business_type: payload
            .business_type
            .unwrap_or_else(|| "general".to_string()),
        phone: payload.phone,
        email: Some(user.email.clone()),
        address: None,
        description: None,
        status: BusinessStatus::Active,
        created_at: now,
        updated_at: now,
    };
    queries::create_business(&db, &business)?;

    let token = uuid::Uuid::new_v4().to_string();
    queries::create_session(&db, &token, &user.id)?;

    tracing::info!(slug = %business.slug, "registered business");

    Ok(Json(SessionResponse { token, business }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();
    let db = state.db.lock().unwrap();

    let user = queries::get_user_by_email(&db, &email)?.ok_or(AppError::Unauthorized)?;
    let digest = digest_password(&state.config.session_secret, &payload.password);
    if digest.is_empty() || digest != user.password_digest {
        return Err(AppError::Unauthorized);
    }

    let business =
        queries::get_business_for_user(&db, &user.id)?.ok_or(AppError::Unauthorized)?;

    let token = uuid::Uuid::new_v4().to_string();
    queries::create_session(&db, &token, &user.id)?;

    Ok(Json(SessionResponse { token, business }))
}

// POST /api/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let token = auth.strip_prefix("Bearer ").unwrap_or("");

    let db = state.db.lock().unwrap();
    queries::delete_session(&db, token)?;

    Ok(Json(serde_json::json!({ "ok": true })))
}
