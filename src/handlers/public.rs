use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Business, BusinessStatus, ClientCustomization, Review, Service};
use crate::services::scheduling::{self, SlotAvailability};
use crate::services::weather::{self, WeatherReport};
use crate::state::AppState;

use super::bookings::{book_slot, NewBookingRequest};

fn visible_business(state: &AppState, slug: &str) -> Result<Business, AppError> {
    let db = state.db.lock().unwrap();
    queries::get_business_by_slug(&db, slug)?
        .filter(|b| b.status != BusinessStatus::Suspended)
        .ok_or_else(|| AppError::NotFound(format!("business '{slug}'")))
}

// GET /api/businesses/:slug
pub async fn get_business(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Business>, AppError> {
    Ok(Json(visible_business(&state, &slug)?))
}

// GET /api/businesses/:slug/services
pub async fn get_services(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<Service>>, AppError> {
    let business = visible_business(&state, &slug)?;

    let services = {
        let db = state.db.lock().unwrap();
        queries::get_services_by_business_id(&db, &business.id, false)?
    };
    Ok(Json(services))
}

// GET /api/businesses/:slug/reviews
pub async fn get_reviews(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<Review>>, AppError> {
    let business = visible_business(&state, &slug)?;

    let reviews = {
        let db = state.db.lock().unwrap();
        queries::list_reviews(&db, &business.id)?
    };
    Ok(Json(reviews))
}

// GET /api/businesses/:slug/customization
pub async fn get_customization(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ClientCustomization>, AppError> {
    let business = visible_business(&state, &slug)?;

    let customization = {
        let db = state.db.lock().unwrap();
        queries::get_customization(&db, &business.id)?
    };
    Ok(Json(
        customization.unwrap_or_else(|| ClientCustomization::defaults(&business.id)),
    ))
}

// GET /api/businesses/:business_id/bookings/:date
//
// Per-slot availability for one Eastern civil day. The booking wizard
// disables the slots reported as booked.
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path((business_id, date)): Path<(String, String)>,
) -> Result<Json<Vec<SlotAvailability>>, AppError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid date: {date}")))?;

    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_business_by_id(&db, &business_id)?
            .ok_or_else(|| AppError::NotFound("business".to_string()))?;

        let (start, end) = scheduling::day_window_utc(date);
        queries::get_active_bookings_in_range(&db, &business_id, &start, &end)?
    };

    Ok(Json(scheduling::slot_availability(&bookings, date)))
}

#[derive(Deserialize)]
pub struct PublicBookingRequest {
    pub business_slug: String,
    #[serde(flatten)]
    pub booking: NewBookingRequest,
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PublicBookingRequest>,
) -> Result<Json<crate::models::BookingDetail>, AppError> {
    let db = state.db.lock().unwrap();

    let business = queries::get_business_by_slug(&db, &payload.business_slug)?
        .filter(|b| b.status != BusinessStatus::Suspended)
        .ok_or_else(|| AppError::NotFound(format!("business '{}'", payload.business_slug)))?;

    let detail = book_slot(&db, &business, &payload.booking)?;
    Ok(Json(detail))
}

// GET /api/weather/:city
//
// Best-effort; degrades to a static payload rather than failing.
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Json<WeatherReport> {
    match state.weather.current(&city).await {
        Ok(report) => Json(report),
        Err(e) => {
            tracing::warn!(error = %e, city = %city, "weather lookup failed, using fallback");
            Json(weather::fallback_report(&city))
        }
    }
}
