use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{Timelike, Utc};
use rusqlite::Connection;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingDetail, BookingStatus, Business, Client};
use crate::services::scheduling;
use crate::state::AppState;

use super::auth::authenticate;

#[derive(Deserialize)]
pub struct NewBookingRequest {
    pub service_id: String,
    /// Civil Eastern time, `YYYY-MM-DDTHH:MM:SS`, assembled client-side
    /// from the selected date and slot.
    pub appointment_at: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Shared by the public booking flow and dashboard quick-booking.
///
/// Runs entirely under one connection lock: the slot conflict is
/// re-checked right before the insert, so two concurrent submissions for
/// the same slot cannot both land.
pub(crate) fn book_slot(
    conn: &Connection,
    business: &Business,
    req: &NewBookingRequest,
) -> Result<BookingDetail, AppError> {
    let first_name = req.first_name.trim();
    let last_name = req.last_name.trim();
    let phone = req.phone.trim();
    if first_name.is_empty() || last_name.is_empty() || phone.is_empty() {
        return Err(AppError::Validation(
            "first name, last name, and phone are required".to_string(),
        ));
    }

    let service = queries::get_service(conn, &req.service_id)?
        .filter(|s| s.business_id == business.id)
        .ok_or_else(|| AppError::NotFound("service".to_string()))?;
    if !service.is_active {
        return Err(AppError::Validation("service is no longer offered".to_string()));
    }

    let local = scheduling::parse_civil(&req.appointment_at)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let appointment_at = scheduling::local_to_utc(local);

    let (day_start, day_end) = scheduling::day_window_utc(local.date());
    let day_bookings =
        queries::get_active_bookings_in_range(conn, &business.id, &day_start, &day_end)?;
    if scheduling::slot_taken(&day_bookings, local.date(), local.hour(), local.minute()) {
        return Err(AppError::SlotTaken);
    }

    // Resolve-or-create by phone; first match wins, the submitted name is
    // not written back over an existing record.
    let client = match queries::find_client_by_phone(conn, &business.id, phone)? {
        Some(existing) => existing,
        None => {
            let client = Client {
                id: uuid::Uuid::new_v4().to_string(),
                business_id: business.id.clone(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                phone: phone.to_string(),
                email: req.email.clone(),
                created_at: Utc::now().naive_utc(),
            };
            queries::create_client(conn, &client)?;
            client
        }
    };

    let now = Utc::now().naive_utc();
    let booking = Booking {
        id: uuid::Uuid::new_v4().to_string(),
        business_id: business.id.clone(),
        service_id: service.id.clone(),
        client_id: client.id.clone(),
        appointment_at,
        status: BookingStatus::Confirmed,
        notes: req.notes.clone(),
        created_at: now,
        updated_at: now,
    };
    queries::create_booking(conn, &booking)?;

    queries::create_notification(
        conn,
        &business.id,
        "booking_created",
        &format!(
            "{} {} booked {} for {}",
            client.first_name, client.last_name, service.name, req.appointment_at
        ),
    )?;

    tracing::info!(
        business = %business.slug,
        service = %service.name,
        at = %appointment_at,
        "booking created"
    );

    Ok(BookingDetail {
        booking,
        service_name: service.name,
        service_price_cents: service.price_cents,
        service_duration_minutes: service.duration_minutes,
        client_first_name: client.first_name,
        client_last_name: client.last_name,
        client_phone: client.phone,
    })
}

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingDetail>>, AppError> {
    let business = authenticate(&state, &headers)?;

    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_bookings_for_business(&db, &business.id)?
    };
    Ok(Json(bookings))
}

// POST /api/bookings/quick
pub async fn quick_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<NewBookingRequest>,
) -> Result<Json<BookingDetail>, AppError> {
    let business = authenticate(&state, &headers)?;

    let detail = {
        let db = state.db.lock().unwrap();
        book_slot(&db, &business, &payload)?
    };
    Ok(Json(detail))
}

#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

// POST /api/bookings/:id/status
//
// Any transition is accepted; the status enum is the only state machine.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let business = authenticate(&state, &headers)?;

    let status = BookingStatus::parse(&payload.status)
        .ok_or_else(|| AppError::Validation(format!("unknown status: {}", payload.status)))?;

    let updated = {
        let db = state.db.lock().unwrap();
        let booking = queries::get_booking(&db, &id)?
            .filter(|b| b.business_id == business.id)
            .ok_or_else(|| AppError::NotFound("booking".to_string()))?;
        queries::update_booking_status(&db, &booking.id, status)?
    };

    Ok(Json(serde_json::json!({ "ok": updated })))
}
