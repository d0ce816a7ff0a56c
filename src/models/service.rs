use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Services are soft-deleted via `is_active` rather than removed, so
/// historical bookings keep a resolvable service reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub business_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
