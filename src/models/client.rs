use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Clients are identified primarily by phone number. A record is created
/// lazily on first booking when no existing client matches the phone;
/// no merge happens if the same person later books under another number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub business_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
}
