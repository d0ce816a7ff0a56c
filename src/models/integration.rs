use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Integration {
    pub id: String,
    pub business_id: String,
    pub provider: String,
    pub connected: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
