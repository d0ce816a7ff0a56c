use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub business_id: String,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}
