use serde::{Deserialize, Serialize};

/// White-label presentation preferences for a business's client portal.
/// One row per business; `defaults()` is served when no row exists yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCustomization {
    pub business_id: String,
    pub primary_color: String,
    pub accent_color: String,
    pub show_services: bool,
    pub show_reviews: bool,
    pub show_team: bool,
    pub welcome_message: Option<String>,
}

impl ClientCustomization {
    pub fn defaults(business_id: &str) -> Self {
        Self {
            business_id: business_id.to_string(),
            primary_color: "#2563eb".to_string(),
            accent_color: "#f59e0b".to_string(),
            show_services: true,
            show_reviews: true,
            show_team: true,
            welcome_message: None,
        }
    }
}
