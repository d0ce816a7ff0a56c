use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_token: String,
    pub session_secret: String,
    pub weather_url: String,
    pub insights_api_key: String,
    pub insights_model: String,
    pub upload_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "slotbook.db".to_string()),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            session_secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| "dev-secret-do-not-use".to_string()),
            weather_url: env::var("WEATHER_URL").unwrap_or_else(|_| "https://wttr.in".to_string()),
            insights_api_key: env::var("INSIGHTS_API_KEY").unwrap_or_default(),
            insights_model: env::var("INSIGHTS_MODEL")
                .unwrap_or_else(|_| "llama-3.1-8b-instant".to_string()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
        }
    }
}
