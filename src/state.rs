use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::insights::InsightProvider;
use crate::services::storage::ObjectStore;
use crate::services::weather::WeatherProvider;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub weather: Box<dyn WeatherProvider>,
    pub insights: Box<dyn InsightProvider>,
    pub storage: Box<dyn ObjectStore>,
}
