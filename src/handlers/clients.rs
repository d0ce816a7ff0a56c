use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Client;
use crate::state::AppState;

use super::auth::authenticate;

// GET /api/clients
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Client>>, AppError> {
    let business = authenticate(&state, &headers)?;

    let clients = {
        let db = state.db.lock().unwrap();
        queries::list_clients(&db, &business.id)?
    };
    Ok(Json(clients))
}
