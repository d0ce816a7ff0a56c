use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        // auth
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        // public booking surface
        .route("/api/businesses/:slug", get(handlers::public::get_business))
        .route(
            "/api/businesses/:slug/services",
            get(handlers::public::get_services),
        )
        .route(
            "/api/businesses/:slug/reviews",
            get(handlers::public::get_reviews),
        )
        .route(
            "/api/businesses/:slug/customization",
            get(handlers::public::get_customization),
        )
        // :slug here is a business id; the param name must match the
        // sibling routes for the router to accept it.
        .route(
            "/api/businesses/:slug/bookings/:date",
            get(handlers::public::get_availability),
        )
        .route("/api/bookings", post(handlers::public::create_booking))
        .route("/api/weather/:city", get(handlers::public::get_weather))
        // owner dashboard
        .route("/api/services", get(handlers::services::list_services))
        .route("/api/services", post(handlers::services::create_service))
        .route("/api/services/:id", put(handlers::services::update_service))
        .route(
            "/api/services/:id",
            delete(handlers::services::delete_service),
        )
        .route(
            "/api/services/:id/image",
            post(handlers::services::upload_image),
        )
        .route("/api/bookings", get(handlers::bookings::list_bookings))
        .route(
            "/api/bookings/quick",
            post(handlers::bookings::quick_booking),
        )
        .route(
            "/api/bookings/:id/status",
            post(handlers::bookings::update_status),
        )
        .route("/api/clients", get(handlers::clients::list_clients))
        .route("/api/reviews", get(handlers::reviews::list_reviews))
        .route("/api/reviews", post(handlers::reviews::create_review))
        .route("/api/reviews/:id", delete(handlers::reviews::delete_review))
        .route("/api/team", get(handlers::team::list_team))
        .route("/api/team", post(handlers::team::add_team_member))
        .route("/api/team/:id", delete(handlers::team::remove_team_member))
        .route(
            "/api/client-customization",
            get(handlers::customization::get_customization),
        )
        .route(
            "/api/client-customization",
            post(handlers::customization::save_customization),
        )
        .route(
            "/api/integrations",
            get(handlers::integrations::list_integrations),
        )
        .route(
            "/api/integrations/connect",
            post(handlers::integrations::connect),
        )
        .route(
            "/api/integrations/disconnect",
            post(handlers::integrations::disconnect),
        )
        .route("/api/analytics", get(handlers::analytics::get_analytics))
        .route("/api/insights", post(handlers::analytics::get_insight))
        .route(
            "/api/notifications",
            get(handlers::notifications::list_notifications),
        )
        .route(
            "/api/notifications/:id/read",
            post(handlers::notifications::mark_read),
        )
        // platform admin
        .route(
            "/api/admin/businesses",
            get(handlers::admin::list_businesses),
        )
        .route(
            "/api/admin/businesses/:id/status",
            post(handlers::admin::update_business_status),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
