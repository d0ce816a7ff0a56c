use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use slotbook::config::AppConfig;
use slotbook::db;
use slotbook::routes;
use slotbook::services::insights::InsightProvider;
use slotbook::services::storage::ObjectStore;
use slotbook::services::weather::{WeatherProvider, WeatherReport};
use slotbook::state::AppState;

// ── Mock Providers ──

struct MockWeather {
    fail: bool,
}

#[async_trait]
impl WeatherProvider for MockWeather {
    async fn current(&self, city: &str) -> anyhow::Result<WeatherReport> {
        if self.fail {
            anyhow::bail!("weather service unreachable");
        }
        Ok(WeatherReport {
            city: city.to_string(),
            temp_f: 55.0,
            condition: "Rain".to_string(),
        })
    }
}

struct MockInsights;

#[async_trait]
impl InsightProvider for MockInsights {
    async fn advise(&self, question: &str, _metrics: &Value) -> anyhow::Result<String> {
        Ok(format!("advice about: {question}"))
    }
}

struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, bytes: &[u8], _mime: &str) -> anyhow::Result<String> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
        Ok(format!("/uploads/{key}"))
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        admin_token: "test-admin-token".to_string(),
        session_secret: "test-secret".to_string(),
        weather_url: "http://localhost:0".to_string(),
        insights_api_key: String::new(),
        insights_model: "test".to_string(),
        upload_dir: "uploads".to_string(),
    }
}

fn test_app() -> Router {
    test_app_with_weather(false)
}

fn test_app_with_weather(weather_fails: bool) -> Router {
    let conn = db::init_db(":memory:").unwrap();
    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: test_config(),
        weather: Box::new(MockWeather {
            fail: weather_fails,
        }),
        insights: Box::new(MockInsights),
        storage: Box::new(MemoryStore::new()),
    });
    routes::api_router(state)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers a business and returns (session token, business json).
async fn register(app: &Router, name: &str, email: &str) -> (String, Value) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            &json!({
                "email": email,
                "password": "hunter2hunter2",
                "business_name": name,
                "business_type": "salon",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    (token, body["business"].clone())
}

async fn create_service(app: &Router, token: &str, name: &str, price_cents: i64) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/services",
            Some(token),
            &json!({
                "name": name,
                "price_cents": price_cents,
                "duration_minutes": 30,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

fn booking_payload(slug: &str, service_id: &str, at: &str, name: (&str, &str), phone: &str) -> Value {
    json!({
        "business_slug": slug,
        "service_id": service_id,
        "appointment_at": at,
        "first_name": name.0,
        "last_name": name.1,
        "phone": phone,
    })
}

// ── Auth ──

#[tokio::test]
async fn test_register_returns_session_and_slug() {
    let app = test_app();
    let (token, business) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;

    assert!(!token.is_empty());
    assert_eq!(business["slug"], "elite-cuts");
    assert_eq!(business["status"], "active");
}

#[tokio::test]
async fn test_colliding_names_get_distinct_slugs() {
    let app = test_app();
    let (_, first) = register(&app, "Elite Cuts", "a@x.test").await;
    let (_, second) = register(&app, "Elite Cuts", "b@x.test").await;
    let (_, third) = register(&app, "Elite Cuts", "c@x.test").await;

    assert_eq!(first["slug"], "elite-cuts");
    assert_eq!(second["slug"], "elite-cuts-2");
    assert_eq!(third["slug"], "elite-cuts-3");
}

#[tokio::test]
async fn test_login_and_logout() {
    let app = test_app();
    register(&app, "Elite Cuts", "owner@elitecuts.test").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "email": "owner@elitecuts.test", "password": "hunter2hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/logout",
            Some(&token),
            &json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Session is gone after logout.
    let response = app
        .clone()
        .oneshot(get_request("/api/services", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let app = test_app();
    register(&app, "Elite Cuts", "owner@elitecuts.test").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "email": "owner@elitecuts.test", "password": "wrong-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_requires_auth() {
    let app = test_app();
    for uri in ["/api/services", "/api/bookings", "/api/analytics"] {
        let response = app.clone().oneshot(get_request(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

// ── End-to-end booking flow ──

#[tokio::test]
async fn test_end_to_end_booking_flow() {
    let app = test_app();
    let (token, business) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let service_id = create_service(&app, &token, "Haircut", 3000).await;

    // Public service listing by slug shows the one active service.
    let response = app
        .clone()
        .oneshot(get_request("/api/businesses/elite-cuts/services", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let services = body_json(response).await;
    assert_eq!(services.as_array().unwrap().len(), 1);
    assert_eq!(services[0]["name"], "Haircut");

    // Book 2025-08-01 10:00 Eastern for Jane Doe.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            None,
            &booking_payload(
                "elite-cuts",
                &service_id,
                "2025-08-01T10:00:00",
                ("Jane", "Doe"),
                "555-0100",
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let booking = body_json(response).await;
    assert_eq!(booking["status"], "confirmed");
    // August is EDT (-04:00): 10:00 local stores as 14:00 UTC.
    assert_eq!(booking["appointment_at"], "2025-08-01T14:00:00");

    // Shows up in the owner's booking list with joined display fields.
    let response = app
        .clone()
        .oneshot(get_request("/api/bookings", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bookings = body_json(response).await;
    let list = bookings.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["service_name"], "Haircut");
    assert_eq!(list[0]["client_first_name"], "Jane");
    assert_eq!(list[0]["business_id"], business["id"]);
}

#[tokio::test]
async fn test_booking_in_january_uses_est_offset() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let service_id = create_service(&app, &token, "Haircut", 3000).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            None,
            &booking_payload(
                "elite-cuts",
                &service_id,
                "2026-01-15T10:00:00",
                ("Jane", "Doe"),
                "555-0100",
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let booking = body_json(response).await;
    // January is EST (-05:00).
    assert_eq!(booking["appointment_at"], "2026-01-15T15:00:00");
}

#[tokio::test]
async fn test_booking_unknown_business_is_404() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            None,
            &booking_payload("nope", "svc", "2025-08-01T10:00:00", ("J", "D"), "555"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn test_booking_missing_phone_is_400() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let service_id = create_service(&app, &token, "Haircut", 3000).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            None,
            &booking_payload(
                "elite-cuts",
                &service_id,
                "2025-08-01T10:00:00",
                ("Jane", "Doe"),
                "   ",
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_double_booking_same_slot_is_409() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let service_id = create_service(&app, &token, "Haircut", 3000).await;

    let payload = booking_payload(
        "elite-cuts",
        &service_id,
        "2025-08-01T10:00:00",
        ("Jane", "Doe"),
        "555-0100",
    );
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/bookings", None, &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let second = booking_payload(
        "elite-cuts",
        &service_id,
        "2025-08-01T10:00:00",
        ("John", "Roe"),
        "555-0200",
    );
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/bookings", None, &second))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_client_dedup_by_phone_first_write_wins() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let service_id = create_service(&app, &token, "Haircut", 3000).await;

    for (at, name) in [
        ("2025-08-01T10:00:00", ("Jane", "Doe")),
        ("2025-08-01T11:00:00", ("Janet", "Doherty")),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/bookings",
                None,
                &booking_payload("elite-cuts", &service_id, at, name, "555-0100"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get_request("/api/clients", Some(&token)))
        .await
        .unwrap();
    let clients = body_json(response).await;
    let list = clients.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["first_name"], "Jane");
}

// ── Availability ──

#[tokio::test]
async fn test_availability_is_minute_exact() {
    let app = test_app();
    let (token, business) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let service_id = create_service(&app, &token, "Haircut", 3000).await;
    let business_id = business["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            None,
            &booking_payload(
                "elite-cuts",
                &service_id,
                "2025-07-08T14:00:00",
                ("Jane", "Doe"),
                "555-0100",
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/api/businesses/{business_id}/bookings/2025-07-08"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let slots = body_json(response).await;
    for slot in slots.as_array().unwrap() {
        let expected = slot["time"] == "14:00";
        assert_eq!(slot["booked"].as_bool().unwrap(), expected, "{slot}");
    }
}

#[tokio::test]
async fn test_cancelled_booking_frees_the_slot() {
    let app = test_app();
    let (token, business) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let service_id = create_service(&app, &token, "Haircut", 3000).await;
    let business_id = business["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            None,
            &booking_payload(
                "elite-cuts",
                &service_id,
                "2025-07-08T14:00:00",
                ("Jane", "Doe"),
                "555-0100",
            ),
        ))
        .await
        .unwrap();
    let booking_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/bookings/{booking_id}/status"),
            Some(&token),
            &json!({ "status": "cancelled" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/api/businesses/{business_id}/bookings/2025-07-08"),
            None,
        ))
        .await
        .unwrap();
    let slots = body_json(response).await;
    assert!(slots
        .as_array()
        .unwrap()
        .iter()
        .all(|s| !s["booked"].as_bool().unwrap()));

    // And the slot can be booked again.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            None,
            &booking_payload(
                "elite-cuts",
                &service_id,
                "2025-07-08T14:00:00",
                ("John", "Roe"),
                "555-0200",
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_availability_bad_date_is_400() {
    let app = test_app();
    let (_, business) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let business_id = business["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/api/businesses/{business_id}/bookings/July-8"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ── Services ──

#[tokio::test]
async fn test_soft_deleted_service_hidden_but_bookings_survive() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let service_id = create_service(&app, &token, "Haircut", 3000).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            None,
            &booking_payload(
                "elite-cuts",
                &service_id,
                "2025-08-01T10:00:00",
                ("Jane", "Doe"),
                "555-0100",
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/services/{service_id}"))
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Public listing omits the inactive service.
    let response = app
        .clone()
        .oneshot(get_request("/api/businesses/elite-cuts/services", None))
        .await
        .unwrap();
    let services = body_json(response).await;
    assert!(services.as_array().unwrap().is_empty());

    // Owner listing still shows it, flagged inactive.
    let response = app
        .clone()
        .oneshot(get_request("/api/services", Some(&token)))
        .await
        .unwrap();
    let services = body_json(response).await;
    assert_eq!(services.as_array().unwrap().len(), 1);
    assert_eq!(services[0]["is_active"], false);

    // The existing booking keeps its original service data.
    let response = app
        .clone()
        .oneshot(get_request("/api/bookings", Some(&token)))
        .await
        .unwrap();
    let bookings = body_json(response).await;
    assert_eq!(bookings[0]["service_name"], "Haircut");
    assert_eq!(bookings[0]["service_price_cents"], 3000);

    // Booking against the deactivated service is rejected.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            None,
            &booking_payload(
                "elite-cuts",
                &service_id,
                "2025-08-02T10:00:00",
                ("John", "Roe"),
                "555-0200",
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_service_image_upload_rules() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let service_id = create_service(&app, &token, "Haircut", 3000).await;

    // Non-image MIME rejected.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/services/{service_id}/image"),
            Some(&token),
            &json!({ "data": "aGVsbG8=", "mime": "application/pdf" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Valid image upload returns a URL and sticks to the service.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/services/{service_id}/image"),
            Some(&token),
            &json!({ "data": "aGVsbG8=", "mime": "image/png" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let url = body_json(response).await["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/"));

    let response = app
        .clone()
        .oneshot(get_request("/api/services", Some(&token)))
        .await
        .unwrap();
    let services = body_json(response).await;
    assert_eq!(services[0]["image_url"], url);
}

#[tokio::test]
async fn test_cannot_touch_another_businesss_service() {
    let app = test_app();
    let (token_a, _) = register(&app, "Elite Cuts", "a@x.test").await;
    let (token_b, _) = register(&app, "Best Nails", "b@x.test").await;
    let service_id = create_service(&app, &token_a, "Haircut", 3000).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/services/{service_id}"))
                .header("Authorization", format!("Bearer {token_b}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ── Booking status ──

#[tokio::test]
async fn test_any_status_transition_is_accepted() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let service_id = create_service(&app, &token, "Haircut", 3000).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            None,
            &booking_payload(
                "elite-cuts",
                &service_id,
                "2025-08-01T10:00:00",
                ("Jane", "Doe"),
                "555-0100",
            ),
        ))
        .await
        .unwrap();
    let booking_id = body_json(response).await["id"].as_str().unwrap().to_string();

    // completed -> confirmed is allowed; no transition table is enforced.
    for status in ["completed", "confirmed", "no_show"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/bookings/{booking_id}/status"),
                Some(&token),
                &json!({ "status": status }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{status}");
    }

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/bookings/{booking_id}/status"),
            Some(&token),
            &json!({ "status": "archived" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ── Customization ──

#[tokio::test]
async fn test_customization_defaults_then_saved() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;

    let response = app
        .clone()
        .oneshot(get_request("/api/client-customization", Some(&token)))
        .await
        .unwrap();
    let defaults = body_json(response).await;
    assert_eq!(defaults["primary_color"], "#2563eb");
    assert_eq!(defaults["show_reviews"], true);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/client-customization",
            Some(&token),
            &json!({
                "primary_color": "#112233",
                "accent_color": "#fff",
                "show_services": true,
                "show_reviews": false,
                "show_team": false,
                "welcome_message": "Welcome to Elite Cuts",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Public portal sees the saved customization.
    let response = app
        .clone()
        .oneshot(get_request(
            "/api/businesses/elite-cuts/customization",
            None,
        ))
        .await
        .unwrap();
    let custom = body_json(response).await;
    assert_eq!(custom["primary_color"], "#112233");
    assert_eq!(custom["show_reviews"], false);
}

#[tokio::test]
async fn test_customization_rejects_bad_color() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/client-customization",
            Some(&token),
            &json!({
                "primary_color": "blue",
                "accent_color": "#fff",
                "show_services": true,
                "show_reviews": true,
                "show_team": true,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ── Reviews, team, integrations ──

#[tokio::test]
async fn test_review_crud_and_public_listing() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/reviews",
            Some(&token),
            &json!({ "client_name": "Jane", "rating": 5, "comment": "Great cut" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/reviews",
            Some(&token),
            &json!({ "client_name": "Jane", "rating": 6 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(get_request("/api/businesses/elite-cuts/reviews", None))
        .await
        .unwrap();
    let reviews = body_json(response).await;
    assert_eq!(reviews.as_array().unwrap().len(), 1);
    assert_eq!(reviews[0]["rating"], 5);
}

#[tokio::test]
async fn test_integration_connect_disconnect() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/integrations/connect",
            Some(&token),
            &json!({ "provider": "Stripe" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/api/integrations", Some(&token)))
        .await
        .unwrap();
    let integrations = body_json(response).await;
    assert_eq!(integrations[0]["provider"], "stripe");
    assert_eq!(integrations[0]["connected"], true);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/integrations/disconnect",
            Some(&token),
            &json!({ "provider": "stripe" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/api/integrations", Some(&token)))
        .await
        .unwrap();
    let integrations = body_json(response).await;
    assert_eq!(integrations[0]["connected"], false);
}

// ── Analytics & insights ──

#[tokio::test]
async fn test_analytics_counts_revenue_and_clients() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let service_id = create_service(&app, &token, "Haircut", 3000).await;

    for (at, phone) in [
        ("2025-08-01T10:00:00", "555-0100"),
        ("2025-08-01T11:00:00", "555-0100"),
        ("2025-08-02T10:00:00", "555-0200"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/bookings",
                None,
                &booking_payload("elite-cuts", &service_id, at, ("Jane", "Doe"), phone),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get_request("/api/analytics", Some(&token)))
        .await
        .unwrap();
    let summary = body_json(response).await;
    assert_eq!(summary["total_bookings"], 3);
    assert_eq!(summary["total_revenue_cents"], 9000);
    assert_eq!(summary["unique_clients"], 2);
    assert_eq!(summary["confirmed_bookings"], 3);
}

#[tokio::test]
async fn test_insights_pass_through() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/insights",
            Some(&token),
            &json!({ "question": "How do I get more bookings?" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["answer"], "advice about: How do I get more bookings?");
}

// ── Weather ──

#[tokio::test]
async fn test_weather_success() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(get_request("/api/weather/Boston", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["condition"], "Rain");
}

#[tokio::test]
async fn test_weather_degrades_to_fallback() {
    let app = test_app_with_weather(true);
    let response = app
        .clone()
        .oneshot(get_request("/api/weather/Boston", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["city"], "Boston");
    assert_eq!(body["condition"], "Sunny");
    assert_eq!(body["temp_f"], 72.0);
}

// ── Notifications ──

#[tokio::test]
async fn test_booking_creates_notification() {
    let app = test_app();
    let (token, _) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let service_id = create_service(&app, &token, "Haircut", 3000).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            None,
            &booking_payload(
                "elite-cuts",
                &service_id,
                "2025-08-01T10:00:00",
                ("Jane", "Doe"),
                "555-0100",
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/api/notifications", Some(&token)))
        .await
        .unwrap();
    let notifications = body_json(response).await;
    let list = notifications.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["kind"], "booking_created");
    assert_eq!(list[0]["is_read"], false);

    let id = list[0]["id"].as_str().unwrap();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/notifications/{id}/read"),
            Some(&token),
            &json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ── Platform admin ──

#[tokio::test]
async fn test_admin_requires_token() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(get_request("/api/admin/businesses", Some("wrong-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_suspended_business_disappears_from_public_surface() {
    let app = test_app();
    let (_, business) = register(&app, "Elite Cuts", "owner@elitecuts.test").await;
    let business_id = business["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/admin/businesses/{business_id}/status"),
            Some("test-admin-token"),
            &json!({ "status": "suspended" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/api/businesses/elite-cuts", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
