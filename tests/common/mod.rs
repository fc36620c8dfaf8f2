use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tower::ServiceExt;

use facilities_api::{
    config::AppConfig,
    db::{self, DbConfig},
    entities::location,
    AppState,
};

/// Harness spinning up the application against a fresh in-memory SQLite
/// database. The pool is pinned to a single connection so every statement
/// sees the same in-memory database.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    /// Seeded Amsterdam location
    pub location_ams: i32,
    /// Seeded Rotterdam location
    pub location_rtm: i32,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            0,
            "test".to_string(),
        );

        let db_cfg = DbConfig {
            url: cfg.database_url.clone(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let pool = db::establish_connection_with_config(&db_cfg)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let location_ams = seed_location(&pool, "Amsterdam", "Damrak 1", "1012LG", "NL", "+31201112222").await;
        let location_rtm = seed_location(&pool, "Rotterdam", "Coolsingel 42", "3011AD", "NL", "+31103334444").await;

        let state = AppState::new(Arc::new(pool), cfg);
        let router = facilities_api::app_routes().with_state(state.clone());

        Self {
            router,
            state,
            location_ams,
            location_rtm,
        }
    }

    /// Sends a request through the router and returns status plus parsed body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body was not valid JSON")
        };

        (status, json)
    }
}

async fn seed_location(
    pool: &db::DbPool,
    city: &str,
    address: &str,
    zip_code: &str,
    country_code: &str,
    phone_number: &str,
) -> i32 {
    location::ActiveModel {
        city: Set(city.to_string()),
        address: Set(address.to_string()),
        zip_code: Set(zip_code.to_string()),
        country_code: Set(country_code.to_string()),
        phone_number: Set(phone_number.to_string()),
        ..Default::default()
    }
    .insert(pool)
    .await
    .expect("failed to seed location")
    .id
}

/// Convenience for turning string literals into the owned tag lists the
/// service API takes.
#[allow(dead_code)]
pub fn tag_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
