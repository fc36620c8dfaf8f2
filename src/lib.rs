//! Facilities API Library
//!
//! CRUD backend for facilities: entities tied to a location and a set of
//! tags, served over HTTP and persisted through sea-orm. The interesting
//! parts live in [`db::query_builder`] (filtered search composition),
//! [`services::tags`] (replace-all tag synchronization) and
//! [`services::facilities`] (the transactional repository).
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;

use services::facilities::FacilityService;

/// Shared state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub facilities: FacilityService,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let facilities = FacilityService::new(db.clone());
        Self {
            db,
            config,
            facilities,
        }
    }
}

/// The full application router, minus middleware layers applied in `main`.
pub fn app_routes() -> Router<AppState> {
    handlers::routes()
}
