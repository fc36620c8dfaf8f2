pub mod facilities;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::{db, errors::ServiceError, AppState};

/// Liveness probe backed by a database ping.
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ServiceError> {
    db::check_health(&state.db).await?;
    Ok(Json(json!({ "status": "ok" })))
}

/// Assembles every HTTP route of the API.
pub fn routes() -> Router<AppState> {
    facilities::routes().route("/health", get(health))
}
