use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::db::query_builder::FacilityFilters;
use crate::errors::{ErrorResponse, ServiceError};
use crate::services::facilities::FacilityRecord;
use crate::services::validation;
use crate::AppState;

/// Body for create and update. `tags` carries tag names; leaving it out
/// replaces the facility's tag set with the empty set.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FacilityPayload {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,
    pub location_id: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl FacilityPayload {
    fn into_parts(self) -> Result<(String, i32, Vec<String>), ServiceError> {
        self.validate()?;
        match (self.name, self.location_id) {
            (Some(name), Some(location_id)) => Ok((name, location_id, self.tags)),
            _ => Err(ServiceError::ValidationError(
                "name and location_id are required fields".to_string(),
            )),
        }
    }
}

#[utoipa::path(
    get,
    path = "/facilities",
    tag = "facilities",
    responses(
        (status = 200, description = "All facilities", body = [FacilityRecord]),
        (status = 404, description = "No facilities exist", body = ErrorResponse)
    )
)]
pub async fn list_facilities(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let records = state.facilities.list_facilities().await?;
    if records.is_empty() {
        return Err(ServiceError::NotFound("No facilities found".to_string()));
    }
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/facility/{id}",
    tag = "facilities",
    params(("id" = String, Path, description = "Facility id")),
    responses(
        (status = 200, description = "The facility", body = FacilityRecord),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "No such facility", body = ErrorResponse)
    )
)]
pub async fn get_facility(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = validation::parse_facility_id(&id)?;
    let record = state
        .facilities
        .get_facility(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Facility not found".to_string()))?;
    Ok(Json(record))
}

#[utoipa::path(
    post,
    path = "/create",
    tag = "facilities",
    request_body = FacilityPayload,
    responses(
        (status = 201, description = "Facility created", body = FacilityRecord),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse)
    )
)]
pub async fn create_facility(
    State(state): State<AppState>,
    Json(payload): Json<FacilityPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let (name, location_id, tags) = payload.into_parts()?;
    let id = state.facilities.create_facility(name, location_id, tags).await?;

    let record = state
        .facilities
        .get_facility(id)
        .await?
        .ok_or_else(|| ServiceError::InternalError(format!("created facility {id} not found")))?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    put,
    path = "/edit/{id}",
    tag = "facilities",
    params(("id" = String, Path, description = "Facility id")),
    request_body = FacilityPayload,
    responses(
        (status = 200, description = "Facility updated", body = FacilityRecord),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 404, description = "No such facility", body = ErrorResponse)
    )
)]
pub async fn update_facility(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<FacilityPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = validation::parse_facility_id(&id)?;
    let (name, location_id, tags) = payload.into_parts()?;

    let updated = state
        .facilities
        .update_facility(id, name, location_id, tags)
        .await?;
    if !updated {
        return Err(ServiceError::NotFound("Facility not found".to_string()));
    }

    let record = state
        .facilities
        .get_facility(id)
        .await?
        .ok_or_else(|| ServiceError::InternalError(format!("updated facility {id} not found")))?;
    Ok(Json(record))
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = "facilities",
    params(("id" = String, Path, description = "Facility id")),
    responses(
        (status = 200, description = "Facility deleted"),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "No such facility", body = ErrorResponse)
    )
)]
pub async fn delete_facility(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = validation::parse_facility_id(&id)?;
    let deleted = state.facilities.delete_facility(id).await?;
    if !deleted {
        return Err(ServiceError::NotFound("Facility not found".to_string()));
    }
    Ok(Json(json!({ "message": "Facility deleted successfully" })))
}

#[utoipa::path(
    get,
    path = "/search",
    tag = "facilities",
    params(FacilityFilters),
    responses(
        (status = 200, description = "Matching facilities", body = [FacilityRecord]),
        (status = 400, description = "Invalid filter value", body = ErrorResponse),
        (status = 404, description = "Nothing matched", body = ErrorResponse)
    )
)]
pub async fn search_facilities(
    State(state): State<AppState>,
    Query(filters): Query<FacilityFilters>,
) -> Result<impl IntoResponse, ServiceError> {
    if filters.is_empty() {
        tracing::debug!("search without active filters returns all facilities");
    }
    let records = state.facilities.search_facilities(&filters).await?;
    if records.is_empty() {
        return Err(ServiceError::NotFound("No facilities found".to_string()));
    }
    Ok(Json(records))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/facilities", get(list_facilities))
        .route("/facility/:id", get(get_facility))
        .route("/create", post(create_facility))
        .route("/edit/:id", put(update_facility))
        .route("/delete/:id", delete(delete_facility))
        .route("/search", get(search_facilities))
}
