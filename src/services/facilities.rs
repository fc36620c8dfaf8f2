//! Facility repository: orchestrates create/update/delete/fetch, delegating
//! query composition to [`crate::db::query_builder`] and tag writes to
//! [`crate::services::tags`]. Every multi-statement write runs inside one
//! transaction so concurrent readers never observe a half-synchronized
//! facility.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, LoaderTrait, QueryFilter, Set,
    TransactionError, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::db::query_builder::{facility_with_location, FacilityFilters};
use crate::db::DbPool;
use crate::entities::{facility, facility_tag, tag};
use crate::errors::ServiceError;
use crate::services::{tags, validation};

/// A facility with its location fields flattened in and its tag names
/// embedded — the row shape every read endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FacilityRecord {
    pub id: i32,
    pub name: String,
    pub location_id: i32,
    pub creation_date: DateTime<Utc>,
    pub city: String,
    pub address: String,
    pub zip_code: String,
    pub country_code: String,
    pub phone_number: String,
    /// Tag names, sorted alphabetically so the order is stable across fetches
    pub tags: Vec<String>,
}

/// Service for managing facilities
#[derive(Clone)]
pub struct FacilityService {
    db: Arc<DbPool>,
}

impl FacilityService {
    /// Creates a new facility service instance
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Creates a facility with a server-assigned creation timestamp and
    /// synchronizes its tag set, all in one transaction. Returns the new id.
    #[instrument(skip(self))]
    pub async fn create_facility(
        &self,
        name: String,
        location_id: i32,
        tag_names: Vec<String>,
    ) -> Result<i32, ServiceError> {
        validation::validate_location(&*self.db, location_id).await?;
        validation::validate_tag_names(&tag_names)?;

        let id = self
            .db
            .transaction::<_, i32, ServiceError>(move |txn| {
                Box::pin(async move {
                    let created = facility::ActiveModel {
                        name: Set(name),
                        location_id: Set(location_id),
                        creation_date: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    tags::sync_facility_tags(txn, created.id, &tag_names).await?;
                    Ok(created.id)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(facility_id = id, "created facility");
        Ok(id)
    }

    /// Full replace of name, location, and tag set. Returns `false` (not an
    /// error) when no row matched `id`; nothing is written in that case.
    /// The creation timestamp is immutable and stays untouched.
    #[instrument(skip(self))]
    pub async fn update_facility(
        &self,
        id: i32,
        name: String,
        location_id: i32,
        tag_names: Vec<String>,
    ) -> Result<bool, ServiceError> {
        validation::validate_location(&*self.db, location_id).await?;
        validation::validate_tag_names(&tag_names)?;

        let updated = self
            .db
            .transaction::<_, bool, ServiceError>(move |txn| {
                Box::pin(async move {
                    let Some(existing) = facility::Entity::find_by_id(id).one(txn).await? else {
                        return Ok(false);
                    };

                    let mut active: facility::ActiveModel = existing.into();
                    active.name = Set(name);
                    active.location_id = Set(location_id);
                    active.update(txn).await?;

                    tags::sync_facility_tags(txn, id, &tag_names).await?;
                    Ok(true)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        if updated {
            info!(facility_id = id, "updated facility");
        }
        Ok(updated)
    }

    /// Removes the facility's tag associations and then its row, in one
    /// transaction. Returns `false` when the id did not exist.
    #[instrument(skip(self))]
    pub async fn delete_facility(&self, id: i32) -> Result<bool, ServiceError> {
        let deleted = self
            .db
            .transaction::<_, bool, ServiceError>(move |txn| {
                Box::pin(async move {
                    facility_tag::Entity::delete_many()
                        .filter(facility_tag::Column::FacilityId.eq(id))
                        .exec(txn)
                        .await?;

                    let result = facility::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        if deleted {
            info!(facility_id = id, "deleted facility");
        }
        Ok(deleted)
    }

    /// Standalone transactional tag sync for an existing facility.
    #[instrument(skip(self))]
    pub async fn replace_tags(
        &self,
        facility_id: i32,
        tag_names: Vec<String>,
    ) -> Result<(), ServiceError> {
        validation::validate_tag_names(&tag_names)?;

        self.db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move { tags::sync_facility_tags(txn, facility_id, &tag_names).await })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })
    }

    /// Gets a facility by id
    #[instrument(skip(self))]
    pub async fn get_facility(&self, id: i32) -> Result<Option<FacilityRecord>, ServiceError> {
        let mut records = self
            .fetch_records(Some(Condition::all().add(facility::Column::Id.eq(id))))
            .await?;
        Ok(records.pop())
    }

    /// Lists all facilities ordered by id
    #[instrument(skip(self))]
    pub async fn list_facilities(&self) -> Result<Vec<FacilityRecord>, ServiceError> {
        self.fetch_records(None).await
    }

    /// Searches facilities with the whitelisted filters ANDed together
    #[instrument(skip(self))]
    pub async fn search_facilities(
        &self,
        filters: &FacilityFilters,
    ) -> Result<Vec<FacilityRecord>, ServiceError> {
        let condition = filters.to_condition()?;
        self.fetch_records(Some(condition)).await
    }

    /// Runs the shared facility⋈location select, then loads the tag models
    /// for the whole result set through the junction in a single query and
    /// assembles the nested records.
    async fn fetch_records(
        &self,
        condition: Option<Condition>,
    ) -> Result<Vec<FacilityRecord>, ServiceError> {
        let db = &*self.db;

        let mut query = facility_with_location();
        if let Some(condition) = condition {
            query = query.filter(condition);
        }
        let rows = query.all(db).await?;

        let facilities: Vec<facility::Model> = rows.iter().map(|(f, _)| f.clone()).collect();
        let tags_per_facility = facilities
            .load_many_to_many(tag::Entity, facility_tag::Entity, db)
            .await?;

        rows.into_iter()
            .zip(tags_per_facility)
            .map(|((f, loc), tag_models)| {
                let location = loc.ok_or_else(|| {
                    ServiceError::InternalError(format!(
                        "facility {} references a missing location",
                        f.id
                    ))
                })?;

                let mut tag_names: Vec<String> =
                    tag_models.into_iter().map(|t| t.name).collect();
                tag_names.sort();

                Ok(FacilityRecord {
                    id: f.id,
                    name: f.name,
                    location_id: f.location_id,
                    creation_date: f.creation_date,
                    city: location.city,
                    address: location.address,
                    zip_code: location.zip_code,
                    country_code: location.country_code,
                    phone_number: location.phone_number,
                    tags: tag_names,
                })
            })
            .collect()
    }
}
