//! Tag synchronization: make a facility's persisted tag set exactly equal to
//! a requested set of tag names in one logical operation.
//!
//! Tags are identified by name (the canonical mode for this API); names with
//! no matching row are created on the fly. The helpers are generic over
//! [`ConnectionTrait`] so callers decide the transaction scope — every
//! production caller runs the whole sync inside one transaction.

use std::collections::HashSet;

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, SqlErr};
use tracing::debug;

use crate::entities::{facility_tag, tag};
use crate::errors::ServiceError;

/// Replaces the facility's association set with `names`.
///
/// Existing associations are deleted first (a no-op when none exist), then
/// one association is inserted per distinct non-blank name. An empty input
/// leaves the facility with zero tags, which is a valid terminal state. Tag
/// rows themselves are never deleted here.
pub async fn sync_facility_tags<C>(
    db: &C,
    facility_id: i32,
    names: &[String],
) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    facility_tag::Entity::delete_many()
        .filter(facility_tag::Column::FacilityId.eq(facility_id))
        .exec(db)
        .await?;

    let mut seen = HashSet::new();
    for raw in names {
        let name = raw.trim();
        if name.is_empty() || !seen.insert(name) {
            continue;
        }

        let tag_id = resolve_tag_id(db, name).await?;
        facility_tag::ActiveModel {
            facility_id: Set(facility_id),
            tag_id: Set(tag_id),
        }
        .insert(db)
        .await?;
    }

    debug!(facility_id, tag_count = seen.len(), "synchronized facility tags");
    Ok(())
}

/// Finds the tag by exact name, creating it when absent. When the insert
/// loses a creation race to a concurrent sync, the unique index on the name
/// rejects it and the winner's row is re-fetched instead of surfacing the
/// constraint violation.
async fn resolve_tag_id<C>(db: &C, name: &str) -> Result<i32, ServiceError>
where
    C: ConnectionTrait,
{
    if let Some(existing) = find_tag_by_name(db, name).await? {
        return Ok(existing.id);
    }

    let inserted = tag::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await;

    match inserted {
        Ok(created) => Ok(created.id),
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            find_tag_by_name(db, name).await?.map(|t| t.id).ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "tag '{name}' missing after unique constraint violation"
                ))
            })
        }
        Err(err) => Err(err.into()),
    }
}

async fn find_tag_by_name<C>(db: &C, name: &str) -> Result<Option<tag::Model>, ServiceError>
where
    C: ConnectionTrait,
{
    let found = tag::Entity::find()
        .filter(tag::Column::Name.eq(name))
        .one(db)
        .await?;
    Ok(found)
}
