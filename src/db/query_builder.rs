//! Composition of the facility fetch and search queries.
//!
//! Everything here produces query inputs; execution stays in the services.
//! Filter values are always bound parameters, never spliced into SQL text.

use sea_orm::sea_query::{Expr, Query, SelectStatement};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryOrder, SelectTwo};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::entities::{facility, facility_tag, location, tag};
use crate::errors::ServiceError;

/// The whitelist of filterable fields for `GET /search`. Anything else in the
/// query string is ignored. A key that is present but empty activates no
/// condition; active conditions combine with AND.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FacilityFilters {
    /// Exact location id
    pub location: Option<String>,
    /// Exact city name
    pub city: Option<String>,
    /// Substring match on zip code
    pub zip_code: Option<String>,
    /// Substring match on phone number
    pub phone_number: Option<String>,
    /// Substring match on street address
    pub address: Option<String>,
    /// Exact country code
    pub country_code: Option<String>,
    /// Substring match on facility name
    pub name: Option<String>,
    /// Substring match against any of the facility's tag names
    pub tag: Option<String>,
}

impl FacilityFilters {
    /// Builds the AND-conjunction of all active filters.
    ///
    /// A facility matches the `tag` filter when at least one of its tags
    /// matches, expressed as a membership test against the junction table so
    /// the outer query stays at one row per facility.
    pub fn to_condition(&self) -> Result<Condition, ServiceError> {
        let mut cond = Condition::all();

        if let Some(raw) = non_empty(&self.location) {
            let location_id: i32 = raw.parse().map_err(|_| {
                ServiceError::ValidationError(format!("Invalid location id: {raw}"))
            })?;
            cond = cond.add(location::Column::Id.eq(location_id));
        }
        if let Some(city) = non_empty(&self.city) {
            cond = cond.add(location::Column::City.eq(city));
        }
        if let Some(zip_code) = non_empty(&self.zip_code) {
            cond = cond.add(location::Column::ZipCode.contains(zip_code));
        }
        if let Some(phone_number) = non_empty(&self.phone_number) {
            cond = cond.add(location::Column::PhoneNumber.contains(phone_number));
        }
        if let Some(address) = non_empty(&self.address) {
            cond = cond.add(location::Column::Address.contains(address));
        }
        if let Some(country_code) = non_empty(&self.country_code) {
            cond = cond.add(location::Column::CountryCode.eq(country_code));
        }
        if let Some(name) = non_empty(&self.name) {
            cond = cond.add(facility::Column::Name.contains(name));
        }
        if let Some(tag_name) = non_empty(&self.tag) {
            cond = cond.add(facility::Column::Id.in_subquery(tag_match_subquery(tag_name)));
        }

        Ok(cond)
    }

    /// True when no filter key carries a usable value.
    pub fn is_empty(&self) -> bool {
        [
            &self.location,
            &self.city,
            &self.zip_code,
            &self.phone_number,
            &self.address,
            &self.country_code,
            &self.name,
            &self.tag,
        ]
        .into_iter()
        .all(|field| non_empty(field).is_none())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Ids of facilities having at least one tag whose name contains `pattern`.
fn tag_match_subquery(pattern: &str) -> SelectStatement {
    Query::select()
        .column(facility_tag::Column::FacilityId)
        .from(facility_tag::Entity)
        .inner_join(
            tag::Entity,
            Expr::col((tag::Entity, tag::Column::Id))
                .equals((facility_tag::Entity, facility_tag::Column::TagId)),
        )
        .and_where(Expr::col((tag::Entity, tag::Column::Name)).like(format!("%{pattern}%")))
        .to_owned()
}

/// The shared facility-to-location select used by fetch, list, and search.
/// The location side is resolved in the same statement; tags are loaded for
/// the whole result set afterwards by the repository.
pub fn facility_with_location() -> SelectTwo<facility::Entity, location::Entity> {
    facility::Entity::find()
        .find_also_related(location::Entity)
        .order_by_asc(facility::Column::Id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(tag: Option<&str>, name: Option<&str>) -> FacilityFilters {
        FacilityFilters {
            tag: tag.map(str::to_string),
            name: name.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn empty_and_blank_values_activate_nothing() {
        assert!(FacilityFilters::default().is_empty());
        assert!(filters(Some("   "), Some("")).is_empty());
    }

    #[test]
    fn present_values_are_detected() {
        assert!(!filters(Some("Food"), None).is_empty());
        assert!(!filters(None, Some("Dock")).is_empty());
    }

    #[test]
    fn non_numeric_location_is_rejected() {
        let f = FacilityFilters {
            location: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            f.to_condition(),
            Err(ServiceError::ValidationError(_))
        ));
    }

    #[test]
    fn numeric_location_builds_a_condition() {
        let f = FacilityFilters {
            location: Some("7".to_string()),
            ..Default::default()
        };
        assert!(f.to_condition().is_ok());
    }
}
