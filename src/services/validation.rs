//! Referential and input validation, run before any mutating statement so a
//! validation failure never leaves partial writes behind.

use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

use crate::entities::location;
use crate::errors::ServiceError;

/// Fails when no location row matches `location_id`. Location existence is
/// enforced here, at write time, rather than assumed from the schema.
pub async fn validate_location<C>(db: &C, location_id: i32) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    let matches = location::Entity::find_by_id(location_id).count(db).await?;
    if matches == 0 {
        return Err(ServiceError::ValidationError(format!(
            "Location id {} does not exist",
            location_id
        )));
    }
    Ok(())
}

/// Tags are identified by name; every name must be non-blank. Existence is
/// not required since the synchronizer auto-creates missing tags.
pub fn validate_tag_names(names: &[String]) -> Result<(), ServiceError> {
    for name in names {
        if name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Tag names must not be blank".to_string(),
            ));
        }
    }
    Ok(())
}

/// Parses a path-supplied facility id, failing before any repository call.
pub fn parse_facility_id(raw: &str) -> Result<i32, ServiceError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ServiceError::BadRequest(format!("Invalid facility id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(parse_facility_id("42").unwrap(), 42);
        assert_eq!(parse_facility_id(" 7 ").unwrap(), 7);
    }

    #[test]
    fn non_numeric_ids_are_bad_requests() {
        for raw in ["", "abc", "12abc", "1.5"] {
            assert!(matches!(
                parse_facility_id(raw),
                Err(ServiceError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn blank_tag_names_are_rejected() {
        let names = vec!["Food".to_string(), "   ".to_string()];
        assert!(validate_tag_names(&names).is_err());
        assert!(validate_tag_names(&["Food".to_string()]).is_ok());
        assert!(validate_tag_names(&[]).is_ok());
    }
}
