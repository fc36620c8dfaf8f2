use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Facility entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "facilities")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Facility name
    pub name: String,

    /// Location the facility operates from; must reference an existing row
    pub location_id: i32,

    /// Server-assigned at creation, never updated afterwards
    pub creation_date: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id"
    )]
    Location,
    #[sea_orm(has_many = "super::facility_tag::Entity")]
    FacilityTags,
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::facility_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FacilityTags.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::facility_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::facility_tag::Relation::Facility.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
