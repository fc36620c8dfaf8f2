use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tag entity. Names are unique; the unique index also backstops concurrent
/// by-name creation from two tag syncs racing each other.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::facility_tag::Entity")]
    FacilityTags,
}

impl Related<super::facility_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FacilityTags.def()
    }
}

impl Related<super::facility::Entity> for Entity {
    fn to() -> RelationDef {
        super::facility_tag::Relation::Facility.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::facility_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
