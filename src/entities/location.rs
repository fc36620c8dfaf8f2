use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Location entity. Referenced, never owned, by facilities: many facilities
/// may share one location, and deleting locations is not part of this API.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub city: String,
    pub address: String,
    pub zip_code: String,
    pub country_code: String,
    pub phone_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::facility::Entity")]
    Facilities,
}

impl Related<super::facility::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Facilities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
