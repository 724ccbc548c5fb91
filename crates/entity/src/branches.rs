//! Branches Entity
//!
//! A physical site of a company. Owns zones and the checkers assigned to verify inventories.
//!
//! CUSTOMIZATION REGION START: branches_entity_custom_types
//! This region is preserved during entity regeneration. Add custom types and implementations here.
//! CUSTOMIZATION REGION END

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "branches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:         i32,
    pub company_id: i32,
    pub name:       String,
    pub address:    Option<String>,
    pub user_id:    Option<i32>,
    pub active:     bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Company,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Manager,
    #[sea_orm(has_many = "super::zones::Entity")]
    Zones,
    #[sea_orm(has_many = "super::checkers::Entity")]
    Checkers,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Manager.def() }
}

impl Related<super::zones::Entity> for Entity {
    fn to() -> RelationDef { Relation::Zones.def() }
}

impl Related<super::checkers::Entity> for Entity {
    fn to() -> RelationDef { Relation::Checkers.def() }
}

impl ActiveModelBehavior for ActiveModel {}

// CUSTOMIZATION REGION START: branches_entity_methods
// Add custom methods and trait implementations here
// CUSTOMIZATION REGION END
