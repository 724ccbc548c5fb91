//! Zones Entity
//!
//! A storage area inside a branch. Holds items and the inventories taken over them.
//!
//! CUSTOMIZATION REGION START: zones_entity_custom_types
//! This region is preserved during entity regeneration. Add custom types and implementations here.
//! CUSTOMIZATION REGION END

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "zones")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:         i32,
    pub branch_id:  i32,
    pub name:       String,
    pub user_id:    Option<i32>,
    pub active:     bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::branches::Entity",
        from = "Column::BranchId",
        to = "super::branches::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Branch,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Manager,
    #[sea_orm(has_many = "super::items::Entity")]
    Items,
    #[sea_orm(has_many = "super::inventories::Entity")]
    Inventories,
}

impl Related<super::branches::Entity> for Entity {
    fn to() -> RelationDef { Relation::Branch.def() }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Manager.def() }
}

impl Related<super::items::Entity> for Entity {
    fn to() -> RelationDef { Relation::Items.def() }
}

impl Related<super::inventories::Entity> for Entity {
    fn to() -> RelationDef { Relation::Inventories.def() }
}

impl ActiveModelBehavior for ActiveModel {}

// CUSTOMIZATION REGION START: zones_entity_methods
// Add custom methods and trait implementations here
// CUSTOMIZATION REGION END
