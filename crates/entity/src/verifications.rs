//! Verifications Entity
//!
//! Sign-off of an inventory by a checker. A verification is attached to at most one
//! inventory and records the checker that performed it.
//!
//! CUSTOMIZATION REGION START: verifications_entity_custom_types
//! This region is preserved during entity regeneration. Add custom types and implementations here.
//! CUSTOMIZATION REGION END

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "verifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:           i32,
    #[sea_orm(unique)]
    pub inventory_id: Option<i32>,
    pub checker_id:   Option<i32>,
    pub approved:     bool,
    pub verified_at:  DateTimeUtc,
    pub active:       bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inventories::Entity",
        from = "Column::InventoryId",
        to = "super::inventories::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Inventory,
    #[sea_orm(
        belongs_to = "super::checkers::Entity",
        from = "Column::CheckerId",
        to = "super::checkers::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Checker,
}

impl Related<super::inventories::Entity> for Entity {
    fn to() -> RelationDef { Relation::Inventory.def() }
}

impl Related<super::checkers::Entity> for Entity {
    fn to() -> RelationDef { Relation::Checker.def() }
}

impl ActiveModelBehavior for ActiveModel {}

// CUSTOMIZATION REGION START: verifications_entity_methods
// Add custom methods and trait implementations here
// CUSTOMIZATION REGION END
