//! Inventory Details Entity
//!
//! One counted line of an inventory: which item was seen and in which state.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:           i32,
    pub inventory_id: i32,
    pub item_id:      i32,
    pub state_id:     i32,
    pub observation:  Option<String>,
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
        belongs_to = "super::items::Entity",
        from = "Column::ItemId",
        to = "super::items::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Item,
    #[sea_orm(
        belongs_to = "super::states::Entity",
        from = "Column::StateId",
        to = "super::states::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    State,
}

impl Related<super::inventories::Entity> for Entity {
    fn to() -> RelationDef { Relation::Inventory.def() }
}

impl Related<super::items::Entity> for Entity {
    fn to() -> RelationDef { Relation::Item.def() }
}

impl Related<super::states::Entity> for Entity {
    fn to() -> RelationDef { Relation::State.def() }
}

impl ActiveModelBehavior for ActiveModel {}
