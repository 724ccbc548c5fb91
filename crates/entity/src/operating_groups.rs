//! Operating Groups Entity
//!
//! Grouping of work owned by an operating assignment.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "operating_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:           i32,
    pub operating_id: i32,
    pub name:         String,
    pub active:       bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::operatings::Entity",
        from = "Column::OperatingId",
        to = "super::operatings::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Operating,
}

impl Related<super::operatings::Entity> for Entity {
    fn to() -> RelationDef { Relation::Operating.def() }
}

impl ActiveModelBehavior for ActiveModel {}
