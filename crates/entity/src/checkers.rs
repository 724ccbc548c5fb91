//! Checkers Entity
//!
//! A person designated by a branch to verify inventories, optionally backed by a user account.
//!
//! CUSTOMIZATION REGION START: checkers_entity_custom_types
//! This region is preserved during entity regeneration. Add custom types and implementations here.
//! CUSTOMIZATION REGION END

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "checkers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:        i32,
    pub branch_id: i32,
    pub user_id:   Option<i32>,
    pub name:      String,
    pub active:    bool,
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
    User,
    #[sea_orm(has_many = "super::verifications::Entity")]
    Verifications,
}

impl Related<super::branches::Entity> for Entity {
    fn to() -> RelationDef { Relation::Branch.def() }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<super::verifications::Entity> for Entity {
    fn to() -> RelationDef { Relation::Verifications.def() }
}

impl ActiveModelBehavior for ActiveModel {}

// CUSTOMIZATION REGION START: checkers_entity_methods
// Add custom methods and trait implementations here
// CUSTOMIZATION REGION END
