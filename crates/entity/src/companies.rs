//! Companies Entity
//!
//! Top-level tenant. A company optionally has an administrator account and owns branches.
//!
//! CUSTOMIZATION REGION START: companies_entity_custom_types
//! This region is preserved during entity regeneration. Add custom types and implementations here.
//! CUSTOMIZATION REGION END

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:         i32,
    pub name:       String,
    pub tax_id:     Option<String>,
    pub user_id:    Option<i32>,
    pub active:     bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Admin,
    #[sea_orm(has_many = "super::branches::Entity")]
    Branches,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Admin.def() }
}

impl Related<super::branches::Entity> for Entity {
    fn to() -> RelationDef { Relation::Branches.def() }
}

impl ActiveModelBehavior for ActiveModel {}

// CUSTOMIZATION REGION START: companies_entity_methods
// Add custom methods and trait implementations here
// CUSTOMIZATION REGION END
