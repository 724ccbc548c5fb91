//! Users Entity
//!
//! Represents actor accounts. Users are referenced by companies, branches, zones
//! and checkers as their manager; they are only ever deactivated, never removed
//! by lifecycle operations.
//!
//! CUSTOMIZATION REGION START: users_entity_custom_types
//! This region is preserved during entity regeneration. Add custom types and implementations here.
//! CUSTOMIZATION REGION END

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:         i32,
    pub username:   String,
    pub email:      String,
    pub full_name:  Option<String>,
    pub active:     bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::operatings::Entity")]
    Operatings,
}

impl Related<super::operatings::Entity> for Entity {
    fn to() -> RelationDef { Relation::Operatings.def() }
}

impl ActiveModelBehavior for ActiveModel {}

// CUSTOMIZATION REGION START: users_entity_methods
// Add custom methods and trait implementations here
// CUSTOMIZATION REGION END
