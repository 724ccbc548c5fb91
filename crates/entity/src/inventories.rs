//! Inventories Entity
//!
//! A stock-taking run over one zone. Owns its detail lines and at most one verification.
//!
//! CUSTOMIZATION REGION START: inventories_entity_custom_types
//! This region is preserved during entity regeneration. Add custom types and implementations here.
//! CUSTOMIZATION REGION END

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "inventories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:         i32,
    pub zone_id:    i32,
    pub name:       String,
    pub taken_at:   DateTimeUtc,
    pub active:     bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::zones::Entity",
        from = "Column::ZoneId",
        to = "super::zones::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Zone,
    #[sea_orm(has_many = "super::inventory_details::Entity")]
    Details,
    #[sea_orm(has_many = "super::verifications::Entity")]
    Verifications,
}

impl Related<super::zones::Entity> for Entity {
    fn to() -> RelationDef { Relation::Zone.def() }
}

impl Related<super::inventory_details::Entity> for Entity {
    fn to() -> RelationDef { Relation::Details.def() }
}

impl Related<super::verifications::Entity> for Entity {
    fn to() -> RelationDef { Relation::Verifications.def() }
}

impl ActiveModelBehavior for ActiveModel {}

// CUSTOMIZATION REGION START: inventories_entity_methods
// Add custom methods and trait implementations here
// CUSTOMIZATION REGION END
