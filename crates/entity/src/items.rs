//! Items Entity
//!
//! An asset stored in a zone.
//!
//! CUSTOMIZATION REGION START: items_entity_custom_types
//! This region is preserved during entity regeneration. Add custom types and implementations here.
//! CUSTOMIZATION REGION END

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:          i32,
    pub zone_id:     i32,
    pub state_id:    i32,
    pub code:        String,
    pub description: Option<String>,
    pub active:      bool,
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
    #[sea_orm(
        belongs_to = "super::states::Entity",
        from = "Column::StateId",
        to = "super::states::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    State,
}

impl Related<super::zones::Entity> for Entity {
    fn to() -> RelationDef { Relation::Zone.def() }
}

impl Related<super::states::Entity> for Entity {
    fn to() -> RelationDef { Relation::State.def() }
}

impl ActiveModelBehavior for ActiveModel {}

// CUSTOMIZATION REGION START: items_entity_methods
// Add custom methods and trait implementations here
// CUSTOMIZATION REGION END
