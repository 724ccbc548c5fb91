//! Operatings Entity
//!
//! Live operating assignment of a user (what the account is currently allowed to work on).
//! Not historical data: removed together with the groups it owns when its user is
//! deactivated by a company-wide cascade.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "operatings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:      i32,
    pub user_id: i32,
    pub name:    String,
    pub active:  bool,
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
    User,
    #[sea_orm(has_many = "super::operating_groups::Entity")]
    Groups,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<super::operating_groups::Entity> for Entity {
    fn to() -> RelationDef { Relation::Groups.def() }
}

impl ActiveModelBehavior for ActiveModel {}
