use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_create_users_and_states::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Operatings::Table)
                    .if_not_exists()
                    .col(pk_auto(Operatings::Id))
                    .col(integer(Operatings::UserId))
                    .col(string(Operatings::Name))
                    .col(boolean(Operatings::Active).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_operatings_user_id")
                            .from(Operatings::Table, Operatings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OperatingGroups::Table)
                    .if_not_exists()
                    .col(pk_auto(OperatingGroups::Id))
                    .col(integer(OperatingGroups::OperatingId))
                    .col(string(OperatingGroups::Name))
                    .col(boolean(OperatingGroups::Active).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_operating_groups_operating_id")
                            .from(OperatingGroups::Table, OperatingGroups::OperatingId)
                            .to(Operatings::Table, Operatings::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_operatings_user_id")
                    .table(Operatings::Table)
                    .col(Operatings::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OperatingGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Operatings::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Operatings {
    Table,
    Id,
    UserId,
    Name,
    Active,
}

#[derive(DeriveIden)]
pub enum OperatingGroups {
    Table,
    Id,
    OperatingId,
    Name,
    Active,
}
