use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260301_000001_create_users_and_states::Users,
    m20260301_000002_create_hierarchy_tables::Branches,
    m20260301_000003_create_stock_tables::Inventories,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Checkers::Table)
                    .if_not_exists()
                    .col(pk_auto(Checkers::Id))
                    .col(integer(Checkers::BranchId))
                    .col(integer_null(Checkers::UserId))
                    .col(string(Checkers::Name))
                    .col(boolean(Checkers::Active).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_checkers_branch_id")
                            .from(Checkers::Table, Checkers::BranchId)
                            .to(Branches::Table, Branches::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_checkers_user_id")
                            .from(Checkers::Table, Checkers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // An inventory has at most one verification; unique on a nullable column
        // still allows verifications recorded only against a checker.
        manager
            .create_table(
                Table::create()
                    .table(Verifications::Table)
                    .if_not_exists()
                    .col(pk_auto(Verifications::Id))
                    .col(integer_null(Verifications::InventoryId).unique_key())
                    .col(integer_null(Verifications::CheckerId))
                    .col(boolean(Verifications::Approved).default(false))
                    .col(timestamp_with_time_zone(Verifications::VerifiedAt).default(Expr::current_timestamp()))
                    .col(boolean(Verifications::Active).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_verifications_inventory_id")
                            .from(Verifications::Table, Verifications::InventoryId)
                            .to(Inventories::Table, Inventories::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_verifications_checker_id")
                            .from(Verifications::Table, Verifications::CheckerId)
                            .to(Checkers::Table, Checkers::Id)
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
                    .name("idx_checkers_branch_id")
                    .table(Checkers::Table)
                    .col(Checkers::BranchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_verifications_checker_id")
                    .table(Verifications::Table)
                    .col(Verifications::CheckerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Verifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Checkers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Checkers {
    Table,
    Id,
    BranchId,
    UserId,
    Name,
    Active,
}

#[derive(DeriveIden)]
pub enum Verifications {
    Table,
    Id,
    InventoryId,
    CheckerId,
    Approved,
    VerifiedAt,
    Active,
}
