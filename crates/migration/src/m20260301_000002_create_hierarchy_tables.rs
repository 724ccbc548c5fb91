use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_create_users_and_states::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Foreign keys are declared inline so SQLite enforces them too.
        // All of them RESTRICT: lifecycle operations remove children explicitly.
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(pk_auto(Companies::Id))
                    .col(string(Companies::Name))
                    .col(string_null(Companies::TaxId))
                    .col(integer_null(Companies::UserId))
                    .col(boolean(Companies::Active).default(true))
                    .col(timestamp_with_time_zone(Companies::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companies_user_id")
                            .from(Companies::Table, Companies::UserId)
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
                    .table(Branches::Table)
                    .if_not_exists()
                    .col(pk_auto(Branches::Id))
                    .col(integer(Branches::CompanyId))
                    .col(string(Branches::Name))
                    .col(string_null(Branches::Address))
                    .col(integer_null(Branches::UserId))
                    .col(boolean(Branches::Active).default(true))
                    .col(timestamp_with_time_zone(Branches::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_branches_company_id")
                            .from(Branches::Table, Branches::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_branches_user_id")
                            .from(Branches::Table, Branches::UserId)
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
                    .table(Zones::Table)
                    .if_not_exists()
                    .col(pk_auto(Zones::Id))
                    .col(integer(Zones::BranchId))
                    .col(string(Zones::Name))
                    .col(integer_null(Zones::UserId))
                    .col(boolean(Zones::Active).default(true))
                    .col(timestamp_with_time_zone(Zones::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_zones_branch_id")
                            .from(Zones::Table, Zones::BranchId)
                            .to(Branches::Table, Branches::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_zones_user_id")
                            .from(Zones::Table, Zones::UserId)
                            .to(Users::Table, Users::Id)
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
                    .name("idx_branches_company_id")
                    .table(Branches::Table)
                    .col(Branches::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_zones_branch_id")
                    .table(Zones::Table)
                    .col(Zones::BranchId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Zones::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Branches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Companies {
    Table,
    Id,
    Name,
    TaxId,
    UserId,
    Active,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Branches {
    Table,
    Id,
    CompanyId,
    Name,
    Address,
    UserId,
    Active,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Zones {
    Table,
    Id,
    BranchId,
    Name,
    UserId,
    Active,
    CreatedAt,
}
