use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260301_000001_create_users_and_states::States, m20260301_000002_create_hierarchy_tables::Zones};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(pk_auto(Items::Id))
                    .col(integer(Items::ZoneId))
                    .col(integer(Items::StateId))
                    .col(string(Items::Code))
                    .col(text_null(Items::Description))
                    .col(boolean(Items::Active).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_zone_id")
                            .from(Items::Table, Items::ZoneId)
                            .to(Zones::Table, Zones::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_state_id")
                            .from(Items::Table, Items::StateId)
                            .to(States::Table, States::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Inventories::Table)
                    .if_not_exists()
                    .col(pk_auto(Inventories::Id))
                    .col(integer(Inventories::ZoneId))
                    .col(string(Inventories::Name))
                    .col(timestamp_with_time_zone(Inventories::TakenAt).default(Expr::current_timestamp()))
                    .col(boolean(Inventories::Active).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventories_zone_id")
                            .from(Inventories::Table, Inventories::ZoneId)
                            .to(Zones::Table, Zones::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InventoryDetails::Table)
                    .if_not_exists()
                    .col(pk_auto(InventoryDetails::Id))
                    .col(integer(InventoryDetails::InventoryId))
                    .col(integer(InventoryDetails::ItemId))
                    .col(integer(InventoryDetails::StateId))
                    .col(text_null(InventoryDetails::Observation))
                    .col(boolean(InventoryDetails::Active).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_details_inventory_id")
                            .from(InventoryDetails::Table, InventoryDetails::InventoryId)
                            .to(Inventories::Table, Inventories::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_details_item_id")
                            .from(InventoryDetails::Table, InventoryDetails::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_details_state_id")
                            .from(InventoryDetails::Table, InventoryDetails::StateId)
                            .to(States::Table, States::Id)
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
                    .name("idx_items_zone_id")
                    .table(Items::Table)
                    .col(Items::ZoneId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_inventories_zone_id")
                    .table(Inventories::Table)
                    .col(Inventories::ZoneId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_inventory_details_inventory_id")
                    .table(InventoryDetails::Table)
                    .col(InventoryDetails::InventoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InventoryDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Inventories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Items {
    Table,
    Id,
    ZoneId,
    StateId,
    Code,
    Description,
    Active,
}

#[derive(DeriveIden)]
pub enum Inventories {
    Table,
    Id,
    ZoneId,
    Name,
    TakenAt,
    Active,
}

#[derive(DeriveIden)]
pub enum InventoryDetails {
    Table,
    Id,
    InventoryId,
    ItemId,
    StateId,
    Observation,
    Active,
}
