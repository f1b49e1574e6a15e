//! Create `computer` table.
//!
//! `status` is the reservation flag: true while available, false while reserved.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Computer::Table)
                    .if_not_exists()
                    .col(uuid(Computer::Id).primary_key())
                    .col(string_len(Computer::Os, 64).not_null())
                    .col(string_len(Computer::Cpu, 64).not_null())
                    .col(integer(Computer::Ram).not_null())
                    .col(boolean(Computer::Status).not_null().default(true))
                    .col(string_len(Computer::Ssh, 64).not_null())
                    .col(timestamp_with_time_zone(Computer::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Computer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Computer { Table, Id, Os, Cpu, Ram, Status, Ssh, CreatedAt }
