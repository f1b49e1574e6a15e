use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Listing scans in insertion order
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_computer_created_at")
                    .table(Computer::Table)
                    .col(Computer::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_computer_status")
                    .table(Computer::Table)
                    .col(Computer::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_computer_status").table(Computer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_computer_created_at").table(Computer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Computer { Table, Status, CreatedAt }
