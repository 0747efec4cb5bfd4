//! Create `record` table.
//!
//! One row per object; `(kind, id)` is the identity, `data` the tagged JSON document.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Record::Table)
                    .if_not_exists()
                    .col(string_len(Record::Kind, 32))
                    .col(string_len(Record::Id, 64))
                    .col(json_binary(Record::Data))
                    .col(timestamp_with_time_zone(Record::UpdatedAt))
                    .primary_key(Index::create().name("pk_record").col(Record::Kind).col(Record::Id))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_record_kind")
                    .table(Record::Table)
                    .col(Record::Kind)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Record::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Record { Table, Kind, Id, Data, UpdatedAt }
