use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Labubu {
    Table,
    Id,
    Text,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Labubu::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Labubu::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Labubu::Text).text().not_null())
                    .col(
                        ColumnDef::new(Labubu::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // listing is ordered by creation as well as id
        manager
            .create_index(
                Index::create()
                    .name("idx_labubu_created_at")
                    .table(Labubu::Table)
                    .col(Labubu::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Labubu::Table).if_exists().to_owned())
            .await
    }
}
