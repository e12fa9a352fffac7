use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Searches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Searches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Searches::CreatedAt)
                            .date_time()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_owned()),
                    )
                    .col(ColumnDef::new(Searches::StartDate).string().null())
                    .col(ColumnDef::new(Searches::EndDate).string().null())
                    .col(ColumnDef::new(Searches::MinMagnitude).double().not_null())
                    .col(ColumnDef::new(Searches::MaxMagnitude).double().null())
                    .col(ColumnDef::new(Searches::RawResponse).text().not_null())
                    .to_owned(),
            )
            .await?;

        // Index on created_at for audit queries sorted by insertion time
        manager
            .create_index(
                Index::create()
                    .name("idx_searches_created_at")
                    .table(Searches::Table)
                    .col(Searches::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Searches::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Searches {
    Table,
    Id,
    CreatedAt,
    StartDate,
    EndDate,
    MinMagnitude,
    MaxMagnitude,
    RawResponse,
}
