use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The primary key doubles as the uniqueness constraint that backs
        // the shortening collision loop. A concurrent insert of the same
        // candidate code fails here instead of silently overwriting.
        manager
            .create_table(
                Table::create()
                    .table(ShortUrl::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShortUrl::ShortCode)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShortUrl::OriginalUrl).text().not_null())
                    .col(
                        ColumnDef::new(ShortUrl::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShortUrl::ClickCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing is always ordered by creation time, newest first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_urls_created_at")
                    .table(ShortUrl::Table)
                    .col(ShortUrl::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_short_urls_created_at").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ShortUrl::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShortUrl {
    #[sea_orm(iden = "short_urls")]
    Table,
    ShortCode,
    OriginalUrl,
    CreatedAt,
    ClickCount,
}
