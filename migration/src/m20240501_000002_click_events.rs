use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClickEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClickEvents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClickEvents::ShortCode)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClickEvents::ClickedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClickEvents::IpAddress).string_len(45).null())
                    .col(ColumnDef::new(ClickEvents::UserAgent).text().null())
                    .to_owned(),
            )
            .await?;

        // Per-code queries: recent clicks and the user-agent breakdown
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_click_events_short_code")
                    .table(ClickEvents::Table)
                    .col(ClickEvents::ShortCode)
                    .to_owned(),
            )
            .await?;

        // Time-ordered scans within one code
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_click_events_code_time")
                    .table(ClickEvents::Table)
                    .col(ClickEvents::ShortCode)
                    .col(ClickEvents::ClickedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_click_events_code_time").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_click_events_short_code")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ClickEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ClickEvents {
    Table,
    Id,
    ShortCode,
    ClickedAt,
    IpAddress,
    UserAgent,
}
