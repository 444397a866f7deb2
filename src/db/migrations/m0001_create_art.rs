use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Art::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Art::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Art::ImageUrl).text().not_null())
                    .col(ColumnDef::new(Art::Prompt).text().not_null())
                    .col(ColumnDef::new(Art::RevisedPrompt).text().not_null())
                    .col(
                        ColumnDef::new(Art::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    // written by the application so stored values share one format
                    .col(
                        ColumnDef::new(Art::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_art_created_at")
                    .table(Art::Table)
                    .col(Art::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_art_is_active")
                    .table(Art::Table)
                    .col(Art::IsActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Art::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Art {
    Table,
    Id,
    ImageUrl,
    Prompt,
    RevisedPrompt,
    IsActive,
    CreatedAt,
}
