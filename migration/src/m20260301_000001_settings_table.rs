use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 settings 表
        manager
            .create_table(
                Table::create()
                    .table(Setting::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Setting::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Setting::Key)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Setting::Value).text().null())
                    .col(
                        ColumnDef::new(Setting::Type)
                            .string()
                            .not_null()
                            .default("string"),
                    )
                    .col(ColumnDef::new(Setting::Category).string().null())
                    .col(ColumnDef::new(Setting::Description).string().null())
                    .col(
                        ColumnDef::new(Setting::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Setting::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 category 索引（按分类过滤读取）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_settings_category")
                    .table(Setting::Table)
                    .col(Setting::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除 settings 索引
        manager
            .drop_index(Index::drop().name("idx_settings_category").to_owned())
            .await?;

        // 删除 settings 表
        manager
            .drop_table(Table::drop().table(Setting::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Setting {
    #[sea_orm(iden = "settings")]
    Table,
    Id,
    Key,
    Value,
    Type,
    Category,
    Description,
    CreatedAt,
    UpdatedAt,
}
