//! Database migrations for content i18n

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_languages::Migration),
            Box::new(m20250301_000002_create_text_entries::Migration),
            Box::new(m20250301_000003_unique_active_language_code::Migration),
        ]
    }
}

mod m20250301_000001_create_languages {
    use super::*;

    pub struct Migration;

    // Versions share this file, so the name cannot come from `file!()`
    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_languages"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Languages::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Languages::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Languages::Code).string_len(16).not_null())
                        .col(ColumnDef::new(Languages::DisplayName).string().not_null())
                        .col(
                            ColumnDef::new(Languages::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Languages::SortOrder)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Languages::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            // Not unique: deactivated rows may share a code with the active one
            manager
                .create_index(
                    Index::create()
                        .name("idx_languages_code")
                        .table(Languages::Table)
                        .col(Languages::Code)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Languages::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Languages {
        Table,
        Id,
        Code,
        DisplayName,
        IsActive,
        SortOrder,
        CreatedAt,
    }
}

mod m20250301_000002_create_text_entries {
    use super::*;

    pub struct Migration;

    // Versions share this file, so the name cannot come from `file!()`
    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_text_entries"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(TextEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TextEntries::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(TextEntries::EntityType).string_len(64).not_null())
                        .col(ColumnDef::new(TextEntries::EntityId).big_integer().not_null())
                        .col(ColumnDef::new(TextEntries::FieldName).string_len(64).not_null())
                        .col(ColumnDef::new(TextEntries::LanguageId).integer().not_null())
                        .col(ColumnDef::new(TextEntries::TextContent).text())
                        .col(
                            ColumnDef::new(TextEntries::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(TextEntries::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_text_entries_language")
                                .from(TextEntries::Table, TextEntries::LanguageId)
                                .to(Languages::Table, Languages::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // Upsert target
            manager
                .create_index(
                    Index::create()
                        .name("uq_text_entries_coordinate")
                        .table(TextEntries::Table)
                        .col(TextEntries::EntityType)
                        .col(TextEntries::EntityId)
                        .col(TextEntries::FieldName)
                        .col(TextEntries::LanguageId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_text_entries_language_id")
                        .table(TextEntries::Table)
                        .col(TextEntries::LanguageId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TextEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum TextEntries {
        Table,
        Id,
        EntityType,
        EntityId,
        FieldName,
        LanguageId,
        TextContent,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Languages {
        Table,
        Id,
    }
}

mod m20250301_000003_unique_active_language_code {
    use super::*;
    use sea_orm::ConnectionTrait;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_unique_active_language_code"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // At most one active row per code; deactivated rows keep theirs
            manager
                .get_connection()
                .execute_unprepared(
                    "CREATE UNIQUE INDEX IF NOT EXISTS uq_languages_active_code \
                     ON languages (code) WHERE is_active",
                )
                .await?;
            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_index(
                    Index::drop()
                        .name("uq_languages_active_code")
                        .table(Languages::Table)
                        .to_owned(),
                )
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Languages {
        Table,
    }
}
