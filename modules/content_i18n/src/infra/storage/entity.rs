//! SeaORM entities for database tables

/// Language table entity
pub mod language {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "languages")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        /// Short code ("ko", "en", "zh")
        pub code: String,

        pub display_name: String,

        /// Deactivated rows stay for referential integrity
        pub is_active: bool,

        /// Display order
        pub sort_order: i32,

        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// One-to-many relationship with text entries
        #[sea_orm(has_many = "super::text_entry::Entity")]
        TextEntries,
    }

    impl Related<super::text_entry::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::TextEntries.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Text entry table entity
pub mod text_entry {
    use sea_orm::entity::prelude::*;

    /// Unique on (entity_type, entity_id, field_name, language_id)
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "text_entries")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        /// Owning table tag ("Article", "ArticleSection", ...)
        pub entity_type: String,

        /// Primary key of the owning row
        pub entity_id: i64,

        /// Attribute name ("title", "content", ...)
        pub field_name: String,

        pub language_id: i32,

        #[sea_orm(column_type = "Text", nullable)]
        pub text_content: Option<String>,

        pub created_at: DateTimeUtc,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Foreign key to languages
        #[sea_orm(
            belongs_to = "super::language::Entity",
            from = "Column::LanguageId",
            to = "super::language::Column::Id"
        )]
        Language,
    }

    impl Related<super::language::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Language.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
