//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{language, text_entry};
use crate::contract::{Language, NewLanguage, TextEntry};

// ===== Language Conversions =====

impl From<language::Model> for Language {
    fn from(entity: language::Model) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            display_name: entity.display_name,
            is_active: entity.is_active,
            sort_order: entity.sort_order,
            created_at: entity.created_at,
        }
    }
}

/// Active model for a fresh language row; the id is left to the database
pub fn new_language_model(language: &NewLanguage, sort_order: i32) -> language::ActiveModel {
    use sea_orm::ActiveValue::{NotSet, Set};

    language::ActiveModel {
        id: NotSet,
        code: Set(language.code.clone()),
        display_name: Set(language.display_name.clone()),
        is_active: Set(true),
        sort_order: Set(sort_order),
        created_at: Set(chrono::Utc::now()),
    }
}

// ===== Text Entry Conversions =====

impl From<text_entry::Model> for TextEntry {
    fn from(entity: text_entry::Model) -> Self {
        Self {
            entity_type: entity.entity_type,
            entity_id: entity.entity_id,
            field_name: entity.field_name,
            language_id: entity.language_id,
            text_content: entity.text_content,
        }
    }
}

impl From<&TextEntry> for text_entry::ActiveModel {
    fn from(model: &TextEntry) -> Self {
        use sea_orm::ActiveValue::{NotSet, Set};

        let now = chrono::Utc::now();
        Self {
            id: NotSet,
            entity_type: Set(model.entity_type.clone()),
            entity_id: Set(model.entity_id),
            field_name: Set(model.field_name.clone()),
            language_id: Set(model.language_id),
            text_content: Set(model.text_content.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}
