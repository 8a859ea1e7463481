//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{Language, NewLanguage, OrdinalScope, TextEntry};
use anyhow::Result;
use async_trait::async_trait;

/// Repository for language rows
#[async_trait]
pub trait LanguageRepository: Send + Sync {
    /// Insert a new active language at the given display position
    ///
    /// `None` when an active row already holds the code.
    async fn create(&self, language: &NewLanguage, sort_order: i32) -> Result<Option<Language>>;

    /// Find the active language for a code, ignoring ASCII case
    async fn find_active_by_code(&self, code: &str) -> Result<Option<Language>>;

    /// List every language, active or not, by display order
    async fn list_all(&self) -> Result<Vec<Language>>;

    /// Mark a language inactive; returns false when nothing changed
    async fn deactivate(&self, id: i32) -> Result<bool>;
}

/// Text store keyed by (entity type, entity id, field name, language id)
///
/// Lookups return empty results rather than errors when nothing matches.
#[async_trait]
pub trait TextRepository: Send + Sync {
    /// Insert or overwrite the row at the entry's coordinate
    async fn upsert(&self, entry: &TextEntry) -> Result<()>;

    /// Upsert every entry atomically: either all rows are written or none
    async fn upsert_many(&self, entries: &[TextEntry]) -> Result<()>;

    /// Rows of one entity in one language, optionally narrowed to one field
    async fn find_one(
        &self,
        entity_type: &str,
        entity_id: i64,
        language_id: i32,
        field_name: Option<&str>,
    ) -> Result<Vec<TextEntry>>;

    /// Rows of many entities in one language, in a single query
    async fn find_many(
        &self,
        entity_type: &str,
        entity_ids: &[i64],
        language_id: i32,
    ) -> Result<Vec<TextEntry>>;

    /// Rows of many entities across all languages, in a single query
    ///
    /// An empty `field_names` selects every field. Rows come back ordered by
    /// entity id, field name and language id.
    async fn find_candidates(
        &self,
        entity_type: &str,
        entity_ids: &[i64],
        field_names: &[&str],
    ) -> Result<Vec<TextEntry>>;

    /// Remove every row of one entity
    async fn delete_for_entity(&self, entity_type: &str, entity_id: i64) -> Result<u64>;

    /// Remove every row of many entities
    async fn delete_for_entities(&self, entity_type: &str, entity_ids: &[i64]) -> Result<u64>;
}

/// Read access to the sort column of orderable tables
#[async_trait]
pub trait OrdinalRepository: Send + Sync {
    /// Largest sort value inside the scope, `None` when the scope is empty
    async fn max_ordinal(&self, scope: &OrdinalScope) -> Result<Option<i32>>;
}
