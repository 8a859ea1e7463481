//! Native client trait for inter-module communication
//!
//! Content services (articles, brands, products, ...) call this in-process
//! to resolve and store their translatable text.

use super::{
    error::ContentError,
    model::{ContentRoot, ContentSummary, ContentTree, EntityKind, Language, OrdinalScope, TextField, TextValue},
};
use async_trait::async_trait;

/// Content i18n API for inter-module communication
#[async_trait]
pub trait ContentApi: Send + Sync {
    // ===== Read path =====

    /// Resolve a root entity and its sections in the requested language
    async fn get_detail(
        &self,
        root: &ContentRoot,
        language_code: &str,
    ) -> Result<ContentTree, ContentError>;

    /// Resolve `fields` for every entity in `entity_ids`, preserving input order
    async fn list_summaries(
        &self,
        kind: EntityKind,
        entity_ids: &[i64],
        language_code: &str,
        fields: &[TextField],
    ) -> Result<Vec<ContentSummary>, ContentError>;

    /// Active languages in display order
    async fn list_languages(&self) -> Result<Vec<Language>, ContentError>;

    // ===== Write path =====

    /// Upsert one text row per (field, language) pair
    async fn save_texts(
        &self,
        kind: EntityKind,
        entity_id: i64,
        values: &[TextValue],
    ) -> Result<(), ContentError>;

    /// Remove every text of an entity and of the given children
    async fn delete_texts(
        &self,
        kind: EntityKind,
        entity_id: i64,
        child_ids: &[i64],
    ) -> Result<(), ContentError>;

    /// Next display position in a scope
    async fn next_ordinal(&self, scope: &OrdinalScope) -> Result<i32, ContentError>;
}
