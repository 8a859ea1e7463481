//! Domain service - read and write paths for translatable content

use super::languages::LanguageDirectory;
use super::ordinal::{Orderable, OrdinalAllocator};
use super::projector::{ContentProjector, UrlPrefixer};
use super::repository::{OrdinalRepository, TextRepository};
use super::validation::validate_text_values;
use crate::contract::{
    ContentError, ContentRoot, ContentSummary, ContentTree, EntityKind, Language, NewLanguage,
    OrdinalScope, TextEntry, TextField, TextValue,
};
use std::sync::Arc;

/// Domain service for multilingual content
pub struct Service {
    languages: Arc<LanguageDirectory>,
    texts: Arc<dyn TextRepository>,
    projector: ContentProjector,
    ordinals: OrdinalAllocator,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        languages: Arc<LanguageDirectory>,
        texts: Arc<dyn TextRepository>,
        ordinal_repo: Arc<dyn OrdinalRepository>,
        urls: Arc<dyn UrlPrefixer>,
    ) -> Self {
        let projector = ContentProjector::new(texts.clone(), languages.clone(), urls);
        Self {
            languages,
            texts,
            projector,
            ordinals: OrdinalAllocator::new(ordinal_repo),
        }
    }

    pub fn languages(&self) -> &Arc<LanguageDirectory> {
        &self.languages
    }

    // ===== Read path =====

    /// Resolve a root entity and its sections in the requested language
    pub async fn get_detail(
        &self,
        root: &ContentRoot,
        language_code: &str,
    ) -> Result<ContentTree, ContentError> {
        let language = self.languages.resolve(language_code)?;
        self.projector.project_detail(root, &language).await
    }

    /// Resolve list fields for many entities of one kind
    pub async fn list_summaries(
        &self,
        kind: EntityKind,
        entity_ids: &[i64],
        language_code: &str,
        fields: &[TextField],
    ) -> Result<Vec<ContentSummary>, ContentError> {
        let language = self.languages.resolve(language_code)?;
        self.projector
            .project_list(kind, entity_ids, &language, fields)
            .await
    }

    /// Stored texts of one entity in exactly one language, without fallback
    pub async fn get_translations(
        &self,
        kind: EntityKind,
        entity_id: i64,
        language_code: &str,
        field: Option<TextField>,
    ) -> Result<Vec<TextEntry>, ContentError> {
        let language = self.languages.resolve(language_code)?;
        let rows = self
            .texts
            .find_one(
                kind.as_str(),
                entity_id,
                language.id,
                field.map(|f| f.as_str()),
            )
            .await?;
        Ok(rows)
    }

    // ===== Write path =====

    /// Upsert one text row per (field, language) pair
    ///
    /// Every field and language code is validated before the first write, and
    /// the rows are written in one transaction.
    pub async fn save_texts(
        &self,
        kind: EntityKind,
        entity_id: i64,
        values: &[TextValue],
    ) -> Result<(), ContentError> {
        let keys = validate_text_values(kind, values)?;
        let language_ids = values
            .iter()
            .map(|v| self.languages.resolve(&v.language_code).map(|l| l.id))
            .collect::<Result<Vec<_>, _>>()?;

        let entries: Vec<TextEntry> = keys
            .into_iter()
            .zip(language_ids)
            .zip(values)
            .map(|((key, language_id), value)| {
                TextEntry::new(key, entity_id, language_id, value.text.clone())
            })
            .collect();
        self.texts.upsert_many(&entries).await?;

        tracing::debug!(
            entity_type = %kind,
            entity_id,
            count = values.len(),
            "texts saved"
        );
        Ok(())
    }

    /// Remove every text of an entity and, when given, of its children
    pub async fn delete_texts(
        &self,
        kind: EntityKind,
        entity_id: i64,
        child_ids: &[i64],
    ) -> Result<(), ContentError> {
        let child_kind = match (kind.child_kind(), child_ids.is_empty()) {
            (_, true) => None,
            (Some(child), false) => Some(child),
            (None, false) => {
                return Err(ContentError::validation(format!(
                    "entity type '{}' does not have child rows",
                    kind
                )))
            }
        };

        let mut removed = self.texts.delete_for_entity(kind.as_str(), entity_id).await?;
        if let Some(child) = child_kind {
            removed += self
                .texts
                .delete_for_entities(child.as_str(), child_ids)
                .await?;
        }

        tracing::debug!(entity_type = %kind, entity_id, removed, "texts deleted");
        Ok(())
    }

    // ===== Ordinals =====

    /// Next display position inside a scope
    pub async fn next_ordinal(&self, scope: &OrdinalScope) -> Result<i32, ContentError> {
        self.ordinals.next_ordinal(scope).await
    }

    /// Fill in the item's display position unless the caller supplied one
    pub async fn assign_ordinal<T>(
        &self,
        item: &mut T,
        scope: &OrdinalScope,
    ) -> Result<i32, ContentError>
    where
        T: Orderable + Send,
    {
        self.ordinals.assign_if_absent(item, scope).await
    }

    // ===== Languages =====

    /// Active languages by display order
    pub fn list_languages(&self) -> Vec<Language> {
        self.languages.list_active()
    }

    pub async fn register_language(&self, language: NewLanguage) -> Result<Language, ContentError> {
        self.languages.register(language).await
    }

    pub async fn deactivate_language(&self, code: &str) -> Result<(), ContentError> {
        self.languages.deactivate(code).await
    }
}
