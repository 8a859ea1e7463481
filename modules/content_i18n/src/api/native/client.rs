//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    ContentApi, ContentError, ContentRoot, ContentSummary, ContentTree, EntityKind, Language,
    OrdinalScope, TextField, TextValue,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// Handed out by `ContentModule::client` to content services living in the
/// same process.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ContentApi for NativeClient {
    async fn get_detail(
        &self,
        root: &ContentRoot,
        language_code: &str,
    ) -> Result<ContentTree, ContentError> {
        self.service.get_detail(root, language_code).await
    }

    async fn list_summaries(
        &self,
        kind: EntityKind,
        entity_ids: &[i64],
        language_code: &str,
        fields: &[TextField],
    ) -> Result<Vec<ContentSummary>, ContentError> {
        self.service
            .list_summaries(kind, entity_ids, language_code, fields)
            .await
    }

    async fn list_languages(&self) -> Result<Vec<Language>, ContentError> {
        Ok(self.service.list_languages())
    }

    async fn save_texts(
        &self,
        kind: EntityKind,
        entity_id: i64,
        values: &[TextValue],
    ) -> Result<(), ContentError> {
        self.service.save_texts(kind, entity_id, values).await
    }

    async fn delete_texts(
        &self,
        kind: EntityKind,
        entity_id: i64,
        child_ids: &[i64],
    ) -> Result<(), ContentError> {
        self.service.delete_texts(kind, entity_id, child_ids).await
    }

    async fn next_ordinal(&self, scope: &OrdinalScope) -> Result<i32, ContentError> {
        self.service.next_ordinal(scope).await
    }
}
