//! Projection of entity graphs into language-resolved read models
//!
//! The projector never joins: the owning repository hands over a root with
//! its sections and images already loaded. Texts are fetched with one batch
//! call per entity kind, grouped by (entity id, field name) and resolved with
//! [`FallbackResolver`].

use super::fallback::FallbackResolver;
use super::languages::LanguageDirectory;
use super::repository::TextRepository;
use crate::contract::{
    ContentError, ContentRoot, ContentSummary, ContentTree, EntityKind, Language, ResolvedFields,
    SectionView, TextEntry, TextField, TextKey,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Turns stored image paths into public URLs
pub trait UrlPrefixer: Send + Sync {
    fn prefix(&self, path: &str) -> String;
}

/// Joins paths onto a base URL; absolute URLs pass through untouched
#[derive(Debug, Clone, Default)]
pub struct BaseUrlPrefixer {
    base: String,
}

impl BaseUrlPrefixer {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl UrlPrefixer for BaseUrlPrefixer {
    fn prefix(&self, path: &str) -> String {
        if self.base.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

type Grouped<'a> = HashMap<(i64, &'a str), Vec<&'a TextEntry>>;

fn group_by_coordinate(rows: &[TextEntry]) -> Grouped<'_> {
    let mut grouped: Grouped<'_> = HashMap::new();
    for row in rows {
        grouped
            .entry((row.entity_id, row.field_name.as_str()))
            .or_default()
            .push(row);
    }
    grouped
}

fn resolve_fields(
    grouped: &Grouped<'_>,
    resolver: &FallbackResolver,
    language_id: i32,
    entity_id: i64,
    fields: &[TextField],
) -> ResolvedFields {
    fields
        .iter()
        .map(|field| {
            let candidates = grouped
                .get(&(entity_id, field.as_str()))
                .into_iter()
                .flatten()
                .copied();
            (field.as_str(), resolver.resolve(language_id, candidates))
        })
        .collect()
}

pub struct ContentProjector {
    texts: Arc<dyn TextRepository>,
    languages: Arc<LanguageDirectory>,
    urls: Arc<dyn UrlPrefixer>,
}

impl ContentProjector {
    pub fn new(
        texts: Arc<dyn TextRepository>,
        languages: Arc<LanguageDirectory>,
        urls: Arc<dyn UrlPrefixer>,
    ) -> Self {
        Self {
            texts,
            languages,
            urls,
        }
    }

    fn resolver_for(&self, language: &Language) -> FallbackResolver {
        // Without an active default the requested language doubles as default,
        // so resolution goes straight from step 1 to step 3.
        let default_id = self
            .languages
            .default_language()
            .map(|l| l.id)
            .unwrap_or(language.id);
        FallbackResolver::new(default_id)
    }

    /// One flat summary per entity, in input order, with one batch text query
    pub async fn project_list(
        &self,
        kind: EntityKind,
        entity_ids: &[i64],
        language: &Language,
        fields: &[TextField],
    ) -> Result<Vec<ContentSummary>, ContentError> {
        for field in fields {
            TextKey::new(kind, *field)?;
        }
        if entity_ids.is_empty() {
            return Ok(Vec::new());
        }

        let field_names: Vec<&str> = fields.iter().map(TextField::as_str).collect();
        let rows = self
            .texts
            .find_candidates(kind.as_str(), entity_ids, &field_names)
            .await?;
        let grouped = group_by_coordinate(&rows);
        let resolver = self.resolver_for(language);

        tracing::debug!(
            entity_type = %kind,
            entities = entity_ids.len(),
            rows = rows.len(),
            language = %language.code,
            "projected list"
        );

        Ok(entity_ids
            .iter()
            .map(|&id| ContentSummary {
                id,
                fields: resolve_fields(&grouped, &resolver, language.id, id, fields),
            })
            .collect())
    }

    /// Nested tree for one root: every declared field of the root and of each
    /// section, sections and images ascending by sort order
    pub async fn project_detail(
        &self,
        root: &ContentRoot,
        language: &Language,
    ) -> Result<ContentTree, ContentError> {
        let child_kind = match (root.kind.child_kind(), root.sections.is_empty()) {
            (Some(kind), _) => Some(kind),
            (None, true) => None,
            (None, false) => {
                return Err(ContentError::validation(format!(
                    "entity type '{}' does not have sections",
                    root.kind
                )))
            }
        };

        let section_ids: Vec<i64> = root.sections.iter().map(|s| s.id).collect();
        let root_fetch = self
            .texts
            .find_candidates(root.kind.as_str(), std::slice::from_ref(&root.id), &[]);
        let sections_fetch = async {
            match child_kind {
                Some(kind) if !section_ids.is_empty() => {
                    self.texts
                        .find_candidates(kind.as_str(), &section_ids, &[])
                        .await
                }
                _ => Ok(Vec::new()),
            }
        };
        let (root_rows, section_rows) = futures::try_join!(root_fetch, sections_fetch)?;

        let resolver = self.resolver_for(language);
        let root_grouped = group_by_coordinate(&root_rows);
        let section_grouped = group_by_coordinate(&section_rows);
        let section_fields = child_kind.map(|k| k.fields()).unwrap_or(&[]);

        let mut sections: Vec<_> = root.sections.iter().collect();
        sections.sort_by_key(|s| (s.sort_order, s.id));

        let sections = sections
            .into_iter()
            .map(|section| {
                let mut images: Vec<_> = section.images.iter().collect();
                images.sort_by_key(|i| (i.sort_order, i.id));

                SectionView {
                    id: section.id,
                    sort_order: section.sort_order,
                    fields: resolve_fields(
                        &section_grouped,
                        &resolver,
                        language.id,
                        section.id,
                        section_fields,
                    ),
                    images: images.into_iter().map(|i| self.urls.prefix(&i.path)).collect(),
                }
            })
            .collect();

        tracing::debug!(
            entity_type = %root.kind,
            id = root.id,
            sections = root.sections.len(),
            language = %language.code,
            "projected detail"
        );

        Ok(ContentTree {
            id: root.id,
            language: language.code.clone(),
            fields: resolve_fields(
                &root_grouped,
                &resolver,
                language.id,
                root.id,
                root.kind.fields(),
            ),
            sections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixer_joins_with_single_slash() {
        let prefixer = BaseUrlPrefixer::new("https://cdn.example.com/");
        assert_eq!(
            prefixer.prefix("/articles/1.png"),
            "https://cdn.example.com/articles/1.png"
        );
        assert_eq!(
            prefixer.prefix("articles/1.png"),
            "https://cdn.example.com/articles/1.png"
        );
    }

    #[test]
    fn prefixer_keeps_absolute_urls_and_empty_base() {
        let prefixer = BaseUrlPrefixer::new("https://cdn.example.com");
        assert_eq!(prefixer.prefix("https://other/x.png"), "https://other/x.png");
        assert_eq!(BaseUrlPrefixer::default().prefix("a/b.png"), "a/b.png");
    }

    #[test]
    fn grouping_keys_on_entity_and_field() {
        let row = |id: i64, field: &str, lang: i32| TextEntry {
            entity_type: "Article".to_string(),
            entity_id: id,
            field_name: field.to_string(),
            language_id: lang,
            text_content: Some(format!("{id}-{field}-{lang}")),
        };
        let rows = vec![row(1, "title", 1), row(1, "title", 2), row(2, "title", 1), row(1, "content", 1)];
        let grouped = group_by_coordinate(&rows);

        assert_eq!(grouped[&(1, "title")].len(), 2);
        assert_eq!(grouped[&(2, "title")].len(), 1);
        assert_eq!(grouped[&(1, "content")].len(), 1);
        assert!(!grouped.contains_key(&(2, "content")));
    }
}
