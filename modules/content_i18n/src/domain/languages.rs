//! Language directory: cached view of the `languages` table
//!
//! Resolves request language codes to language rows and names the default
//! language used as the second step of the fallback chain. The cache is an
//! immutable snapshot swapped on `refresh`; writes go through the repository
//! and refresh afterwards.

use super::ordinal::OrdinalAllocator;
use super::repository::LanguageRepository;
use super::validation::validate_language_code;
use crate::contract::{ContentError, Language, NewLanguage, OrdinalScope};
use parking_lot::RwLock;
use std::sync::Arc;

/// Table holding language rows, ordered by `sort_order`
pub const LANGUAGES_TABLE: &str = "languages";

pub struct LanguageDirectory {
    repo: Arc<dyn LanguageRepository>,
    allocator: OrdinalAllocator,
    default_code: String,
    snapshot: RwLock<Arc<Vec<Language>>>,
}

impl LanguageDirectory {
    /// Create an empty directory; call `refresh` before resolving codes
    pub fn new(
        repo: Arc<dyn LanguageRepository>,
        allocator: OrdinalAllocator,
        default_code: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            allocator,
            default_code: default_code.into(),
            snapshot: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Create a directory and load it from storage
    pub async fn load(
        repo: Arc<dyn LanguageRepository>,
        allocator: OrdinalAllocator,
        default_code: impl Into<String>,
    ) -> Result<Self, ContentError> {
        let directory = Self::new(repo, allocator, default_code);
        directory.refresh().await?;
        Ok(directory)
    }

    /// Reload every language row from storage
    pub async fn refresh(&self) -> Result<(), ContentError> {
        let languages = self.repo.list_all().await?;
        let active = languages.iter().filter(|l| l.is_active).count();
        *self.snapshot.write() = Arc::new(languages);

        if self.default_language().is_err() {
            tracing::warn!(
                default_code = %self.default_code,
                "default language is not registered or not active; fallback skips the default step"
            );
        }
        tracing::debug!(active, "language directory refreshed");
        Ok(())
    }

    /// Code configured as the default language
    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    /// Active language for a code (ASCII case-insensitive)
    pub fn resolve(&self, code: &str) -> Result<Language, ContentError> {
        let snapshot = self.snapshot.read().clone();
        let mut matches = snapshot
            .iter()
            .filter(|l| l.code.eq_ignore_ascii_case(code))
            .peekable();

        if matches.peek().is_none() {
            return Err(ContentError::UnknownLanguage {
                code: code.to_string(),
            });
        }

        matches
            .find(|l| l.is_active)
            .cloned()
            .ok_or_else(|| ContentError::LanguageInactive {
                code: code.to_string(),
            })
    }

    pub fn by_id(&self, id: i32) -> Option<Language> {
        self.snapshot.read().iter().find(|l| l.id == id).cloned()
    }

    /// The configured default language, if it is active
    pub fn default_language(&self) -> Result<Language, ContentError> {
        self.resolve(&self.default_code)
    }

    /// Active languages by display order
    pub fn list_active(&self) -> Vec<Language> {
        let mut active: Vec<Language> = self
            .snapshot
            .read()
            .iter()
            .filter(|l| l.is_active)
            .cloned()
            .collect();
        active.sort_by_key(|l| (l.sort_order, l.id));
        active
    }

    /// Register a new active language
    ///
    /// Codes are stored lowercase. Fails when an active language already uses
    /// the code. A missing sort order is allocated after the last language.
    pub async fn register(&self, language: NewLanguage) -> Result<Language, ContentError> {
        let language = NewLanguage {
            code: language.code.to_ascii_lowercase(),
            ..language
        };
        validate_language_code(&language.code)?;

        if self.repo.find_active_by_code(&language.code).await?.is_some() {
            return Err(ContentError::LanguageConflict {
                code: language.code,
            });
        }

        let sort_order = match language.sort_order {
            Some(value) if value > 0 => value,
            _ => {
                self.allocator
                    .next_ordinal(&OrdinalScope::table(LANGUAGES_TABLE))
                    .await?
            }
        };

        // A concurrent registration may still win between the check and the insert
        let Some(created) = self.repo.create(&language, sort_order).await? else {
            return Err(ContentError::LanguageConflict {
                code: language.code,
            });
        };
        tracing::info!(code = %created.code, id = created.id, "language registered");
        self.refresh().await?;
        Ok(created)
    }

    /// Deactivate the active language with this code
    pub async fn deactivate(&self, code: &str) -> Result<(), ContentError> {
        let language = self.resolve(code)?;
        if language.code.eq_ignore_ascii_case(&self.default_code) {
            return Err(ContentError::validation(format!(
                "cannot deactivate the default language '{}'",
                self.default_code
            )));
        }

        if self.repo.deactivate(language.id).await? {
            tracing::info!(code = %language.code, id = language.id, "language deactivated");
        }
        self.refresh().await
    }
}
