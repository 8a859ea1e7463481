//! Common test utilities: in-memory repositories and fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use content_i18n::contract::{Language, NewLanguage, OrdinalScope, TextEntry};
use content_i18n::domain::{
    BaseUrlPrefixer, LanguageDirectory, LanguageRepository, OrdinalAllocator, OrdinalRepository,
    Service, TextRepository,
};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const KO: i32 = 1;
pub const EN: i32 = 2;
pub const ZH: i32 = 3;

pub const CDN: &str = "https://cdn.example.com";

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

// ===== Text store =====

type Coordinate = (String, i64, String, i32);

/// Text store backed by a sorted map; counts every call per operation
#[derive(Default)]
pub struct MockTextRepo {
    rows: RwLock<BTreeMap<Coordinate, Option<String>>>,
    pub upsert_calls: AtomicUsize,
    pub find_one_calls: AtomicUsize,
    pub find_many_calls: AtomicUsize,
    pub find_candidates_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    rejected_language: RwLock<Option<i32>>,
}

impl MockTextRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.rows.read().len()
    }

    pub fn candidate_queries(&self) -> usize {
        self.find_candidates_calls.load(Ordering::SeqCst)
    }

    pub fn upserts(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    /// Make every write for this language fail
    pub fn reject_language(&self, language_id: i32) {
        *self.rejected_language.write() = Some(language_id);
    }

    fn check_writable(&self, entry: &TextEntry) -> anyhow::Result<()> {
        if *self.rejected_language.read() == Some(entry.language_id) {
            anyhow::bail!("write rejected for language {}", entry.language_id);
        }
        Ok(())
    }

    fn store(&self, entry: &TextEntry) {
        self.rows.write().insert(
            (
                entry.entity_type.clone(),
                entry.entity_id,
                entry.field_name.clone(),
                entry.language_id,
            ),
            entry.text_content.clone(),
        );
    }

    /// Seed a row directly, bypassing call counters
    pub fn put(&self, entity_type: &str, entity_id: i64, field: &str, language_id: i32, text: &str) {
        self.rows.write().insert(
            (entity_type.to_string(), entity_id, field.to_string(), language_id),
            Some(text.to_string()),
        );
    }

    fn to_entry(key: &Coordinate, text: &Option<String>) -> TextEntry {
        TextEntry {
            entity_type: key.0.clone(),
            entity_id: key.1,
            field_name: key.2.clone(),
            language_id: key.3,
            text_content: text.clone(),
        }
    }

    fn collect<P>(&self, predicate: P) -> Vec<TextEntry>
    where
        P: Fn(&Coordinate) -> bool,
    {
        // BTreeMap order matches storage order: entity id, field name, language id
        self.rows
            .read()
            .iter()
            .filter(|(key, _)| predicate(key))
            .map(|(key, text)| Self::to_entry(key, text))
            .collect()
    }
}

#[async_trait]
impl TextRepository for MockTextRepo {
    async fn upsert(&self, entry: &TextEntry) -> anyhow::Result<()> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_writable(entry)?;
        self.store(entry);
        Ok(())
    }

    async fn upsert_many(&self, entries: &[TextEntry]) -> anyhow::Result<()> {
        self.upsert_calls.fetch_add(entries.len(), Ordering::SeqCst);
        // All or nothing, like the database transaction
        for entry in entries {
            self.check_writable(entry)?;
        }
        for entry in entries {
            self.store(entry);
        }
        Ok(())
    }

    async fn find_one(
        &self,
        entity_type: &str,
        entity_id: i64,
        language_id: i32,
        field_name: Option<&str>,
    ) -> anyhow::Result<Vec<TextEntry>> {
        self.find_one_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.collect(|k| {
            k.0 == entity_type
                && k.1 == entity_id
                && k.3 == language_id
                && field_name.map_or(true, |f| k.2 == f)
        }))
    }

    async fn find_many(
        &self,
        entity_type: &str,
        entity_ids: &[i64],
        language_id: i32,
    ) -> anyhow::Result<Vec<TextEntry>> {
        self.find_many_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.collect(|k| k.0 == entity_type && entity_ids.contains(&k.1) && k.3 == language_id))
    }

    async fn find_candidates(
        &self,
        entity_type: &str,
        entity_ids: &[i64],
        field_names: &[&str],
    ) -> anyhow::Result<Vec<TextEntry>> {
        self.find_candidates_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.collect(|k| {
            k.0 == entity_type
                && entity_ids.contains(&k.1)
                && (field_names.is_empty() || field_names.contains(&k.2.as_str()))
        }))
    }

    async fn delete_for_entity(&self, entity_type: &str, entity_id: i64) -> anyhow::Result<u64> {
        self.delete_for_entities(entity_type, &[entity_id]).await
    }

    async fn delete_for_entities(&self, entity_type: &str, entity_ids: &[i64]) -> anyhow::Result<u64> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|k, _| !(k.0 == entity_type && entity_ids.contains(&k.1)));
        Ok((before - rows.len()) as u64)
    }
}

// ===== Languages =====

#[derive(Default)]
pub struct MockLanguageRepo {
    data: RwLock<Vec<Language>>,
}

impl MockLanguageRepo {
    /// ko = 1, en = 2, zh = 3, all active
    pub fn seeded() -> Self {
        let repo = Self::default();
        for (id, code, name) in [(KO, "ko", "한국어"), (EN, "en", "English"), (ZH, "zh", "中文")] {
            repo.data.write().push(Language {
                id,
                code: code.to_string(),
                display_name: name.to_string(),
                is_active: true,
                sort_order: id,
                created_at: chrono::Utc::now(),
            });
        }
        repo
    }
}

#[async_trait]
impl LanguageRepository for MockLanguageRepo {
    async fn create(
        &self,
        language: &NewLanguage,
        sort_order: i32,
    ) -> anyhow::Result<Option<Language>> {
        let mut data = self.data.write();
        if data
            .iter()
            .any(|l| l.is_active && l.code.eq_ignore_ascii_case(&language.code))
        {
            return Ok(None);
        }
        let created = Language {
            id: data.iter().map(|l| l.id).max().unwrap_or(0) + 1,
            code: language.code.clone(),
            display_name: language.display_name.clone(),
            is_active: true,
            sort_order,
            created_at: chrono::Utc::now(),
        };
        data.push(created.clone());
        Ok(Some(created))
    }

    async fn find_active_by_code(&self, code: &str) -> anyhow::Result<Option<Language>> {
        Ok(self
            .data
            .read()
            .iter()
            .find(|l| l.code.eq_ignore_ascii_case(code) && l.is_active)
            .cloned())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Language>> {
        let mut all = self.data.read().clone();
        all.sort_by_key(|l| (l.sort_order, l.id));
        Ok(all)
    }

    async fn deactivate(&self, id: i32) -> anyhow::Result<bool> {
        let mut data = self.data.write();
        match data.iter_mut().find(|l| l.id == id && l.is_active) {
            Some(language) => {
                language.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ===== Ordinals =====

/// Sort values per scope; the languages scope mirrors the language repo
#[derive(Default)]
pub struct MockOrdinalRepo {
    values: RwLock<HashMap<String, Vec<i32>>>,
    languages: Option<Arc<MockLanguageRepo>>,
}

impl MockOrdinalRepo {
    pub fn with_languages(languages: Arc<MockLanguageRepo>) -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            languages: Some(languages),
        }
    }

    pub fn insert(&self, scope: &OrdinalScope, sort_order: i32) {
        self.values
            .write()
            .entry(scope.to_string())
            .or_default()
            .push(sort_order);
    }
}

#[async_trait]
impl OrdinalRepository for MockOrdinalRepo {
    async fn max_ordinal(&self, scope: &OrdinalScope) -> anyhow::Result<Option<i32>> {
        if scope.table == "languages" {
            if let Some(languages) = &self.languages {
                let all = languages.list_all().await?;
                return Ok(all.iter().map(|l| l.sort_order).max());
            }
        }
        Ok(self
            .values
            .read()
            .get(&scope.to_string())
            .and_then(|v| v.iter().copied().max()))
    }
}

// ===== Fixtures =====

pub struct Harness {
    pub service: Arc<Service>,
    pub texts: Arc<MockTextRepo>,
    pub languages: Arc<MockLanguageRepo>,
    pub ordinals: Arc<MockOrdinalRepo>,
}

/// Service over seeded mocks with "ko" as default language and a CDN prefix
pub async fn harness() -> Harness {
    harness_with_default("ko").await
}

pub async fn harness_with_default(default_code: &str) -> Harness {
    let texts = Arc::new(MockTextRepo::new());
    let languages = Arc::new(MockLanguageRepo::seeded());
    let ordinals = Arc::new(MockOrdinalRepo::with_languages(languages.clone()));

    let directory = LanguageDirectory::load(
        languages.clone(),
        OrdinalAllocator::new(ordinals.clone()),
        default_code,
    )
    .await
    .expect("language directory should load");

    let service = Arc::new(Service::new(
        Arc::new(directory),
        texts.clone(),
        ordinals.clone(),
        Arc::new(BaseUrlPrefixer::new(CDN)),
    ));

    Harness {
        service,
        texts,
        languages,
        ordinals,
    }
}
