//! Contract models for content i18n
//!
//! Write-side models are transport-agnostic. The read models (`ContentTree`,
//! `ContentSummary`) derive `Serialize` because they are handed to response
//! layers as-is; a missing translation serializes as `null`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::error::ContentError;

/// Owning table of a text or ordinal row.
///
/// Stored as an open string tag; call sites go through this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Article,
    ArticleSection,
    Brand,
    BrandSection,
    Product,
    ProductCategory,
    Option,
    OptionValue,
    Category,
    HomeSection,
    News,
    NewsSection,
    Partner,
}

impl EntityKind {
    pub const ALL: [EntityKind; 13] = [
        EntityKind::Article,
        EntityKind::ArticleSection,
        EntityKind::Brand,
        EntityKind::BrandSection,
        EntityKind::Product,
        EntityKind::ProductCategory,
        EntityKind::Option,
        EntityKind::OptionValue,
        EntityKind::Category,
        EntityKind::HomeSection,
        EntityKind::News,
        EntityKind::NewsSection,
        EntityKind::Partner,
    ];

    /// Tag persisted in `text_entries.entity_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "Article",
            Self::ArticleSection => "ArticleSection",
            Self::Brand => "Brand",
            Self::BrandSection => "BrandSection",
            Self::Product => "Product",
            Self::ProductCategory => "ProductCategory",
            Self::Option => "Option",
            Self::OptionValue => "OptionValue",
            Self::Category => "Category",
            Self::HomeSection => "HomeSection",
            Self::News => "News",
            Self::NewsSection => "NewsSection",
            Self::Partner => "Partner",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// Translatable fields this kind carries
    pub fn fields(&self) -> &'static [TextField] {
        use TextField::*;
        match self {
            Self::Article => &[Title, SubTitle, Content],
            Self::ArticleSection | Self::NewsSection | Self::BrandSection => &[Title, Content],
            Self::News => &[Title, SubTitle, Content],
            Self::Brand => &[Name, Description],
            Self::Product => &[Name, Description, Origin],
            Self::ProductCategory | Self::Category => &[Name],
            Self::Option => &[Name],
            Self::OptionValue => &[Value],
            Self::HomeSection => &[Title, SubTitle, Content],
            Self::Partner => &[Name, Description],
        }
    }

    /// Kind of the ordered child rows projected under a root of this kind
    pub fn child_kind(&self) -> Option<EntityKind> {
        match self {
            Self::Article => Some(Self::ArticleSection),
            Self::News => Some(Self::NewsSection),
            Self::Brand => Some(Self::BrandSection),
            Self::Option => Some(Self::OptionValue),
            _ => None,
        }
    }

    pub fn supports(&self, field: TextField) -> bool {
        self.fields().contains(&field)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translatable attribute name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextField {
    Title,
    SubTitle,
    Content,
    Name,
    Description,
    Value,
    Origin,
}

impl TextField {
    pub const ALL: [TextField; 7] = [
        TextField::Title,
        TextField::SubTitle,
        TextField::Content,
        TextField::Name,
        TextField::Description,
        TextField::Value,
        TextField::Origin,
    ];

    /// Name persisted in `text_entries.field_name`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::SubTitle => "subTitle",
            Self::Content => "content",
            Self::Name => "name",
            Self::Description => "description",
            Self::Value => "value",
            Self::Origin => "origin",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated (entity kind, field) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextKey {
    kind: EntityKind,
    field: TextField,
}

impl TextKey {
    /// Rejects fields the kind does not declare
    pub fn new(kind: EntityKind, field: TextField) -> Result<Self, ContentError> {
        if !kind.supports(field) {
            return Err(ContentError::UnsupportedField {
                entity_type: kind.as_str().to_string(),
                field_name: field.as_str().to_string(),
            });
        }
        Ok(Self { kind, field })
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn field(&self) -> TextField {
        self.field
    }
}

/// Language row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub id: i32,
    /// Short code such as "ko", "en" or "zh"
    pub code: String,
    pub display_name: String,
    pub is_active: bool,
    /// Display order among languages
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Input for registering a language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLanguage {
    pub code: String,
    pub display_name: String,
    /// Allocated after the last language when absent
    pub sort_order: Option<i32>,
}

impl NewLanguage {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
            sort_order: None,
        }
    }
}

/// One stored text value at (entity type, entity id, field name, language)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub entity_type: String,
    pub entity_id: i64,
    pub field_name: String,
    pub language_id: i32,
    /// `None` means no translation for this coordinate
    pub text_content: Option<String>,
}

impl TextEntry {
    pub fn new(
        key: TextKey,
        entity_id: i64,
        language_id: i32,
        text_content: Option<String>,
    ) -> Self {
        Self {
            entity_type: key.kind().as_str().to_string(),
            entity_id,
            field_name: key.field().as_str().to_string(),
            language_id,
            text_content,
        }
    }
}

/// A text value addressed by language code, as submitted on writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextValue {
    pub field: TextField,
    pub language_code: String,
    pub text: Option<String>,
}

impl TextValue {
    pub fn new(field: TextField, language_code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            field,
            language_code: language_code.into(),
            text: Some(text.into()),
        }
    }
}

// ===== Eager-loaded graph handed in by the owning repository =====

/// Root entity with its ordered children already loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRoot {
    pub kind: EntityKind,
    pub id: i64,
    pub sections: Vec<SectionRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRow {
    pub id: i64,
    pub sort_order: i32,
    pub images: Vec<ImageRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRow {
    pub id: i64,
    /// Storage key, prefixed with the asset base URL on projection
    pub path: String,
    pub sort_order: i32,
}

// ===== Read models =====

/// Resolved text per field name; `None` when no language has a value
pub type ResolvedFields = BTreeMap<&'static str, Option<String>>;

/// Flat list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSummary {
    pub id: i64,
    #[serde(flatten)]
    pub fields: ResolvedFields,
}

impl ContentSummary {
    pub fn text(&self, field: TextField) -> Option<&str> {
        self.fields.get(field.as_str()).and_then(|v| v.as_deref())
    }
}

/// Language-resolved detail tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTree {
    pub id: i64,
    /// Code of the requested language
    pub language: String,
    #[serde(flatten)]
    pub fields: ResolvedFields,
    pub sections: Vec<SectionView>,
}

impl ContentTree {
    pub fn text(&self, field: TextField) -> Option<&str> {
        self.fields.get(field.as_str()).and_then(|v| v.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub id: i64,
    pub sort_order: i32,
    #[serde(flatten)]
    pub fields: ResolvedFields,
    /// Image URLs ordered by their sort order
    pub images: Vec<String>,
}

impl SectionView {
    pub fn text(&self, field: TextField) -> Option<&str> {
        self.fields.get(field.as_str()).and_then(|v| v.as_deref())
    }
}

// ===== Ordinals =====

/// Rows whose `sort_order` is compared to compute the next ordinal
///
/// `partition` restricts the scope to the children of one parent
/// (e.g. `article_id = 42`); without it the whole table is the scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdinalScope {
    pub table: String,
    pub sort_column: String,
    pub partition: Option<ScopePartition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopePartition {
    pub column: String,
    pub value: i64,
}

impl OrdinalScope {
    /// Scope covering a whole table, using the `sort_order` column
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            sort_column: "sort_order".to_string(),
            partition: None,
        }
    }

    /// Scope covering the rows of `table` whose `column` equals `parent_id`
    pub fn children_of(table: impl Into<String>, column: impl Into<String>, parent_id: i64) -> Self {
        Self {
            partition: Some(ScopePartition {
                column: column.into(),
                value: parent_id,
            }),
            ..Self::table(table)
        }
    }

    pub fn with_sort_column(mut self, column: impl Into<String>) -> Self {
        self.sort_column = column.into();
        self
    }
}

impl fmt::Display for OrdinalScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.sort_column)?;
        if let Some(p) = &self.partition {
            write!(f, "[{}={}]", p.column, p.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_tags_round_trip_through_parse() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EntityKind::parse("Home"), None);
    }

    #[test]
    fn field_names_use_camel_case_tags() {
        assert_eq!(TextField::SubTitle.as_str(), "subTitle");
        assert_eq!(TextField::parse("subTitle"), Some(TextField::SubTitle));
        assert_eq!(TextField::parse("subtitle"), None);
    }

    #[test]
    fn text_key_rejects_undeclared_field() {
        assert!(TextKey::new(EntityKind::Article, TextField::Title).is_ok());
        let err = TextKey::new(EntityKind::OptionValue, TextField::Title).unwrap_err();
        assert!(matches!(err, ContentError::UnsupportedField { .. }));
    }

    #[test]
    fn section_kinds_are_declared_for_roots_with_children() {
        assert_eq!(EntityKind::Article.child_kind(), Some(EntityKind::ArticleSection));
        assert_eq!(EntityKind::Option.child_kind(), Some(EntityKind::OptionValue));
        assert_eq!(EntityKind::Category.child_kind(), None);
    }

    #[test]
    fn scope_display_includes_partition() {
        let scope = OrdinalScope::children_of("article_sections", "article_id", 42);
        assert_eq!(scope.to_string(), "article_sections.sort_order[article_id=42]");
        assert_eq!(OrdinalScope::table("banners").to_string(), "banners.sort_order");
    }

    #[test]
    fn missing_text_serializes_as_null() {
        let mut fields = ResolvedFields::new();
        fields.insert("title", None);
        let summary = ContentSummary { id: 7, fields };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 7, "title": null }));
    }
}
