//! Content i18n Module
//!
//! Per-language text storage for content entities (articles, news, brands,
//! products, categories, ...), deterministic language fallback, projection of
//! eager-loaded entity graphs into language-resolved trees, and display-order
//! allocation for orderable rows.

// Public exports
pub mod contract;
pub use contract::{
    client::ContentApi, error::ContentError, ContentRoot, ContentSummary, ContentTree,
    EntityKind, ImageRow, Language, NewLanguage, OrdinalScope, SectionRow, SectionView,
    TextEntry, TextField, TextKey, TextValue,
};

pub mod module;
pub use module::ContentModule;

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
