//! Contract layer - public API for inter-module communication
//!
//! Transport-agnostic models, the error type and the native client trait.

pub mod client;
pub mod error;
pub mod model;

pub use client::ContentApi;
pub use error::ContentError;
pub use model::{
    ContentRoot, ContentSummary, ContentTree, EntityKind, ImageRow, Language, NewLanguage,
    OrdinalScope, ResolvedFields, ScopePartition, SectionRow, SectionView, TextEntry, TextField,
    TextKey, TextValue,
};
