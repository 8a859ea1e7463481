//! Domain layer - business logic and services

pub mod fallback;
pub mod languages;
pub mod ordinal;
pub mod projector;
pub mod repository;
pub mod service;
pub mod validation;

pub use fallback::FallbackResolver;
pub use languages::LanguageDirectory;
pub use ordinal::{Orderable, OrdinalAllocator};
pub use projector::{BaseUrlPrefixer, ContentProjector, UrlPrefixer};
pub use repository::{LanguageRepository, OrdinalRepository, TextRepository};
pub use service::Service;
