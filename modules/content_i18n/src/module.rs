//! Module wiring and lifecycle

use crate::config::Config;
use crate::contract::{ContentApi, NewLanguage};
use crate::domain::{BaseUrlPrefixer, LanguageDirectory, LanguageRepository, OrdinalAllocator, Service};
use crate::infra::storage::repositories::{
    SeaOrmLanguageRepository, SeaOrmOrdinalRepository, SeaOrmTextRepository,
};
use anyhow::Result;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Content i18n module: repositories, language directory, service and client
/// built over one database connection
pub struct ContentModule {
    config: Config,
    service: Arc<Service>,
    ordinals: Arc<SeaOrmOrdinalRepository>,
}

impl ContentModule {
    /// Apply pending schema migrations
    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Content i18n migrations completed");
        Ok(())
    }

    /// Build the module; seeds `config.seed_languages` into an empty table
    pub async fn init(db: DatabaseConnection, config: Config) -> Result<Self> {
        let conn = Arc::new(db);

        let language_repo = Arc::new(SeaOrmLanguageRepository::new(conn.clone()));
        let text_repo = Arc::new(SeaOrmTextRepository::new(conn.clone()));
        let ordinals = Arc::new(SeaOrmOrdinalRepository::new(conn));

        let directory = LanguageDirectory::new(
            language_repo.clone(),
            OrdinalAllocator::new(ordinals.clone()),
            config.default_language.clone(),
        );

        if language_repo.list_all().await?.is_empty() {
            for seed in &config.seed_languages {
                directory
                    .register(NewLanguage::new(seed.code.clone(), seed.display_name.clone()))
                    .await?;
            }
            tracing::info!(count = config.seed_languages.len(), "Seeded languages");
        } else {
            directory.refresh().await?;
        }

        let urls = Arc::new(BaseUrlPrefixer::new(config.asset_base_url.clone()));
        let service = Arc::new(Service::new(
            Arc::new(directory),
            text_repo,
            ordinals.clone(),
            urls,
        ));

        tracing::info!(
            default_language = %config.default_language,
            "Content i18n initialized"
        );

        Ok(Self {
            config,
            service,
            ordinals,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other modules
    pub fn client(&self) -> Arc<dyn ContentApi> {
        Arc::new(crate::api::native::NativeClient::new(self.service.clone()))
    }

    /// Ordinal storage, including the transactional `insert_ordered` path
    pub fn ordinals(&self) -> Arc<SeaOrmOrdinalRepository> {
        self.ordinals.clone()
    }
}
