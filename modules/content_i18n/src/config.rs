//! Configuration for content i18n module

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment overrides, e.g. `CONTENT_I18N__DEFAULT_LANGUAGE=en`
pub const ENV_PREFIX: &str = "CONTENT_I18N__";

/// Content i18n configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Code of the language used when the requested one has no text
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Base URL prepended to stored image paths
    #[serde(default)]
    pub asset_base_url: String,

    /// Languages inserted by bootstrap when the table is empty
    #[serde(default = "default_seed_languages")]
    pub seed_languages: Vec<SeedLanguage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SeedLanguage {
    pub code: String,
    pub display_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            asset_base_url: String::new(),
            seed_languages: default_seed_languages(),
        }
    }
}

impl Config {
    /// Defaults, then an optional YAML file, then `CONTENT_I18N__*` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .context("Failed to load content i18n configuration")
    }
}

fn default_language() -> String {
    "ko".to_string()
}

fn default_seed_languages() -> Vec<SeedLanguage> {
    [("ko", "한국어"), ("en", "English"), ("zh", "中文")]
        .into_iter()
        .map(|(code, display_name)| SeedLanguage {
            code: code.to_string(),
            display_name: display_name.to_string(),
        })
        .collect()
}
