use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::quiz::{CatalogError, QuizCatalog};

pub const CATALOG_VAR: &str = "STUDYMATE_CATALOG";
pub const ASSET_BASE_URL_VAR: &str = "STUDYMATE_ASSET_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not valid unicode")]
    NotUnicode { name: &'static str },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Replaces the built-in catalog when set.
    pub catalog_path: Option<PathBuf>,
    pub asset_base_url: Option<String>,
}

impl Config {
    /// Reads the environment. Call `dotenv` before this if a `.env` file
    /// should be honoured. The bot token is left to `Bot::from_env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            catalog_path: read_var(CATALOG_VAR)?.map(PathBuf::from),
            asset_base_url: read_var(ASSET_BASE_URL_VAR)?,
        })
    }

    pub fn load_catalog(&self) -> Result<QuizCatalog, ConfigError> {
        let catalog = match &self.catalog_path {
            Some(path) => QuizCatalog::from_file(path)?,
            None => QuizCatalog::builtin()?,
        };
        Ok(catalog)
    }

    /// Where a result image can be fetched from. Without a base URL the
    /// reference is passed through as is.
    pub fn image_url(&self, image: &str) -> String {
        match &self.asset_base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                image.trim_start_matches('/')
            ),
            None => image.to_string(),
        }
    }
}

fn read_var(name: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { name }),
    }
}
