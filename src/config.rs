use std::env;

use url::Url;

use crate::error::{AppError, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://boxdlink.db?mode=rwc";
const DEFAULT_BASE_URL: &str = "https://letterboxd.com";

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection string for the mapping store.
    pub database_url: String,
    /// Root of the film-tracking site being scraped.
    pub base_url: Url,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("BOXDLINK_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let base = env::var("BOXDLINK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base).map_err(|_| AppError::InvalidUrl(base.clone()))?;

        Ok(Self {
            database_url,
            base_url,
        })
    }

    /// Configuration pointing at an arbitrary site root, with the default
    /// store location.
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            base_url,
        }
    }
}
