//! Member catalog operations: scrape, resolve, and project.
//!
//! The projections re-map scraped slugs onto TMDB ids and keep the original
//! scrape order, silently skipping entries that could not be resolved.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::domain::models::{CatalogOutcome, FilmMapping, RatedFilm};
use crate::error::{AppError, Result};
use crate::repository::sqlite::MappingRepository;
use crate::repository::MappingStore;
use crate::service::film_lookup::FilmLookup;
use crate::service::resolver::MappingResolver;
use crate::service::scraper::MemberScraper;

pub struct CatalogService {
    scraper: MemberScraper,
    resolver: MappingResolver,
    store: Arc<dyn MappingStore>,
}

impl CatalogService {
    pub fn new(config: &AppConfig, pool: SqlitePool) -> Self {
        let store: Arc<dyn MappingStore> = Arc::new(MappingRepository::new(pool));
        Self {
            scraper: MemberScraper::new(config.base_url.clone()),
            resolver: MappingResolver::new(
                store.clone(),
                FilmLookup::new(config.base_url.clone()),
            ),
            store,
        }
    }

    /// TMDB ids for a member's watchlist, in site display order, with
    /// unresolvable entries skipped.
    pub async fn watchlist(&self, member: &str) -> Result<CatalogOutcome<i64>> {
        let slugs = match self.scraper.watchlist(member).await? {
            CatalogOutcome::Found(slugs) => slugs,
            CatalogOutcome::MemberNotFound => return Ok(CatalogOutcome::MemberNotFound),
        };

        let mapping = self.resolver.resolve(&slugs).await?;
        let ids = slugs
            .iter()
            .filter_map(|slug| mapping.get(slug).copied())
            .collect();
        Ok(CatalogOutcome::Found(ids))
    }

    /// A member's rated films with ids resolved, in site display order.
    /// Unrated films carry 0.0 on the wire.
    pub async fn watched(&self, member: &str) -> Result<CatalogOutcome<RatedFilm>> {
        let records = match self.scraper.watched(member).await? {
            CatalogOutcome::Found(records) => records,
            CatalogOutcome::MemberNotFound => return Ok(CatalogOutcome::MemberNotFound),
        };

        let slugs: Vec<String> = records.iter().map(|record| record.slug.clone()).collect();
        let mapping = self.resolver.resolve(&slugs).await?;

        let films = records
            .iter()
            .filter_map(|record| {
                mapping.get(&record.slug).map(|&movie_id| RatedFilm {
                    movie_id,
                    rating: record.stars_or_unrated(),
                })
            })
            .collect();
        Ok(CatalogOutcome::Found(films))
    }

    /// Manual slug -> id mapping: order-preserving, unresolvable slugs
    /// skipped.
    pub async fn map_slugs(&self, slugs: &[String]) -> Result<Vec<i64>> {
        let mapping = self.resolver.resolve(slugs).await?;
        Ok(slugs
            .iter()
            .filter_map(|slug| mapping.get(slug).copied())
            .collect())
    }

    /// Explicit overwrite of one mapping.
    pub async fn save_mapping(&self, slug: &str, tmdb_id: i64) -> Result<()> {
        self.store
            .upsert(slug, tmdb_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }

    /// Point lookup of one mapping.
    pub async fn get_mapping(&self, slug: &str) -> Result<Option<FilmMapping>> {
        self.store
            .get(slug)
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }
}
