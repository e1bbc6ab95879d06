//! Cache-aside slug -> TMDB id resolution.
//!
//! The persistent store is consulted first; only misses are scraped, and
//! newly discovered mappings are persisted before being returned. A slug that
//! cannot be resolved is omitted from the result and will be re-attempted on
//! the next call (no negative caching).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::Result;
use crate::repository::MappingStore;
use crate::service::film_lookup::FilmLookup;

pub struct MappingResolver {
    store: Arc<dyn MappingStore>,
    lookup: FilmLookup,
}

impl MappingResolver {
    pub fn new(store: Arc<dyn MappingStore>, lookup: FilmLookup) -> Self {
        Self { store, lookup }
    }

    /// Resolve slugs to TMDB ids.
    ///
    /// The returned map's key set is a subset of the input and every entry
    /// carries a real id. Duplicate input slugs collapse; callers re-project
    /// the map onto their own ordered input.
    pub async fn resolve(&self, slugs: &[String]) -> Result<HashMap<String, i64>> {
        if slugs.is_empty() {
            return Ok(HashMap::new());
        }

        let mut seen = HashSet::new();
        let mut distinct = Vec::new();
        for slug in slugs {
            if seen.insert(slug.as_str()) {
                distinct.push(slug.clone());
            }
        }

        let mut mapping = self.store.get_bulk(&distinct).await?;
        let missing: Vec<String> = distinct
            .into_iter()
            .filter(|slug| !mapping.contains_key(slug))
            .collect();
        if missing.is_empty() {
            return Ok(mapping);
        }

        tracing::debug!(
            hits = mapping.len(),
            misses = missing.len(),
            "scraping unmapped slugs"
        );
        for (slug, tmdb_id) in self.lookup.resolve_slugs(&missing).await? {
            let Some(tmdb_id) = tmdb_id else {
                // Unresolved slugs are neither persisted nor returned; the
                // next call retries them.
                tracing::debug!(slug = %slug, "slug did not resolve to a TMDB id");
                continue;
            };
            self.store.upsert(&slug, tmdb_id).await?;
            mapping.insert(slug, tmdb_id);
        }

        Ok(mapping)
    }
}
