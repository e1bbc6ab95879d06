use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::models::FilmMapping;

pub mod sqlite;

/// Key/value persistence for slug -> TMDB id mappings.
///
/// Each key is a film slug used verbatim; upserts are idempotent overwrites
/// with last-write-wins semantics. No multi-key transactional guarantee is
/// offered or needed.
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Point lookup by slug.
    async fn get(&self, slug: &str) -> Result<Option<FilmMapping>>;

    /// Bulk lookup; the returned map holds present entries only.
    async fn get_bulk(&self, slugs: &[String]) -> Result<HashMap<String, i64>>;

    /// Create or overwrite the mapping for one slug.
    async fn upsert(&self, slug: &str, tmdb_id: i64) -> Result<()>;
}
