//! Slug -> TMDB id mapping repository.
//!
//! Rows are keyed by the slug verbatim; upserts overwrite in place and stamp
//! the resolution time.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

use crate::domain::models::FilmMapping;
use crate::repository::MappingStore;

/// Upper bound on bound parameters per bulk-lookup query.
const LOOKUP_CHUNK_SIZE: usize = 100;

pub struct MappingRepository {
    pool: SqlitePool,
}

impl MappingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingStore for MappingRepository {
    async fn get(&self, slug: &str) -> Result<Option<FilmMapping>> {
        let row = sqlx::query("SELECT slug, tmdb_id, resolved_at FROM film_mappings WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch mapping")?;

        Ok(row.map(|row| row_to_mapping(&row)))
    }

    async fn get_bulk(&self, slugs: &[String]) -> Result<HashMap<String, i64>> {
        if slugs.is_empty() {
            return Ok(HashMap::new());
        }

        let mut found = HashMap::with_capacity(slugs.len());

        for chunk in slugs.chunks(LOOKUP_CHUNK_SIZE) {
            let mut qb =
                sqlx::QueryBuilder::new("SELECT slug, tmdb_id FROM film_mappings WHERE slug IN (");
            let mut separated = qb.separated(", ");
            for slug in chunk {
                separated.push_bind(slug);
            }
            qb.push(")");

            let rows = qb
                .build()
                .fetch_all(&self.pool)
                .await
                .context("Failed to bulk-fetch mappings")?;

            for row in rows {
                found.insert(row.get("slug"), row.get("tmdb_id"));
            }
        }

        Ok(found)
    }

    async fn upsert(&self, slug: &str, tmdb_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO film_mappings (slug, tmdb_id, resolved_at)
            VALUES (?, ?, ?)
            ON CONFLICT(slug) DO UPDATE SET
                tmdb_id = excluded.tmdb_id,
                resolved_at = excluded.resolved_at
            "#,
        )
        .bind(slug)
        .bind(tmdb_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to upsert mapping")?;

        Ok(())
    }
}

fn row_to_mapping(row: &sqlx::sqlite::SqliteRow) -> FilmMapping {
    FilmMapping {
        slug: row.get("slug"),
        tmdb_id: row.get("tmdb_id"),
        resolved_at: parse_datetime(row.get("resolved_at")),
    }
}

fn parse_datetime(s: &str) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
