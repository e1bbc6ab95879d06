//! Slug -> TMDB id resolution against film detail pages.

use url::Url;

use crate::error::{AppError, Result};
use crate::extractor::film_page;
use crate::service::fetcher::PageFetcher;

pub struct FilmLookup {
    fetcher: PageFetcher,
    base_url: Url,
}

impl FilmLookup {
    pub fn new(base_url: Url) -> Self {
        Self {
            fetcher: PageFetcher::new(),
            base_url,
        }
    }

    /// Resolve each slug against its film page.
    ///
    /// Output pairs stay aligned with the input: a slug whose page cannot be
    /// fetched or carries no usable id comes back with `None`. Fan-out is
    /// bounded by the fetcher's pool.
    pub async fn resolve_slugs(&self, slugs: &[String]) -> Result<Vec<(String, Option<i64>)>> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }

        let urls = slugs
            .iter()
            .map(|slug| {
                self.base_url
                    .join(&format!("film/{slug}"))
                    .map_err(|_| AppError::InvalidUrl(format!("{}film/{slug}", self.base_url)))
            })
            .collect::<Result<Vec<_>>>()?;
        let bodies = self.fetcher.fetch_all(urls).await;

        Ok(slugs
            .iter()
            .cloned()
            .zip(bodies)
            .map(|(slug, body)| {
                let tmdb_id = body.as_deref().and_then(film_page::film_tmdb_id);
                (slug, tmdb_id)
            })
            .collect())
    }
}
