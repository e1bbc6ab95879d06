//! Concurrent paginated scraping of member catalogs.
//!
//! Each scrape discovers the page count from the list's index page, fans out
//! fetches for every page, parses each page independently, and flattens the
//! results in page-number order. Pages that fail to fetch are dropped; an
//! unknown member short-circuits before any page fetch.

use std::collections::HashSet;

use futures::future;
use url::Url;

use crate::domain::models::{CatalogOutcome, Collection, MemberIndex, WatchRecord};
use crate::error::{AppError, Result};
use crate::extractor::{catalog_page, member_page};
use crate::service::fetcher::PageFetcher;

pub struct MemberScraper {
    fetcher: PageFetcher,
    base_url: Url,
}

impl MemberScraper {
    pub fn new(base_url: Url) -> Self {
        Self {
            fetcher: PageFetcher::new(),
            base_url,
        }
    }

    /// Page-count discovery for one member's collection. Fetches exactly one
    /// URL; an unknown member comes back as `MemberIndex::MemberNotFound`,
    /// not an error.
    pub async fn member_index(&self, member: &str, collection: Collection) -> Result<MemberIndex> {
        let url = self.join(&collection.index_path(member))?;
        let Some(body) = self.fetcher.fetch(url).await else {
            return Err(AppError::network(format!(
                "failed to fetch list index for {member}"
            )));
        };
        Ok(member_page::page_count(&body))
    }

    /// A member's watchlist slugs, deduplicated, first-seen order kept.
    pub async fn watchlist(&self, member: &str) -> Result<CatalogOutcome<String>> {
        let index = self.member_index(member, Collection::Watchlist).await?;
        let MemberIndex::Found {
            page_count,
            display_name,
        } = index
        else {
            tracing::info!(member = %member, "member not found");
            return Ok(CatalogOutcome::MemberNotFound);
        };

        tracing::debug!(member = %member, page_count, display_name = ?display_name, "scraping watchlist");
        let bodies = self
            .collection_bodies(member, Collection::Watchlist, page_count)
            .await?;

        let mut seen = HashSet::new();
        let mut slugs = Vec::new();
        for body in &bodies {
            for slug in catalog_page::watchlist_slugs(body) {
                if seen.insert(slug.clone()) {
                    slugs.push(slug);
                }
            }
        }
        Ok(CatalogOutcome::Found(slugs))
    }

    /// A member's rated-films records in page order. Not deduplicated: a slug
    /// repeating across pages only happens in pathological site states, and
    /// downstream projection is last-seen-tolerant.
    pub async fn watched(&self, member: &str) -> Result<CatalogOutcome<WatchRecord>> {
        let index = self.member_index(member, Collection::Films).await?;
        let MemberIndex::Found {
            page_count,
            display_name,
        } = index
        else {
            tracing::info!(member = %member, "member not found");
            return Ok(CatalogOutcome::MemberNotFound);
        };

        tracing::debug!(member = %member, page_count, display_name = ?display_name, "scraping rated films");
        let bodies = self
            .collection_bodies(member, Collection::Films, page_count)
            .await?;

        let records = bodies
            .iter()
            .flat_map(|body| catalog_page::watched_records(body))
            .collect();
        Ok(CatalogOutcome::Found(records))
    }

    /// Watchlist union across members, deduplicated across the whole batch.
    /// Index lookups run in one fan-out; page pulls run concurrently per
    /// member. A member whose index cannot be read is skipped.
    pub async fn watchlist_union(&self, members: &[String]) -> Result<Vec<String>> {
        let counts = self
            .member_page_counts(members, Collection::Watchlist)
            .await?;

        let mut pulls = Vec::new();
        for (member, pages) in members.iter().zip(counts) {
            match pages {
                Some(pages) => {
                    pulls.push(self.collection_bodies(member, Collection::Watchlist, pages))
                }
                None => tracing::warn!(member = %member, "skipping member with unreadable watchlist index"),
            }
        }

        let mut seen = HashSet::new();
        let mut union = Vec::new();
        for bodies in future::join_all(pulls).await {
            for body in bodies? {
                for slug in catalog_page::watchlist_slugs(&body) {
                    if seen.insert(slug.clone()) {
                        union.push(slug);
                    }
                }
            }
        }
        Ok(union)
    }

    /// Rated-films records across members, concatenated in member order.
    pub async fn watched_union(&self, members: &[String]) -> Result<Vec<WatchRecord>> {
        let counts = self.member_page_counts(members, Collection::Films).await?;

        let mut pulls = Vec::new();
        for (member, pages) in members.iter().zip(counts) {
            match pages {
                Some(pages) => pulls.push(self.collection_bodies(member, Collection::Films, pages)),
                None => tracing::warn!(member = %member, "skipping member with unreadable films index"),
            }
        }

        let mut records = Vec::new();
        for bodies in future::join_all(pulls).await {
            for body in bodies? {
                records.extend(catalog_page::watched_records(&body));
            }
        }
        Ok(records)
    }

    /// Index page counts for many members in one concurrent fan-out. `None`
    /// marks a member whose index fetch failed or who does not exist.
    async fn member_page_counts(
        &self,
        members: &[String],
        collection: Collection,
    ) -> Result<Vec<Option<u32>>> {
        let urls = members
            .iter()
            .map(|member| self.join(&collection.index_path(member)))
            .collect::<Result<Vec<_>>>()?;
        let bodies = self.fetcher.fetch_all(urls).await;

        Ok(bodies
            .into_iter()
            .map(|body| {
                body.and_then(|html| match member_page::page_count(&html) {
                    MemberIndex::Found { page_count, .. } => Some(page_count),
                    MemberIndex::MemberNotFound => None,
                })
            })
            .collect())
    }

    /// Fetch every page of a collection; failed pages are dropped and the
    /// survivors keep page-number order.
    async fn collection_bodies(
        &self,
        member: &str,
        collection: Collection,
        page_count: u32,
    ) -> Result<Vec<String>> {
        let urls = (1..=page_count)
            .map(|page| self.join(&collection.page_path(member, page)))
            .collect::<Result<Vec<_>>>()?;
        let fetched = self.fetcher.fetch_all(urls).await;

        let dropped = fetched.iter().filter(|body| body.is_none()).count();
        if dropped > 0 {
            tracing::warn!(member = %member, dropped, "dropping pages that failed to fetch");
        }

        Ok(fetched.into_iter().flatten().collect())
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|_| AppError::InvalidUrl(format!("{}{path}", self.base_url)))
    }
}
