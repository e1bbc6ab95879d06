//! Concurrent page fetching.
//!
//! One `fetch_all` call issues every URL through a bounded pool and returns
//! results position-correlated with the input: the slot for a page that could
//! not be fetched is `None`, and a single failure never disturbs sibling
//! fetches. No retries.

use futures::stream::{self, StreamExt};
use reqwest::Client;
use url::Url;

use crate::service::http::create_client;

/// Upper bound on in-flight requests for one `fetch_all` call.
const CONCURRENT_FETCHES: usize = 50;

pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        Self {
            client: create_client().expect("Failed to create HTTP client"),
        }
    }

    /// Fetch a single page, absorbing any failure into `None`.
    pub async fn fetch(&self, url: Url) -> Option<String> {
        fetch_page(self.client.clone(), url).await
    }

    /// Fetch all URLs concurrently; the output order matches the input order,
    /// not completion order.
    pub async fn fetch_all(&self, urls: Vec<Url>) -> Vec<Option<String>> {
        stream::iter(urls)
            .map(|url| {
                let client = self.client.clone();
                async move { fetch_page(client, url).await }
            })
            .buffered(CONCURRENT_FETCHES)
            .collect()
            .await
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

async fn fetch_page(client: Client, url: Url) -> Option<String> {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "fetch failed");
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::debug!(url = %url, status = %response.status(), "non-success response");
        return None;
    }

    match response.text().await {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "failed to read response body");
            None
        }
    }
}
