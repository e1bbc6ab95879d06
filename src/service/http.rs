use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

/// Per-request timeout for scrape fetches. A timed-out page is treated like
/// any other failed fetch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Factory for the shared scraping HTTP client.
pub fn create_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("boxdlink/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}
