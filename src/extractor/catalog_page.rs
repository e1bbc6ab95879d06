//! Parsers for member catalog grid pages (watchlist and films).
//!
//! Both lists render films as `li.griditem` entries whose slug lives on an
//! embedded `div.react-component`. Items missing the slug attribute are
//! skipped, not errors.

use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

use crate::domain::models::{Rating, WatchRecord};

fn grid_item_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("li.griditem").unwrap())
}

/// Slugs listed on one watchlist page, in display order.
pub fn watchlist_slugs(html: &str) -> Vec<String> {
    Html::parse_document(html)
        .select(grid_item_selector())
        .filter_map(|item| item_slug(&item))
        .collect()
}

/// Films listed on one ratings page, each with its star rating when present.
pub fn watched_records(html: &str) -> Vec<WatchRecord> {
    Html::parse_document(html)
        .select(grid_item_selector())
        .filter_map(|item| {
            let slug = item_slug(&item)?;
            Some(WatchRecord {
                slug,
                rating: item_rating(&item),
            })
        })
        .collect()
}

fn item_slug(item: &ElementRef) -> Option<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("div.react-component").unwrap());

    item.select(selector)
        .next()?
        .value()
        .attr("data-item-slug")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Rating from a `span.rating` marker class of the form `rated-N`.
fn item_rating(item: &ElementRef) -> Option<Rating> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("span.rating").unwrap());

    item.select(selector)
        .next()?
        .value()
        .classes()
        .find_map(|class| class.strip_prefix("rated-"))
        .and_then(|n| n.parse::<u8>().ok())
        .and_then(Rating::from_half_stars)
}
