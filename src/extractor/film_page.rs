//! Film detail page parsing.

use scraper::{Html, Selector};
use std::sync::OnceLock;

/// TMDB id embedded on a film's detail page.
///
/// Returns `None` when the document is not a film page or the id attribute is
/// missing or unusable; the caller treats that slug as unresolved.
pub fn film_tmdb_id(html: &str) -> Option<i64> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("body.film").unwrap());

    Html::parse_document(html)
        .select(selector)
        .next()?
        .value()
        .attr("data-tmdb-id")
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
}
