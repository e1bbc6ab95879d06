//! Pagination and profile parsing for a member's list index page.

use scraper::{Html, Selector};
use std::sync::OnceLock;

use crate::domain::models::MemberIndex;

/// Derive the page count (and display name, when present) from a list index
/// page.
///
/// A `body` carrying the `error` class means the member does not exist on the
/// site. A page with no pagination links is a single-page list, not an error.
pub fn page_count(html: &str) -> MemberIndex {
    let document = Html::parse_document(html);

    static BODY: OnceLock<Selector> = OnceLock::new();
    let body = BODY.get_or_init(|| Selector::parse("body").unwrap());
    let unknown_member = document
        .select(body)
        .next()
        .map(|el| el.value().classes().any(|class| class == "error"))
        .unwrap_or(false);
    if unknown_member {
        return MemberIndex::MemberNotFound;
    }

    static PAGE_LINK: OnceLock<Selector> = OnceLock::new();
    let page_link = PAGE_LINK.get_or_init(|| Selector::parse("li.paginate-page a").unwrap());
    // The last pagination link holds the total; its text may carry thousands
    // separators.
    let page_count = document
        .select(page_link)
        .last()
        .map(|a| a.text().collect::<String>())
        .and_then(|text| text.trim().replace(',', "").parse::<u32>().ok())
        .unwrap_or(1)
        .max(1);

    static TITLE: OnceLock<Selector> = OnceLock::new();
    let title = TITLE.get_or_init(|| Selector::parse("h1.title-3").unwrap());
    let display_name = document
        .select(title)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty());

    MemberIndex::Found {
        page_count,
        display_name,
    }
}
