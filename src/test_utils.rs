//! Shared fixtures for unit tests.

pub mod fixtures {
    use sqlx::SqlitePool;

    /// Creates an in-memory SQLite database with migrations applied.
    pub async fn memory_pool() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        pool
    }

    /// One watchlist grid page listing the given slugs.
    pub fn watchlist_page(slugs: &[&str]) -> String {
        let items: String = slugs
            .iter()
            .map(|slug| {
                format!(
                    r#"<li class="griditem"><div class="react-component" data-item-slug="{slug}"></div></li>"#
                )
            })
            .collect();
        format!("<html><body><ul>{items}</ul></body></html>")
    }

    /// One ratings grid page; `None` renders an item without a rating marker.
    pub fn watched_page(items: &[(&str, Option<u8>)]) -> String {
        let items: String = items
            .iter()
            .map(|(slug, rating)| {
                let rating_span = match rating {
                    Some(n) => format!(r#"<span class="rating rated-{n}"></span>"#),
                    None => String::new(),
                };
                format!(
                    r#"<li class="griditem"><div class="react-component" data-item-slug="{slug}"></div>{rating_span}</li>"#
                )
            })
            .collect();
        format!("<html><body><ul>{items}</ul></body></html>")
    }

    /// A member's list index page with the given number of pagination links.
    pub fn index_page(pages: u32, display_name: &str) -> String {
        let links: String = if pages > 1 {
            (1..=pages)
                .map(|n| format!(r#"<li class="paginate-page"><a href="/page/{n}/">{n}</a></li>"#))
                .collect()
        } else {
            String::new()
        };
        format!(
            r#"<html><body>
                <section class="profile-header"><h1 class="title-3">{display_name}</h1></section>
                <ul>{links}</ul>
            </body></html>"#
        )
    }

    /// The index page served for a member that does not exist.
    pub fn error_page() -> String {
        r#"<html><body class="error"><h1>Sorry, we can't find the page"#.to_string()
            + r#"</h1></body></html>"#
    }

    /// A film detail page embedding its TMDB id.
    pub fn film_page(tmdb_id: i64) -> String {
        format!(r#"<html><body class="film" data-tmdb-id="{tmdb_id}"><h1>Film</h1></body></html>"#)
    }

    /// A film detail page with no usable TMDB id.
    pub fn film_page_without_id() -> String {
        r#"<html><body class="film"><h1>Film</h1></body></html>"#.to_string()
    }
}
