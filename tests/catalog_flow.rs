//! End-to-end tests for the scrape -> resolve -> project pipeline against a
//! mock site and an in-memory mapping store.

use mockito::{Server, ServerGuard};
use sqlx::SqlitePool;
use url::Url;

use boxdlink::config::AppConfig;
use boxdlink::domain::models::CatalogOutcome;
use boxdlink::service::CatalogService;

/// Creates an in-memory SQLite database with migrations applied for testing.
async fn setup_pool() -> SqlitePool {
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

async fn service_for(server: &ServerGuard) -> CatalogService {
    let config = AppConfig::with_base_url(Url::parse(&server.url()).unwrap());
    CatalogService::new(&config, setup_pool().await)
}

fn index_page(pages: u32, display_name: &str) -> String {
    let links: String = if pages > 1 {
        (1..=pages)
            .map(|n| format!(r#"<li class="paginate-page"><a href="/page/{n}/">{n}</a></li>"#))
            .collect()
    } else {
        String::new()
    };
    format!(
        r#"<html><body><h1 class="title-3">{display_name}</h1><ul>{links}</ul></body></html>"#
    )
}

fn watchlist_page(slugs: &[&str]) -> String {
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

fn watched_page(items: &[(&str, Option<u8>)]) -> String {
    let items: String = items
        .iter()
        .map(|(slug, rating)| {
            let span = match rating {
                Some(n) => format!(r#"<span class="rating rated-{n}"></span>"#),
                None => String::new(),
            };
            format!(
                r#"<li class="griditem"><div class="react-component" data-item-slug="{slug}"></div>{span}</li>"#
            )
        })
        .collect();
    format!("<html><body><ul>{items}</ul></body></html>")
}

fn film_page(tmdb_id: i64) -> String {
    format!(r#"<html><body class="film" data-tmdb-id="{tmdb_id}"></body></html>"#)
}

async fn mock_film(server: &mut ServerGuard, slug: &str, tmdb_id: i64, hits: usize) -> mockito::Mock {
    server
        .mock("GET", format!("/film/{slug}").as_str())
        .with_body(film_page(tmdb_id))
        .expect(hits)
        .create_async()
        .await
}

#[tokio::test]
async fn test_watchlist_resolves_in_order_and_caches() {
    let mut server = Server::new_async().await;

    let _index = server
        .mock("GET", "/alice/watchlist/")
        .with_body(index_page(2, "Alice"))
        .expect(2)
        .create_async()
        .await;
    let _p1 = server
        .mock("GET", "/alice/watchlist/page/1/")
        .with_body(watchlist_page(&["the-godfather", "jaws"]))
        .expect(2)
        .create_async()
        .await;
    let _p2 = server
        .mock("GET", "/alice/watchlist/page/2/")
        .with_body(watchlist_page(&["alien"]))
        .expect(2)
        .create_async()
        .await;

    // Film pages must be hit exactly once: the second run resolves from the
    // store.
    let godfather = mock_film(&mut server, "the-godfather", 238, 1).await;
    let jaws = mock_film(&mut server, "jaws", 578, 1).await;
    let alien = mock_film(&mut server, "alien", 348, 1).await;

    let service = service_for(&server).await;

    let first = service.watchlist("alice").await.unwrap();
    assert_eq!(first, CatalogOutcome::Found(vec![238, 578, 348]));

    let second = service.watchlist("alice").await.unwrap();
    assert_eq!(first, second);

    godfather.assert_async().await;
    jaws.assert_async().await;
    alien.assert_async().await;
}

#[tokio::test]
async fn test_watched_projects_ratings_and_skips_unresolved() {
    let mut server = Server::new_async().await;

    let _index = server
        .mock("GET", "/bob/films/")
        .with_body(index_page(1, "Bob"))
        .create_async()
        .await;
    let _p1 = server
        .mock("GET", "/bob/films/page/1/")
        .with_body(watched_page(&[
            ("paterson", Some(8)),
            ("mystery-short", Some(4)),
            ("free-guy", None),
        ]))
        .create_async()
        .await;

    let _paterson = mock_film(&mut server, "paterson", 370755, 1).await;
    let _free_guy = mock_film(&mut server, "free-guy", 550988, 1).await;
    let _unresolvable = server
        .mock("GET", "/film/mystery-short")
        .with_status(404)
        .create_async()
        .await;

    let service = service_for(&server).await;
    let films = service.watched("bob").await.unwrap().into_items();

    // mystery-short is skipped; relative order of the rest is preserved, and
    // the unrated film carries 0.0 on the wire.
    assert_eq!(films.len(), 2);
    assert_eq!(films[0].movie_id, 370755);
    assert_eq!(films[0].rating, 4.0);
    assert_eq!(films[1].movie_id, 550988);
    assert_eq!(films[1].rating, 0.0);
}

#[tokio::test]
async fn test_map_slugs_keeps_order_and_skips_unresolvable() {
    let mut server = Server::new_async().await;

    let _a = mock_film(&mut server, "a-film", 100, 1).await;
    let _c = mock_film(&mut server, "c-film", 300, 1).await;
    let _b = server
        .mock("GET", "/film/b-film")
        .with_status(404)
        .create_async()
        .await;

    let service = service_for(&server).await;
    let slugs = vec!["a-film".to_string(), "b-film".to_string(), "c-film".to_string()];

    assert_eq!(service.map_slugs(&slugs).await.unwrap(), vec![100, 300]);
}

#[tokio::test]
async fn test_unknown_member_yields_not_found_without_page_fetches() {
    let mut server = Server::new_async().await;

    let _index = server
        .mock("GET", "/ghost/watchlist/")
        .with_body(r#"<html><body class="error"></body></html>"#)
        .create_async()
        .await;
    let page = server
        .mock("GET", "/ghost/watchlist/page/1/")
        .with_body(watchlist_page(&["never-served"]))
        .expect(0)
        .create_async()
        .await;

    let service = service_for(&server).await;

    assert_eq!(
        service.watchlist("ghost").await.unwrap(),
        CatalogOutcome::MemberNotFound
    );
    page.assert_async().await;
}

#[tokio::test]
async fn test_manual_mapping_overwrite_round_trips() {
    let server = Server::new_async().await;
    let service = service_for(&server).await;

    service.save_mapping("the-thing", 1091).await.unwrap();
    service.save_mapping("the-thing", 10342).await.unwrap();

    let mapping = service.get_mapping("the-thing").await.unwrap().unwrap();
    assert_eq!(mapping.tmdb_id, 10342);

    // A manually saved mapping is served from the store without scraping.
    assert_eq!(
        service
            .map_slugs(&["the-thing".to_string()])
            .await
            .unwrap(),
        vec![10342]
    );
}
