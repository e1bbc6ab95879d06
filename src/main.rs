use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use boxdlink::config::AppConfig;
use boxdlink::db;
use boxdlink::domain::models::CatalogOutcome;
use boxdlink::service::CatalogService;

const USAGE: &str = "usage: boxdlink <watchlist|watched|map> <member|slug...>";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = db::init_pool(&config.database_url).await?;
    let service = CatalogService::new(&config, pool);

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_default();

    match command.as_str() {
        "watchlist" => {
            let member = args.next().context(USAGE)?;
            match service.watchlist(&member).await? {
                CatalogOutcome::Found(ids) => println!("{}", serde_json::to_string(&ids)?),
                CatalogOutcome::MemberNotFound => {
                    eprintln!("member not found: {member}");
                    std::process::exit(1);
                }
            }
        }
        "watched" => {
            let member = args.next().context(USAGE)?;
            match service.watched(&member).await? {
                CatalogOutcome::Found(films) => println!("{}", serde_json::to_string(&films)?),
                CatalogOutcome::MemberNotFound => {
                    eprintln!("member not found: {member}");
                    std::process::exit(1);
                }
            }
        }
        "map" => {
            let slugs: Vec<String> = args.collect();
            let ids = service.map_slugs(&slugs).await?;
            println!("{}", serde_json::to_string(&ids)?);
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}
