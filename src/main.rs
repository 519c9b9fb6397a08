use std::env;
use std::sync::Arc;

use anyhow::Result;
use log::info;

use uptown::config::{self, Config};
use uptown::logger::setup_logger;
use uptown::view::render_page;
use uptown::{ListingClient, PropertyFetcher};

const PROPERTY_ID_ENV: &str = "PROPERTY_ID";
const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    setup_logger(&env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string()))?;

    let config: Arc<Config> = Arc::new(config::read_config());

    let property_id: Option<String> = env::args()
        .nth(1)
        .or_else(|| env::var(PROPERTY_ID_ENV).ok());

    let client = ListingClient::new(&config)?;
    info!("Using listing endpoint {}", client.details_url());

    let fetcher = PropertyFetcher::new(Arc::new(client));
    fetcher.load(property_id.as_deref());

    let state = fetcher.settled().await;
    println!("{}", render_page(&state, &config));

    Ok(())
}
