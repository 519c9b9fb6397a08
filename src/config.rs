use anyhow::{Context, Result};
use dotenvy::dotenv;
use log::{error, info};
use serde::Deserialize;
use std::env;

const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

pub const DEFAULT_LISTING_API_URL: &str = "https://prop.digiheadway.in/api/v3/listing/details.php";
pub const DEFAULT_CONTACT_PHONE: &str = "919518091945";
pub const DEFAULT_CITY: &str = "Panipat";
pub const DEFAULT_BRAND_NAME: &str = "Panipat Uptown Property";
pub const DEFAULT_WHATSAPP_CHANNEL_URL: &str =
    "https://whatsapp.com/channel/0029VaQOvGSLY6d4kuuuuX3i";

/// Raw price values are in lakh, dividing by this yields crore.
pub const LAKH_PER_CRORE: f64 = 100.0;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub listing_api_url: String,
    pub request_timeout_seconds: Option<u64>,
    pub contact_phone: String,
    pub city: String,
    pub brand_name: String,
    pub whatsapp_channel_url: String,
    pub price_divisor: f64,
    pub currency_symbol: String,
    pub price_label: String,
    // Listings disagree on whether sizes are sq ft or sq yard, both labels stay configurable.
    pub size_single_unit: String,
    pub size_range_unit: String,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            listing_api_url: DEFAULT_LISTING_API_URL.to_string(),
            request_timeout_seconds: None,
            contact_phone: DEFAULT_CONTACT_PHONE.to_string(),
            city: DEFAULT_CITY.to_string(),
            brand_name: DEFAULT_BRAND_NAME.to_string(),
            whatsapp_channel_url: DEFAULT_WHATSAPP_CHANNEL_URL.to_string(),
            price_divisor: LAKH_PER_CRORE,
            currency_symbol: "₹".to_string(),
            price_label: "Cr".to_string(),
            size_single_unit: "sq ft".to_string(),
            size_range_unit: "sq yard".to_string(),
        }
    }
}

pub fn create_test_config() -> Config {
    Config {
        listing_api_url: "http://localhost:9/listing/details.php".to_string(),
        request_timeout_seconds: Some(5),
        contact_phone: "910000000000".to_string(),
        city: "Panipat".to_string(),
        brand_name: "Test Brokerage".to_string(),
        whatsapp_channel_url: "https://whatsapp.com/channel/test".to_string(),
        price_divisor: LAKH_PER_CRORE,
        currency_symbol: "₹".to_string(),
        price_label: "Cr".to_string(),
        size_single_unit: "sq ft".to_string(),
        size_range_unit: "sq yard".to_string(),
    }
}

pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).context("invalid config file")
}

fn load_config_file(config_path: &str) -> Result<Config> {
    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("failed to read {config_path}"))?;
    parse_config(&contents)
}

pub fn read_config() -> Config {
    dotenv().ok();
    match env::var(CONFIG_PATH_ENV) {
        Ok(config_path) => load_config_file(&config_path).unwrap_or_else(|err| {
            error!("failed to read config: {err:#}");
            std::process::exit(1);
        }),
        Err(_) => {
            info!("{CONFIG_PATH_ENV} not set, using default config");
            Config::default()
        }
    }
}
