use std::time::Duration;

use async_trait::async_trait;
use log::info;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use super::{decode_details, FetchError, ListingSource};
use crate::config::Config;
use crate::models::property::PropertyRecord;

#[derive(Debug, Clone)]
pub struct ListingClient {
    client: reqwest::Client,
    details_url: String,
}

impl ListingClient {
    pub fn new(config: &Config) -> Result<ListingClient, FetchError> {
        let mut headers: HeaderMap = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(ListingClient {
            client: builder.build()?,
            details_url: config.listing_api_url.clone(),
        })
    }

    pub fn details_url(&self) -> &str {
        &self.details_url
    }
}

#[async_trait]
impl ListingSource for ListingClient {
    async fn fetch_details(&self, id: &str) -> Result<PropertyRecord, FetchError> {
        info!("Fetching listing details for {}", id);

        let params: Vec<(&str, &str)> = vec![("id", id)];
        let response: reqwest::Response = self
            .client
            .get(&self.details_url)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.bytes().await?;
        decode_details(&body)
    }
}
