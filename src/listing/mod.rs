pub mod listing_client;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::models::property::{self, PropertyRecord};

pub use listing_client::ListingClient;

/// Shown to the visitor for every failed fetch, whatever went wrong.
pub const USER_FACING_ERROR: &str = "Unable to load property details. Please try again later.";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("listing endpoint responded with {0}")]
    Status(StatusCode),

    #[error("response body is not JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("listing object could not be read: {0}")]
    Shape(#[source] serde_json::Error),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        USER_FACING_ERROR
    }
}

/// Anything that can look up a single listing by its identifier.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_details(&self, id: &str) -> Result<PropertyRecord, FetchError>;
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Turns a details response body into a record. The only requirement on the
/// body is that it is a JSON object.
pub fn decode_details(body: &[u8]) -> Result<PropertyRecord, FetchError> {
    let value: Value = serde_json::from_slice(body).map_err(FetchError::Json)?;

    match value {
        Value::Object(object) => property::from_object(object).map_err(FetchError::Shape),
        other => Err(FetchError::NotAnObject(json_kind(&other))),
    }
}
