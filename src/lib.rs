pub mod config;
pub mod fetcher;
pub mod formatter;
pub mod links;
pub mod listing;
pub mod logger;
pub mod models;
pub mod view;

pub use fetcher::{FetchState, PropertyFetcher};
pub use formatter::{format_price, format_size, Formatter};
pub use listing::{FetchError, ListingClient, ListingSource};
pub use models::property::PropertyRecord;
