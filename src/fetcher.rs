use std::sync::Arc;

use log::{debug, error, info};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::listing::ListingSource;
use crate::models::property::PropertyRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// No identifier was given, nothing to show and nothing went wrong.
    Empty,
    Pending,
    Failed(String),
    Succeeded(PropertyRecord),
}

impl FetchState {
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn record(&self) -> Option<&PropertyRecord> {
        match self {
            FetchState::Succeeded(record) => Some(record),
            _ => None,
        }
    }
}

/// What subscribers see: the state of the latest fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCycle {
    pub generation: u64,
    pub identifier: Option<String>,
    pub state: FetchState,
}

// Only a missing or empty identifier means "no listing", anything else is sent as is.
fn normalize_identifier(id: Option<&str>) -> Option<String> {
    id.filter(|id| !id.is_empty()).map(str::to_string)
}

/// Loads one listing at a time.
///
/// Every call to [`PropertyFetcher::load`] opens a new cycle. A response is
/// only published if its cycle is still the latest one when it arrives, the
/// check and the write happen under the watch channel's lock, so a slow
/// response for an old identifier can never replace the newer result.
pub struct PropertyFetcher {
    source: Arc<dyn ListingSource>,
    cycle: Arc<watch::Sender<FetchCycle>>,
}

impl PropertyFetcher {
    pub fn new(source: Arc<dyn ListingSource>) -> PropertyFetcher {
        let (cycle, _) = watch::channel(FetchCycle {
            generation: 0,
            identifier: None,
            state: FetchState::Empty,
        });
        PropertyFetcher {
            source,
            cycle: Arc::new(cycle),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchCycle> {
        self.cycle.subscribe()
    }

    pub fn state(&self) -> FetchState {
        self.cycle.borrow().state.clone()
    }

    pub fn identifier(&self) -> Option<String> {
        self.cycle.borrow().identifier.clone()
    }

    /// Starts a new cycle only when `id` differs from the current identifier.
    pub fn set_identifier(&self, id: Option<&str>) -> Option<JoinHandle<()>> {
        if normalize_identifier(id) == self.identifier() && self.cycle.borrow().generation > 0 {
            return None;
        }
        self.load(id)
    }

    /// Starts a new cycle for `id`, superseding whatever is in flight.
    ///
    /// A missing or empty identifier settles to [`FetchState::Empty`] at once
    /// without touching the network and `None` is returned. Otherwise the
    /// request runs on a spawned task whose handle is returned.
    pub fn load(&self, id: Option<&str>) -> Option<JoinHandle<()>> {
        let identifier = normalize_identifier(id);

        let mut generation = 0;
        self.cycle.send_modify(|cycle| {
            cycle.generation += 1;
            cycle.identifier = identifier.clone();
            cycle.state = match identifier {
                Some(_) => FetchState::Pending,
                None => FetchState::Empty,
            };
            generation = cycle.generation;
        });

        let id = identifier?;
        let source = self.source.clone();
        let cycle = self.cycle.clone();

        Some(tokio::spawn(async move {
            let state = match source.fetch_details(&id).await {
                Ok(record) => FetchState::Succeeded(record),
                Err(e) => {
                    error!("Property fetch error for {}: {:?}", id, e);
                    FetchState::Failed(e.user_message().to_string())
                }
            };

            let published = cycle.send_if_modified(|current| {
                if current.generation != generation {
                    return false;
                }
                current.state = state;
                true
            });

            if published {
                info!("Listing {} settled", id);
            } else {
                debug!("Discarding stale response for listing {}", id);
            }
        }))
    }

    /// Waits for the latest cycle to leave `Pending` and returns its state.
    pub async fn settled(&self) -> FetchState {
        let mut receiver = self.cycle.subscribe();
        let result = receiver.wait_for(|cycle| !cycle.state.is_pending()).await;
        match result {
            Ok(cycle) => cycle.state.clone(),
            // The sender lives as long as `self`, so this is unreachable in practice.
            Err(_) => self.state(),
        }
    }
}
