//! Refresh orchestration: one fetch, one state update.
//!
//! Each refresher runs as a short-lived task and reports its outcome to the
//! UI loop as a [`StateUpdate`]. A failed refresh never touches previously
//! rendered data; the next timer firing is the only retry. Nothing here
//! guards against overlapping refreshes, the last completion wins.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::error;

use crate::api::{CalendarSource, FetchError, MarketDataSource};
use crate::cache::CalendarCache;
use crate::models::CalendarEvent;
use crate::ui::state::StateUpdate;

/// Calendar fetch path: cache first, network on a miss, write-back on
/// success.
#[derive(Clone)]
pub struct CalendarFetcher {
    source: Arc<dyn CalendarSource>,
    cache: CalendarCache,
}

impl CalendarFetcher {
    pub fn new(source: Arc<dyn CalendarSource>, cache: CalendarCache) -> Self {
        Self { source, cache }
    }

    pub async fn fetch(&self) -> Result<Vec<CalendarEvent>, FetchError> {
        if let Some(events) = self.cache.get() {
            return Ok(events);
        }
        let events = self.source.calendar_events().await?;
        self.cache.put(&events);
        Ok(events)
    }
}

/// One market refresh cycle: fetch, then report.
#[derive(Clone)]
pub struct MarketRefresher {
    source: Arc<dyn MarketDataSource>,
    updates: mpsc::Sender<StateUpdate>,
}

impl MarketRefresher {
    pub fn new(source: Arc<dyn MarketDataSource>, updates: mpsc::Sender<StateUpdate>) -> Self {
        Self { source, updates }
    }

    pub async fn run_once(&self) {
        match self.source.top_markets().await {
            Ok(entries) => {
                let _ = self.updates.send(StateUpdate::MarketLoaded(entries)).await;
            }
            Err(err) => {
                error!("market refresh failed: {err}");
                let _ = self.updates.send(StateUpdate::MarketFailed).await;
            }
        }
    }
}

/// One calendar refresh cycle, bracketed by the refreshing flag so the UI can
/// mark the region busy.
#[derive(Clone)]
pub struct CalendarRefresher {
    fetcher: CalendarFetcher,
    updates: mpsc::Sender<StateUpdate>,
}

impl CalendarRefresher {
    pub fn new(fetcher: CalendarFetcher, updates: mpsc::Sender<StateUpdate>) -> Self {
        Self { fetcher, updates }
    }

    pub async fn run_once(&self) {
        let _ = self.updates.send(StateUpdate::CalendarStarted).await;
        match self.fetcher.fetch().await {
            Ok(events) => {
                let _ = self.updates.send(StateUpdate::CalendarLoaded(events)).await;
            }
            Err(err) => {
                error!("calendar refresh failed: {err}");
                let _ = self.updates.send(StateUpdate::CalendarFailed).await;
            }
        }
    }
}
