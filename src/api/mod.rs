use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::models::{CalendarEvent, MarketEntry};

pub mod coingecko;
pub mod trading_economics;

pub use coingecko::CoinGeckoClient;
pub use trading_economics::TradingEconomicsClient;

/// Both upstreams are expected to answer well within this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "crypto-dash/0.1";

/// Error surfaced by a single fetch. There is no retry here; the next timer
/// firing is the retry.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: connect, timeout or body decode.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
}

// reqwest puts the request URL in its error text, and the calendar credential
// rides in that URL's query string. The URL is stripped when wrapping so the
// message stays loggable.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.without_url())
    }
}

/// Shared HTTP client construction for both providers.
pub(crate) fn http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
}

/// Source of ranked market entries. The live implementation is
/// [`CoinGeckoClient`]; tests substitute in-memory fakes.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn top_markets(&self) -> Result<Vec<MarketEntry>, FetchError>;
}

/// Source of upcoming calendar events. The live implementation is
/// [`TradingEconomicsClient`].
#[async_trait]
pub trait CalendarSource: Send + Sync {
    async fn calendar_events(&self) -> Result<Vec<CalendarEvent>, FetchError>;
}
