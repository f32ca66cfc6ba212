use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{http_client, CalendarSource, FetchError};
use crate::models::CalendarEvent;

pub const TRADING_ECONOMICS_API_BASE: &str = "https://api.tradingeconomics.com";

/// How many events one calendar request asks for.
const EVENT_LIMIT: &str = "10";

/// TradingEconomics calendar client. The API key travels in the query string,
/// which is why errors and logs only ever name the endpoint, never the URL.
#[derive(Debug, Clone)]
pub struct TradingEconomicsClient {
    client: Client,
    calendar_url: Url,
}

impl TradingEconomicsClient {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(TRADING_ECONOMICS_API_BASE, api_key)
    }

    /// Client against an alternate host. Tests point this at a local mock
    /// server.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self> {
        let calendar_url = Url::parse_with_params(
            &format!("{}/calendar", base_url.trim_end_matches('/')),
            &[("c", api_key), ("limit", EVENT_LIMIT)],
        )?;

        Ok(Self {
            client: http_client()?,
            calendar_url,
        })
    }
}

#[async_trait]
impl CalendarSource for TradingEconomicsClient {
    async fn calendar_events(&self) -> Result<Vec<CalendarEvent>, FetchError> {
        let response = self.client.get(self.calendar_url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                endpoint: "calendar",
                status: response.status(),
            });
        }

        let events: Vec<CalendarEvent> = response.json().await?;
        debug!("fetched {} calendar events", events.len());
        Ok(events)
    }
}
