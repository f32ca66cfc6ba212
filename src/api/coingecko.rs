use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{http_client, FetchError, MarketDataSource};
use crate::models::MarketEntry;

pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// How many assets the dashboard shows, and therefore requests.
const PER_PAGE: &str = "10";

/// CoinGecko markets client. The public API needs no credential.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    markets_url: Url,
}

impl CoinGeckoClient {
    /// Client against the public API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(COINGECKO_API_BASE)
    }

    /// Client against an alternate host. Tests point this at a local mock
    /// server.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let markets_url = Url::parse_with_params(
            &format!("{}/coins/markets", base_url.trim_end_matches('/')),
            &[
                ("vs_currency", "usd"),
                ("order", "market_cap_desc"),
                ("per_page", PER_PAGE),
                ("page", "1"),
                ("sparkline", "false"),
                ("price_change_percentage", "24h"),
            ],
        )?;

        Ok(Self {
            client: http_client()?,
            markets_url,
        })
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    /// Top assets by market capitalization, in upstream rank order. Every call
    /// is a live round-trip: transport caching is disabled per request.
    async fn top_markets(&self) -> Result<Vec<MarketEntry>, FetchError> {
        let response = self
            .client
            .get(self.markets_url.clone())
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                endpoint: "coins/markets",
                status: response.status(),
            });
        }

        let entries: Vec<MarketEntry> = response.json().await?;
        debug!("fetched {} market entries", entries.len());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markets_url_carries_the_full_query() {
        let client = CoinGeckoClient::with_base_url("http://127.0.0.1:9/").unwrap();
        assert_eq!(client.markets_url.path(), "/coins/markets");
        assert_eq!(
            client.markets_url.query(),
            Some(
                "vs_currency=usd&order=market_cap_desc&per_page=10&page=1\
                 &sparkline=false&price_change_percentage=24h"
            )
        );
    }
}
