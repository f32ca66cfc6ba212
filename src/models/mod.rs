use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// TradingEconomics ships this public demo credential; paying users set
/// `TE_API_KEY` instead.
pub const DEFAULT_TE_API_KEY: &str = "guest:guest";

/// One asset from the CoinGecko markets endpoint.
///
/// Entries arrive already ranked by market capitalization, so the rank shown
/// in the table is just the position in the response array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEntry {
    pub symbol: String,
    pub name: String,
    /// Icon URL. Kept so cached or exported entries stay complete, even though
    /// a terminal cannot draw it.
    pub image: String,
    pub current_price: f64,
    /// CoinGecko sends `null` for assets without enough history. Rendered as a
    /// flat 0.00% gain in that case.
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: f64,
}

/// One event from the TradingEconomics calendar endpoint.
///
/// Upstream field names are PascalCase and every field can be missing; the
/// renderer substitutes fallbacks. Fields this dashboard does not display are
/// kept in `extra` so cached entries round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(rename = "Event", default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(rename = "Country", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "LastUpdate", default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// On-disk shape of the calendar cache: the captured events plus the capture
/// time in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedCalendar {
    pub timestamp: i64,
    pub data: Vec<CalendarEvent>,
}

/// Runtime configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub te_api_key: String,
    pub cache_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Ok(Config {
            te_api_key: env::var("TE_API_KEY").unwrap_or_else(|_| DEFAULT_TE_API_KEY.to_string()),
            cache_path: env::var("CALENDAR_CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("calendar_cache.json")),
        })
    }
}
