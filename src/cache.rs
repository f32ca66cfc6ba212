//! Single-key TTL store for calendar events, backed by one JSON file.
//!
//! Storage problems never reach callers: a cache that cannot be read or
//! written behaves exactly like a cache miss, and the dashboard falls back to
//! the network.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{CachedCalendar, CalendarEvent};

/// Cached entries at or past this age count as absent.
pub const CALENDAR_TTL_MS: i64 = 5 * 60 * 1000;

/// Cache read or write failure. Logged and absorbed inside the cache.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cache I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("cache entry is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The calendar cache. One path, one entry.
#[derive(Debug, Clone)]
pub struct CalendarCache {
    path: PathBuf,
}

impl CalendarCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored events, if present and younger than [`CALENDAR_TTL_MS`].
    pub fn get(&self) -> Option<Vec<CalendarEvent>> {
        self.get_at(Utc::now())
    }

    /// Clock-injected variant of [`get`](Self::get).
    pub fn get_at(&self, now: DateTime<Utc>) -> Option<Vec<CalendarEvent>> {
        let entry = match self.read_entry() {
            Ok(entry) => entry?,
            Err(err) => {
                warn!("ignoring unreadable calendar cache: {err}");
                return None;
            }
        };

        let age_ms = now.timestamp_millis().saturating_sub(entry.timestamp);
        if age_ms >= CALENDAR_TTL_MS {
            debug!("calendar cache expired ({age_ms}ms old)");
            return None;
        }
        Some(entry.data)
    }

    /// Store `events` stamped with the current time, replacing any previous
    /// entry.
    pub fn put(&self, events: &[CalendarEvent]) {
        self.put_at(events, Utc::now());
    }

    /// Clock-injected variant of [`put`](Self::put).
    pub fn put_at(&self, events: &[CalendarEvent], now: DateTime<Utc>) {
        let entry = CachedCalendar {
            timestamp: now.timestamp_millis(),
            data: events.to_vec(),
        };
        if let Err(err) = self.write_entry(&entry) {
            warn!("failed to write calendar cache: {err}");
        }
    }

    fn read_entry(&self) -> Result<Option<CachedCalendar>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write_entry(&self, entry: &CachedCalendar) -> Result<(), StorageError> {
        fs::write(&self.path, serde_json::to_string(entry)?)?;
        Ok(())
    }
}
