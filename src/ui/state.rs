use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::format;
use crate::models::{CalendarEvent, MarketEntry};

/// How long a notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Content of one dashboard region: the startup placeholder, or fetched data.
/// `Ready` with an empty vec renders as a "no data" row, not as loading.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionContent<T> {
    Loading,
    Ready(Vec<T>),
}

/// Updates sent from refresh tasks to the UI loop.
#[derive(Debug)]
pub enum StateUpdate {
    MarketLoaded(Vec<MarketEntry>),
    MarketFailed,
    CalendarStarted,
    CalendarLoaded(Vec<CalendarEvent>),
    CalendarFailed,
}

/// Notification severity, mirrored in the status bar styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient message shown in the status bar.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
    pub created: Instant,
}

/// Everything the draw pass reads. Mutated only from the UI loop, via
/// [`apply`](Self::apply) and [`tick`](Self::tick).
#[derive(Debug)]
pub struct DashboardState {
    pub market: RegionContent<MarketEntry>,
    pub calendar: RegionContent<CalendarEvent>,
    /// "Updated HH:MM:SS" caption for the market table, set on each
    /// successful market refresh.
    pub last_updated: Option<String>,
    pub clock: String,
    /// True between a calendar refresh starting and finishing, success or
    /// not.
    pub calendar_refreshing: bool,
    pub notifications: Vec<Notification>,
    // First market / first calendar refresh settled yet. The loaded
    // announcement fires when the second of the two lands.
    market_settled: bool,
    calendar_settled: bool,
    pub should_quit: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            market: RegionContent::Loading,
            calendar: RegionContent::Loading,
            last_updated: None,
            clock: String::new(),
            calendar_refreshing: false,
            notifications: Vec::new(),
            market_settled: false,
            calendar_settled: false,
            should_quit: false,
        }
    }

    /// Apply one update from a refresh task. `now` is injected so tests can
    /// pin the wall clock.
    pub fn apply(&mut self, update: StateUpdate, now: DateTime<Local>) {
        match update {
            StateUpdate::MarketLoaded(entries) => {
                self.settle_market();
                self.market = RegionContent::Ready(entries);
                self.last_updated = Some(format!("Updated {}", format::clock_time(now)));
                self.notify(NoticeLevel::Success, "Cryptocurrency data updated successfully");
            }
            StateUpdate::MarketFailed => {
                self.settle_market();
                self.notify(NoticeLevel::Error, "Failed to update cryptocurrency data");
            }
            StateUpdate::CalendarStarted => {
                self.calendar_refreshing = true;
            }
            StateUpdate::CalendarLoaded(events) => {
                self.settle_calendar();
                self.calendar = RegionContent::Ready(events);
                self.calendar_refreshing = false;
                self.notify(NoticeLevel::Success, "Economic calendar updated successfully");
            }
            StateUpdate::CalendarFailed => {
                self.settle_calendar();
                self.calendar_refreshing = false;
                self.notify(NoticeLevel::Error, "Failed to update economic calendar");
            }
        }
    }

    /// One-second tick: advance the clock and expire old notifications.
    pub fn tick(&mut self, now: DateTime<Local>) {
        self.clock = format::clock_time(now);
        self.prune_notifications(Instant::now());
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notifications.push(Notification {
            level,
            message: message.into(),
            created: Instant::now(),
        });
    }

    /// Drop notifications older than [`NOTIFICATION_TTL`].
    pub fn prune_notifications(&mut self, now: Instant) {
        self.notifications
            .retain(|n| now.duration_since(n.created) < NOTIFICATION_TTL);
    }

    /// The newest notification still worth showing.
    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    // The startup announcement fires once the first market and the first
    // calendar refresh have both settled, success or failure alike. It is
    // pushed before the settling update's own notice, which stays newest.
    fn settle_market(&mut self) {
        if self.market_settled {
            return;
        }
        self.market_settled = true;
        if self.calendar_settled {
            self.notify(NoticeLevel::Success, "Dashboard loaded successfully");
        }
    }

    fn settle_calendar(&mut self) {
        if self.calendar_settled {
            return;
        }
        self.calendar_settled = true;
        if self.market_settled {
            self.notify(NoticeLevel::Success, "Dashboard loaded successfully");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap()
    }

    fn bitcoin() -> MarketEntry {
        MarketEntry {
            symbol: "btc".to_string(),
            name: "Bitcoin".to_string(),
            image: "https://assets.example/btc.png".to_string(),
            current_price: 63421.5,
            price_change_percentage_24h: Some(1.27),
            market_cap: 1_248_000_000_000.0,
        }
    }

    fn has_loaded_notice(state: &DashboardState) -> bool {
        state
            .notifications
            .iter()
            .any(|n| n.message == "Dashboard loaded successfully")
    }

    #[test]
    fn market_load_replaces_content_and_stamps_caption() {
        let mut state = DashboardState::new();
        state.apply(StateUpdate::MarketLoaded(vec![bitcoin()]), noon());

        assert_eq!(state.market, RegionContent::Ready(vec![bitcoin()]));
        assert_eq!(state.last_updated.as_deref(), Some("Updated 12:00:00"));
        assert_eq!(
            state.current_notification().map(|n| n.level),
            Some(NoticeLevel::Success)
        );
    }

    #[test]
    fn market_failure_keeps_previous_content() {
        let mut state = DashboardState::new();
        state.apply(StateUpdate::MarketLoaded(vec![bitcoin()]), noon());
        let caption = state.last_updated.clone();

        state.apply(StateUpdate::MarketFailed, noon());

        assert_eq!(state.market, RegionContent::Ready(vec![bitcoin()]));
        assert_eq!(state.last_updated, caption);
        assert_eq!(
            state.current_notification().map(|n| n.level),
            Some(NoticeLevel::Error)
        );
    }

    #[test]
    fn calendar_failure_clears_refreshing_flag() {
        let mut state = DashboardState::new();
        state.apply(StateUpdate::CalendarStarted, noon());
        assert!(state.calendar_refreshing);

        state.apply(StateUpdate::CalendarFailed, noon());
        assert!(!state.calendar_refreshing);
        // Still the startup placeholder: a failure renders nothing new.
        assert_eq!(state.calendar, RegionContent::Loading);
    }

    #[test]
    fn calendar_load_clears_refreshing_flag() {
        let mut state = DashboardState::new();
        state.apply(StateUpdate::CalendarStarted, noon());
        state.apply(StateUpdate::CalendarLoaded(Vec::new()), noon());

        assert!(!state.calendar_refreshing);
        assert_eq!(state.calendar, RegionContent::Ready(Vec::new()));
    }

    #[test]
    fn loaded_notice_after_both_startup_refreshes() {
        let mut state = DashboardState::new();
        state.apply(StateUpdate::MarketLoaded(vec![bitcoin()]), noon());
        assert!(!has_loaded_notice(&state));

        // A failed startup refresh still counts as settled, and its own
        // failure notice stays the one on screen.
        state.apply(StateUpdate::CalendarFailed, noon());
        assert!(has_loaded_notice(&state));
        assert_eq!(
            state.current_notification().map(|n| n.message.as_str()),
            Some("Failed to update economic calendar")
        );

        // Later refreshes do not announce it again.
        state.notifications.clear();
        state.apply(StateUpdate::MarketLoaded(vec![bitcoin()]), noon());
        state.apply(StateUpdate::CalendarLoaded(Vec::new()), noon());
        assert!(!has_loaded_notice(&state));
    }

    #[test]
    fn repeated_market_updates_do_not_settle_the_calendar() {
        let mut state = DashboardState::new();
        state.apply(StateUpdate::MarketLoaded(vec![bitcoin()]), noon());
        state.apply(StateUpdate::MarketFailed, noon());
        state.apply(StateUpdate::MarketLoaded(vec![bitcoin()]), noon());
        assert!(!has_loaded_notice(&state));

        state.apply(StateUpdate::CalendarLoaded(Vec::new()), noon());
        assert!(has_loaded_notice(&state));
    }

    #[test]
    fn notifications_expire_after_ttl() {
        let mut state = DashboardState::new();
        state.notify(NoticeLevel::Info, "hello");
        let created = state.notifications[0].created;

        state.prune_notifications(created + Duration::from_secs(2));
        assert_eq!(state.notifications.len(), 1);

        state.prune_notifications(created + Duration::from_secs(4));
        assert!(state.notifications.is_empty());
    }
}
