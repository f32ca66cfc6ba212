//! Calendar table rendering.

use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Cell, Row, Table};

use super::components::placeholder_row;
use super::state::RegionContent;
use crate::format;
use crate::models::CalendarEvent;

pub const NO_EVENTS: &str = "No economic events available";
pub const LOADING_CALENDAR: &str = "Loading calendar...";

/// At most this many events are rendered, however many arrive.
pub const MAX_ROWS: usize = 8;

const COLUMN_WIDTHS: [Constraint; 4] = [
    Constraint::Min(24),
    Constraint::Length(16),
    Constraint::Length(20),
    Constraint::Length(9),
];

/// The assembled calendar table for one draw pass. Placeholder states collapse
/// to a single full-width column, as in [`market`](super::market).
pub fn table(content: &RegionContent<CalendarEvent>) -> Table<'static> {
    match content {
        RegionContent::Ready(events) if !events.is_empty() => {
            Table::new(rows(content), COLUMN_WIDTHS)
                .header(header())
                .column_spacing(1)
        }
        _ => Table::new(rows(content), [Constraint::Min(1)]),
    }
}

/// Body rows: the first [`MAX_ROWS`] events in arrival order, or a single
/// placeholder row.
pub fn rows(content: &RegionContent<CalendarEvent>) -> Vec<Row<'static>> {
    match content {
        RegionContent::Loading => vec![placeholder_row(LOADING_CALENDAR)],
        RegionContent::Ready(events) if events.is_empty() => vec![placeholder_row(NO_EVENTS)],
        RegionContent::Ready(events) => visible(events)
            .iter()
            .map(|event| Row::new(cells(event).map(Cell::from)))
            .collect(),
    }
}

/// The slice of events that actually fits on the dashboard.
pub fn visible(events: &[CalendarEvent]) -> &[CalendarEvent] {
    &events[..events.len().min(MAX_ROWS)]
}

/// Cell texts for one event row, fallbacks applied. Upstream sends empty
/// strings as well as missing fields; both get the fallback.
pub fn cells(event: &CalendarEvent) -> [String; 4] {
    [
        or_fallback(&event.event, "Economic Event"),
        or_fallback(&event.country, "Global"),
        event.date.clone().unwrap_or_default(),
        format::local_time_or_dash(event.last_update.as_deref()),
    ]
}

fn or_fallback(value: &Option<String>, fallback: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

fn header() -> Row<'static> {
    Row::new(vec!["Event", "Country", "Date", "Time"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> CalendarEvent {
        CalendarEvent {
            event: Some(title.to_string()),
            country: Some("United States".to_string()),
            date: Some("2026-08-26T12:30:00".to_string()),
            last_update: Some("2026-08-25T15:02:11".to_string()),
            extra: serde_json::Map::new(),
        }
    }

    fn bare() -> CalendarEvent {
        CalendarEvent {
            event: None,
            country: None,
            date: None,
            last_update: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn caps_at_eight_rows_keeping_arrival_order() {
        let events: Vec<_> = (0..10).map(|i| titled(&format!("Event {i}"))).collect();

        let shown = visible(&events);
        assert_eq!(shown.len(), 8);
        assert_eq!(shown[0].event.as_deref(), Some("Event 0"));
        assert_eq!(shown[7].event.as_deref(), Some("Event 7"));

        assert_eq!(rows(&RegionContent::Ready(events)).len(), 8);
    }

    #[test]
    fn fewer_events_all_show() {
        let events = vec![titled("A"), titled("B")];
        assert_eq!(visible(&events).len(), 2);
        assert_eq!(rows(&RegionContent::Ready(events)).len(), 2);
    }

    #[test]
    fn empty_and_loading_render_one_placeholder_row() {
        assert_eq!(rows(&RegionContent::Ready(Vec::new())).len(), 1);
        assert_eq!(rows(&RegionContent::Loading).len(), 1);
    }

    #[test]
    fn missing_fields_get_fallbacks() {
        assert_eq!(
            cells(&bare()),
            [
                "Economic Event".to_string(),
                "Global".to_string(),
                String::new(),
                "-".to_string(),
            ]
        );
    }

    #[test]
    fn empty_strings_get_fallbacks_too() {
        let mut event = bare();
        event.event = Some(String::new());
        event.country = Some(String::new());

        let cells = cells(&event);
        assert_eq!(cells[0], "Economic Event");
        assert_eq!(cells[1], "Global");
    }

    #[test]
    fn populated_event_renders_verbatim_with_local_update_time() {
        let cells = cells(&titled("CPI YoY"));
        assert_eq!(cells[0], "CPI YoY");
        assert_eq!(cells[1], "United States");
        // The raw upstream date string, uninterpreted.
        assert_eq!(cells[2], "2026-08-26T12:30:00");
        assert_eq!(cells[3], "15:02:11");
    }
}
