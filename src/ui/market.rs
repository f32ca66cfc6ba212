//! Market table rendering: one row per asset, in upstream rank order.

use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Cell, Row, Table};

use super::components::placeholder_row;
use super::state::RegionContent;
use crate::format;
use crate::models::MarketEntry;

pub const NO_MARKET_DATA: &str = "No cryptocurrency data available";
pub const LOADING_MARKET: &str = "Loading market data...";

const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Length(3),
    Constraint::Min(22),
    Constraint::Length(14),
    Constraint::Length(10),
    Constraint::Length(10),
];

/// The assembled market table for one draw pass. Placeholder states collapse
/// to a single full-width column so the message is not clipped to the narrow
/// rank column.
pub fn table(content: &RegionContent<MarketEntry>) -> Table<'static> {
    match content {
        RegionContent::Ready(entries) if !entries.is_empty() => {
            Table::new(rows(content), COLUMN_WIDTHS)
                .header(header())
                .column_spacing(1)
        }
        _ => Table::new(rows(content), [Constraint::Min(1)]),
    }
}

/// Body rows. Empty data and the startup state each render exactly one
/// placeholder row.
pub fn rows(content: &RegionContent<MarketEntry>) -> Vec<Row<'static>> {
    match content {
        RegionContent::Loading => vec![placeholder_row(LOADING_MARKET)],
        RegionContent::Ready(entries) if entries.is_empty() => {
            vec![placeholder_row(NO_MARKET_DATA)]
        }
        RegionContent::Ready(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| market_row(i, entry))
            .collect(),
    }
}

fn header() -> Row<'static> {
    Row::new(vec!["#", "Asset", "Price", "24h", "Mkt Cap"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
}

fn market_row(index: usize, entry: &MarketEntry) -> Row<'static> {
    // Assets without 24h history render as a flat 0.00% gain.
    let change = entry.price_change_percentage_24h.unwrap_or(0.0);
    Row::new(vec![
        Cell::from((index + 1).to_string()),
        Cell::from(asset_label(entry)),
        Cell::from(format::usd(entry.current_price)),
        Cell::from(change_span(change)),
        Cell::from(format::market_cap(entry.market_cap)),
    ])
}

/// "Bitcoin (BTC)". The icon URL in [`MarketEntry`] has no terminal
/// representation, so the label carries name and symbol only.
pub fn asset_label(entry: &MarketEntry) -> String {
    format!("{} ({})", entry.name, entry.symbol.to_uppercase())
}

/// 24h movement: direction glyph plus the two-decimal magnitude, green for
/// gains (zero counts as a gain), red for losses.
pub fn change_span(change: f64) -> Span<'static> {
    let (glyph, color) = if change >= 0.0 {
        ("▲", Color::Green)
    } else {
        ("▼", Color::Red)
    };
    Span::styled(
        format!("{glyph} {}", format::percent(change.abs())),
        Style::default().fg(color),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, symbol: &str, change: Option<f64>) -> MarketEntry {
        MarketEntry {
            symbol: symbol.to_string(),
            name: name.to_string(),
            image: format!("https://assets.example/{symbol}.png"),
            current_price: 100.0,
            price_change_percentage_24h: change,
            market_cap: 1_000_000.0,
        }
    }

    #[test]
    fn one_row_per_entry() {
        let content = RegionContent::Ready(vec![
            entry("Bitcoin", "btc", Some(1.27)),
            entry("Ethereum", "eth", Some(-0.4)),
            entry("Tether", "usdt", None),
        ]);
        assert_eq!(rows(&content).len(), 3);
    }

    #[test]
    fn empty_and_loading_render_one_placeholder_row() {
        assert_eq!(rows(&RegionContent::Ready(Vec::new())).len(), 1);
        assert_eq!(rows(&RegionContent::Loading).len(), 1);
    }

    #[test]
    fn asset_label_uppercases_the_symbol() {
        assert_eq!(
            asset_label(&entry("Bitcoin", "btc", None)),
            "Bitcoin (BTC)"
        );
    }

    #[test]
    fn gains_point_up_and_are_green() {
        let span = change_span(1.274);
        assert_eq!(span.content, "▲ 1.27%");
        assert_eq!(span.style.fg, Some(Color::Green));
    }

    #[test]
    fn losses_point_down_with_magnitude_only() {
        let span = change_span(-3.456);
        assert_eq!(span.content, "▼ 3.46%");
        assert_eq!(span.style.fg, Some(Color::Red));
    }

    #[test]
    fn zero_change_counts_as_a_gain() {
        let span = change_span(0.0);
        assert_eq!(span.content, "▲ 0.00%");
        assert_eq!(span.style.fg, Some(Color::Green));
    }
}
