//! Shared widgets: placeholder rows, the header bar and the status bar.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Cell, Paragraph, Row},
    Frame,
};

use super::state::{Notification, NoticeLevel};

/// Single-cell row standing in for an empty or still-loading table body.
pub fn placeholder_row(text: &str) -> Row<'static> {
    Row::new(vec![
        Cell::from(text.to_string()).style(Style::default().fg(Color::DarkGray)),
    ])
}

/// Header bar: dashboard title on the left, live clock on the top-right
/// border.
pub fn render_header(f: &mut Frame, area: Rect, clock: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Crypto Dashboard",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  top assets and economic calendar",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Title::from(format!(" {clock} ")).alignment(Alignment::Right)),
    );

    f.render_widget(header, area);
}

/// Status bar: key hints, replaced by the newest notification while one is
/// live.
pub fn render_status(f: &mut Frame, area: Rect, notification: Option<&Notification>) {
    let line = match notification {
        Some(n) => Line::from(Span::styled(n.message.clone(), notice_style(n.level))),
        None => Line::from(vec![
            Span::styled("r", key_style()),
            Span::raw(" refresh market  "),
            Span::styled("e", key_style()),
            Span::raw(" refresh calendar  "),
            Span::styled("q", key_style()),
            Span::raw(" quit"),
        ]),
    };

    let status = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

/// Status bar styling by notification severity.
pub fn notice_style(level: NoticeLevel) -> Style {
    let color = match level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Error => Color::Red,
    };
    Style::default().fg(color)
}

fn key_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_style_colors() {
        assert_eq!(notice_style(NoticeLevel::Info).fg, Some(Color::Cyan));
        assert_eq!(notice_style(NoticeLevel::Success).fg, Some(Color::Green));
        assert_eq!(notice_style(NoticeLevel::Error).fg, Some(Color::Red));
    }
}
