//! The dashboard application: terminal lifecycle, timers, input and the draw
//! pass.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio::time::{interval, interval_at, Instant};

use super::state::{DashboardState, StateUpdate};
use super::{calendar, components, market};
use crate::api::{CoinGeckoClient, TradingEconomicsClient};
use crate::cache::CalendarCache;
use crate::models::Config;
use crate::refresh::{CalendarFetcher, CalendarRefresher, MarketRefresher};

/// Market data is re-fetched this often.
pub const MARKET_REFRESH_INTERVAL: Duration = Duration::from_secs(5);
/// Calendar data is re-fetched this often; most cycles the cache answers.
pub const CALENDAR_REFRESH_INTERVAL: Duration = Duration::from_secs(30);
const CLOCK_TICK: Duration = Duration::from_secs(1);

/// What a key press asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
    RefreshMarket,
    RefreshCalendar,
}

/// Translate a key event: `r`/`Ctrl+R` refresh the market table, `e`/`Ctrl+E`
/// the calendar; `q`, `Esc` and `Ctrl+C` quit.
pub fn action_for_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::RefreshMarket,
        KeyCode::Char('e') | KeyCode::Char('E') => Action::RefreshCalendar,
        _ => Action::None,
    }
}

/// Run the dashboard until the user quits. Builds the live clients, wires the
/// refresh pipeline and restores the terminal on the way out.
pub async fn run(config: Config) -> Result<()> {
    let market_source = Arc::new(CoinGeckoClient::new()?);
    let calendar_source = Arc::new(TradingEconomicsClient::new(&config.te_api_key)?);
    let cache = CalendarCache::new(&config.cache_path);

    let (updates_tx, updates_rx) = mpsc::channel(32);
    let market = MarketRefresher::new(market_source, updates_tx.clone());
    let calendar = CalendarRefresher::new(CalendarFetcher::new(calendar_source, cache), updates_tx);

    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, market, calendar, updates_rx).await;

    // Cleanup
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    market: MarketRefresher,
    calendar: CalendarRefresher,
    mut updates: mpsc::Receiver<StateUpdate>,
) -> Result<()> {
    let mut state = DashboardState::new();
    state.tick(Local::now());

    // Both regions start as placeholders; kick the first refreshes off in
    // parallel rather than waiting for the timers.
    spawn_market_refresh(&market);
    spawn_calendar_refresh(&calendar);

    // interval_at so the timer-driven refreshes start one period from now
    // instead of doubling up with the startup ones.
    let mut market_timer = interval_at(
        Instant::now() + MARKET_REFRESH_INTERVAL,
        MARKET_REFRESH_INTERVAL,
    );
    let mut calendar_timer = interval_at(
        Instant::now() + CALENDAR_REFRESH_INTERVAL,
        CALENDAR_REFRESH_INTERVAL,
    );
    let mut clock = interval(CLOCK_TICK);
    let mut input = EventStream::new();

    loop {
        terminal.draw(|f| draw(f, &state))?;

        tokio::select! {
            _ = market_timer.tick() => spawn_market_refresh(&market),
            _ = calendar_timer.tick() => spawn_calendar_refresh(&calendar),
            _ = clock.tick() => state.tick(Local::now()),
            update = updates.recv() => match update {
                Some(update) => state.apply(update, Local::now()),
                None => break,
            },
            event = input.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match action_for_key(key) {
                        Action::Quit => state.should_quit = true,
                        Action::RefreshMarket => spawn_market_refresh(&market),
                        Action::RefreshCalendar => spawn_calendar_refresh(&calendar),
                        Action::None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

fn spawn_market_refresh(market: &MarketRefresher) {
    let market = market.clone();
    tokio::spawn(async move { market.run_once().await });
}

fn spawn_calendar_refresh(calendar: &CalendarRefresher) {
    let calendar = calendar.clone();
    tokio::spawn(async move { calendar.run_once().await });
}

fn draw(f: &mut Frame, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header with clock
            Constraint::Min(12),    // Market table
            Constraint::Length(11), // Calendar table
            Constraint::Length(3),  // Status bar
        ])
        .split(f.area());

    components::render_header(f, chunks[0], &state.clock);
    render_market(f, chunks[1], state);
    render_calendar(f, chunks[2], state);
    components::render_status(f, chunks[3], state.current_notification());
}

fn render_market(f: &mut Frame, area: Rect, state: &DashboardState) {
    let title = match &state.last_updated {
        Some(updated) => format!("Top Cryptocurrencies ({updated})"),
        None => "Top Cryptocurrencies".to_string(),
    };
    let table = market::table(&state.market)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}

fn render_calendar(f: &mut Frame, area: Rect, state: &DashboardState) {
    let title = if state.calendar_refreshing {
        "Economic Calendar (refreshing...)"
    } else {
        "Economic Calendar"
    };
    let table = calendar::table(&state.calendar)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}
