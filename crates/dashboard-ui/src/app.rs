//! Main application state and TUI event loop for the sales dashboard.
//!
//! [`App`] owns the theme, the active page and one [`PageState`] per page.
//! Each page prepares its own deal table once, then recomputes its view
//! whenever a selector or a date bound changes.

use std::cell::Cell;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing::{debug, warn};

use dashboard_core::config::{DashboardPage, PipelineConfig};
use dashboard_core::error::DashboardError;
use dashboard_core::models::{Deal, Dimension, FilterSet, RawTable, ViewQuery};
use dashboard_core::time_utils::{step_day_bound, BoundKind};
use dashboard_data::analysis::{DashboardView, DealPipeline};

use crate::components::selector::cycle_selection;
use crate::dashboard_view;
use crate::table_view;
use crate::themes::Theme;

/// Rows moved by PgUp / PgDn on the data page.
pub const PAGE_SCROLL_ROWS: usize = 10;

// ── ShutdownHandle ────────────────────────────────────────────────────────────

/// Asks a running [`App::run`] loop to stop from another thread.
///
/// The loop checks the flag between input polls, so it exits within one tick.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    requested: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn request(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}

// ── PageState ─────────────────────────────────────────────────────────────────

/// Prepared data and selector state of one dashboard page.
pub struct PageState {
    pub page: DashboardPage,
    pipeline: DealPipeline,
    /// Cleansed deals, or the message of the error that prevented it.
    deals: Result<Vec<Deal>, String>,
    pub filters: FilterSet,
    view: Option<DashboardView>,
    /// First detail-table row on screen.
    scroll: usize,
    /// Table rows that fit on screen, recorded by the last render.
    table_capacity: Cell<usize>,
}

impl PageState {
    /// Run normalisation and cleansing for `page` over `raw`.
    ///
    /// A failure is kept on the page instead of aborting the application so
    /// the other pages stay usable.
    pub fn prepare(page: DashboardPage, config: PipelineConfig, raw: &RawTable) -> Self {
        let pipeline = DealPipeline::new(config);
        let deals = pipeline.prepare(raw).map_err(|e| {
            warn!("Page {} unavailable: {}", page.name(), e);
            e.to_string()
        });
        Self {
            page,
            pipeline,
            deals,
            filters: FilterSet::default(),
            view: None,
            scroll: 0,
            table_capacity: Cell::new(0),
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.deals.as_ref().err().map(String::as_str)
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Largest offset, at which the last screen ends on the totals row.
    fn max_scroll(&self) -> usize {
        let rows = self.view.as_ref().map_or(0, |v| v.details.len() + 1);
        rows.saturating_sub(self.table_capacity.get().max(1))
    }

    /// Move the detail table by `delta` rows.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Recompute the view from the prepared deals and return to the top.
    pub fn refresh(&mut self, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) {
        self.scroll = 0;
        self.view = self.deals.as_ref().ok().map(|deals| {
            let query = ViewQuery {
                start,
                end,
                filters: self.filters.clone(),
            };
            self.pipeline.view(deals, &query)
        });
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    /// Page currently on screen.
    pub page: DashboardPage,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pages: Vec<PageState>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    shutdown: ShutdownHandle,
}

impl App {
    /// Prepare every page in `configs` from `raw`.
    ///
    /// The selectors of `query` seed every page; each page then keeps its own.
    pub fn new(
        theme_name: &str,
        page: DashboardPage,
        raw: &RawTable,
        configs: Vec<(DashboardPage, PipelineConfig)>,
        query: ViewQuery,
    ) -> Self {
        let pages = configs
            .into_iter()
            .map(|(p, config)| {
                let mut state = PageState::prepare(p, config, raw);
                state.filters = query.filters.clone();
                state.refresh(query.start, query.end);
                state
            })
            .collect();

        Self {
            theme: Theme::from_name(theme_name),
            page,
            start: query.start,
            end: query.end,
            pages,
            should_quit: false,
            shutdown: ShutdownHandle::default(),
        }
    }

    /// Handle that stops [`App::run`] from outside the event loop.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    pub fn page_state(&self, page: DashboardPage) -> Option<&PageState> {
        self.pages.iter().find(|p| p.page == page)
    }

    pub fn current(&self) -> Option<&PageState> {
        self.page_state(self.page)
    }

    fn current_mut(&mut self) -> Option<&mut PageState> {
        let page = self.page;
        self.pages.iter_mut().find(|p| p.page == page)
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press.
    ///
    /// | Key           | Action                              |
    /// |---------------|-------------------------------------|
    /// | `1` `2` `3`   | sales / overview / data page        |
    /// | `s` `o` `c`   | cycle salesperson / source / company |
    /// | `x`           | clear the selectors of this page    |
    /// | `[` `]`       | start date one day back / forward   |
    /// | `{` `}`       | end date one day back / forward     |
    /// | `r`           | drop both date bounds               |
    /// | `↑` `↓` `PgUp` `PgDn` `Home` `End` | scroll the data table |
    /// | `q`, `Ctrl+C` | quit                                |
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('1') => self.switch_page(DashboardPage::Sales),
            KeyCode::Char('2') => self.switch_page(DashboardPage::Overview),
            KeyCode::Char('3') => self.switch_page(DashboardPage::Data),
            KeyCode::Char('s') => self.cycle_selector(Dimension::Salesperson),
            KeyCode::Char('o') => self.cycle_selector(Dimension::Source),
            KeyCode::Char('c') => self.cycle_selector(Dimension::Company),
            KeyCode::Char('x') => self.clear_selectors(),
            KeyCode::Char('[') => self.step_date_bound(BoundKind::Start, -1),
            KeyCode::Char(']') => self.step_date_bound(BoundKind::Start, 1),
            KeyCode::Char('{') => self.step_date_bound(BoundKind::End, -1),
            KeyCode::Char('}') => self.step_date_bound(BoundKind::End, 1),
            KeyCode::Char('r') => self.reset_date_range(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_table(|s| s.scroll_by(-1)),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_table(|s| s.scroll_by(1)),
            KeyCode::PageUp => self.scroll_table(|s| s.scroll_by(-(PAGE_SCROLL_ROWS as isize))),
            KeyCode::PageDown => self.scroll_table(|s| s.scroll_by(PAGE_SCROLL_ROWS as isize)),
            KeyCode::Home => self.scroll_table(PageState::scroll_to_top),
            KeyCode::End => self.scroll_table(PageState::scroll_to_end),
            _ => {}
        }
    }

    pub fn switch_page(&mut self, page: DashboardPage) {
        if self.page_state(page).is_some() {
            debug!("Switching to page {}", page.name());
            self.page = page;
        }
    }

    /// Advance the `dimension` selector of the current page to its next option.
    pub fn cycle_selector(&mut self, dimension: Dimension) {
        let (start, end) = (self.start, self.end);
        let Some(state) = self.current_mut() else {
            return;
        };
        let Some(view) = state.view() else {
            return;
        };

        let next = cycle_selection(state.filters.get(dimension), view.options.get(dimension));
        debug!("Selector {} -> {:?}", dimension.label(), next);
        state.filters.set(dimension, next);
        state.refresh(start, end);
    }

    pub fn clear_selectors(&mut self) {
        let (start, end) = (self.start, self.end);
        if let Some(state) = self.current_mut() {
            state.filters = FilterSet::default();
            state.refresh(start, end);
        }
    }

    /// Move one date bound by `days`, shared by every page.
    ///
    /// An unset bound starts from the edge of the current page's data. A step
    /// that would put the start after the end is ignored.
    pub fn step_date_bound(&mut self, kind: BoundKind, days: i64) {
        let data_range = self.current().and_then(|s| s.view()).and_then(|v| v.range);
        let current = match kind {
            BoundKind::Start => self.start.or(data_range.map(|r| r.start)),
            BoundKind::End => self.end.or(data_range.map(|r| r.end)),
        };
        let Some(next) = current.and_then(|ts| step_day_bound(ts, days, kind)) else {
            return;
        };

        let crosses = match kind {
            BoundKind::Start => self.end.is_some_and(|end| next > end),
            BoundKind::End => self.start.is_some_and(|start| next < start),
        };
        if crosses {
            debug!("Ignoring {:?} bound step past the other bound", kind);
            return;
        }

        match kind {
            BoundKind::Start => self.start = Some(next),
            BoundKind::End => self.end = Some(next),
        }
        debug!("Date range -> {:?} .. {:?}", self.start, self.end);
        self.refresh_all();
    }

    pub fn reset_date_range(&mut self) {
        self.start = None;
        self.end = None;
        self.refresh_all();
    }

    fn refresh_all(&mut self) {
        let (start, end) = (self.start, self.end);
        for state in &mut self.pages {
            state.refresh(start, end);
        }
    }

    fn scroll_table(&mut self, action: impl FnOnce(&mut PageState)) {
        if self.page != DashboardPage::Data {
            return;
        }
        if let Some(state) = self.current_mut() {
            action(state);
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard until `q` / `Ctrl+C` or until the
    /// [`ShutdownHandle`] is triggered.
    ///
    /// Blocks the calling thread. Uses `crossterm::event::poll` with a 250 ms
    /// timeout so the loop stays responsive to resizes and shutdown requests.
    pub fn run(mut self) -> dashboard_core::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self
            .event_loop(&mut terminal)
            .map_err(|e| DashboardError::Terminal(e.to_string()));

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let tick_rate = Duration::from_millis(250);

        while !self.should_quit && !self.shutdown.is_requested() {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    /// Render the current page into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match self.current() {
            Some(state) => match (state.view(), state.error()) {
                (Some(view), _) => {
                    state.table_capacity.set(dashboard_view::table_capacity(area));
                    dashboard_view::render_dashboard(
                        frame,
                        area,
                        state.page,
                        view,
                        state.scroll(),
                        &self.theme,
                    )
                }
                (None, Some(message)) => {
                    table_view::render_error(frame, area, message, &self.theme)
                }
                (None, None) => table_view::render_no_data(frame, area, &self.theme),
            },
            None => table_view::render_no_data(frame, area, &self.theme),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::time_utils::parse_date_bound;
    use dashboard_data::reader::read_raw_table;
    use ratatui::backend::TestBackend;

    const CSV: &str = "TITLE;ASSIGNED_BY_NAME;OPPORTUNITY_ACCOUNT;ACCOUNT_CURRENCY_ID;SOURCE_NAME;COMPANY_NAME;DATE_CREATE;STAGE_NAME\n\
        D1;Alice;1000;USD;Site;GOL;2024-01-10 09:00:00,000000;Negócio Fechado\n\
        D2;Bob;2500;BRL;Eventos;Wiseup;2024-01-12 09:00:00,000000;Negócio Fechado\n\
        D3;Alice;300;USD;Eventos;Wiseup;2024-01-15 09:00:00,000000;Em Andamento\n";

    fn all_pages() -> Vec<(DashboardPage, PipelineConfig)> {
        DashboardPage::ALL
            .into_iter()
            .map(|p| (p, PipelineConfig::for_page(p)))
            .collect()
    }

    fn make_app(page: DashboardPage) -> App {
        let raw = read_raw_table(CSV.as_bytes()).unwrap();
        App::new("dark", page, &raw, all_pages(), ViewQuery::default())
    }

    fn press(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    // ── App::new ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_creation_defaults() {
        let app = make_app(DashboardPage::Sales);
        assert_eq!(app.page, DashboardPage::Sales);
        assert!(!app.should_quit);
        for page in DashboardPage::ALL {
            let state = app.page_state(page).unwrap();
            assert!(state.error().is_none());
            assert!(state.view().is_some());
        }
    }

    #[test]
    fn test_pages_prepare_independently() {
        let app = make_app(DashboardPage::Sales);
        // The sales page keeps open deals, the overview drops them.
        let sales = app.page_state(DashboardPage::Sales).unwrap().view().unwrap();
        let overview = app.page_state(DashboardPage::Overview).unwrap().view().unwrap();
        assert_eq!(sales.deal_count, 3);
        assert_eq!(overview.deal_count, 2);
    }

    #[test]
    fn test_app_seeds_selectors_from_query() {
        let raw = read_raw_table(CSV.as_bytes()).unwrap();
        let query = ViewQuery {
            filters: FilterSet {
                salesperson: Some("Bob".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let app = App::new("dark", DashboardPage::Overview, &raw, all_pages(), query);
        let view = app.current().unwrap().view().unwrap();
        assert_eq!(view.deal_count, 1);
        assert!((view.total_amount - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_page_error_is_kept_on_page() {
        let raw = read_raw_table(
            "ASSIGNED_BY_NAME;OPPORTUNITY_ACCOUNT;ACCOUNT_CURRENCY_ID;SOURCE_NAME;COMPANY_NAME;DATE_CREATE\n\
             Alice;1;USD;Site;GOL;2024-01-10 09:00:00,000000\n"
                .as_bytes(),
        )
        .unwrap();
        let app = App::new("dark", DashboardPage::Overview, &raw, all_pages(), ViewQuery::default());

        let overview = app.page_state(DashboardPage::Overview).unwrap();
        assert_eq!(overview.error(), Some("Missing required column: status"));
        assert!(overview.view().is_none());
        assert!(app.page_state(DashboardPage::Sales).unwrap().view().is_some());
    }

    // ── handle_key ────────────────────────────────────────────────────────────

    #[test]
    fn test_quit_keys() {
        let mut app = make_app(DashboardPage::Sales);
        press(&mut app, 'q');
        assert!(app.should_quit);

        let mut app = make_app(DashboardPage::Sales);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_page_switch_keys() {
        let mut app = make_app(DashboardPage::Sales);
        press(&mut app, '2');
        assert_eq!(app.page, DashboardPage::Overview);
        press(&mut app, '3');
        assert_eq!(app.page, DashboardPage::Data);
        press(&mut app, '1');
        assert_eq!(app.page, DashboardPage::Sales);
    }

    #[test]
    fn test_switch_to_missing_page_is_ignored() {
        let raw = read_raw_table(CSV.as_bytes()).unwrap();
        let configs = vec![(DashboardPage::Sales, PipelineConfig::sales())];
        let mut app = App::new("dark", DashboardPage::Sales, &raw, configs, ViewQuery::default());
        press(&mut app, '3');
        assert_eq!(app.page, DashboardPage::Sales);
    }

    #[test]
    fn test_cycle_selector_updates_view() {
        let mut app = make_app(DashboardPage::Overview);

        press(&mut app, 's');
        let state = app.current().unwrap();
        assert_eq!(state.filters.salesperson.as_deref(), Some("Alice"));
        assert_eq!(state.view().unwrap().deal_count, 1);

        press(&mut app, 's');
        assert_eq!(app.current().unwrap().filters.salesperson.as_deref(), Some("Bob"));

        press(&mut app, 's');
        let state = app.current().unwrap();
        assert!(state.filters.salesperson.is_none());
        assert_eq!(state.view().unwrap().deal_count, 2);
    }

    #[test]
    fn test_selectors_are_per_page() {
        let mut app = make_app(DashboardPage::Overview);
        press(&mut app, 'c');
        press(&mut app, '1');
        assert!(app.current().unwrap().filters.is_empty());
        assert!(!app
            .page_state(DashboardPage::Overview)
            .unwrap()
            .filters
            .is_empty());
    }

    #[test]
    fn test_clear_selectors() {
        let mut app = make_app(DashboardPage::Overview);
        press(&mut app, 'o');
        press(&mut app, 'c');
        press(&mut app, 'x');
        let state = app.current().unwrap();
        assert!(state.filters.is_empty());
        assert_eq!(state.view().unwrap().deal_count, 2);
    }

    #[test]
    fn test_shutdown_handle_is_shared() {
        let app = make_app(DashboardPage::Sales);
        let handle = app.shutdown_handle();
        assert!(!app.shutdown_handle().is_requested());
        handle.request();
        assert!(app.shutdown_handle().is_requested());
    }

    // ── Date bounds ───────────────────────────────────────────────────────────

    fn code(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn deal_count(app: &App, page: DashboardPage) -> usize {
        app.page_state(page).unwrap().view().unwrap().deal_count
    }

    #[test]
    fn test_step_start_date_refreshes_every_page() {
        let mut app = make_app(DashboardPage::Sales);

        press(&mut app, ']');
        assert_eq!(
            app.start,
            parse_date_bound("2024-01-11", BoundKind::Start)
        );
        assert_eq!(deal_count(&app, DashboardPage::Sales), 2);
        assert_eq!(deal_count(&app, DashboardPage::Overview), 1);

        press(&mut app, '[');
        assert_eq!(deal_count(&app, DashboardPage::Sales), 3);
    }

    #[test]
    fn test_step_end_date_starts_from_data_edge() {
        let mut app = make_app(DashboardPage::Sales);

        press(&mut app, '{');
        assert_eq!(app.end, parse_date_bound("2024-01-14", BoundKind::End));
        assert_eq!(deal_count(&app, DashboardPage::Sales), 2);

        press(&mut app, 'r');
        assert!(app.start.is_none() && app.end.is_none());
        assert_eq!(deal_count(&app, DashboardPage::Sales), 3);
    }

    #[test]
    fn test_step_date_bound_cannot_cross() {
        let raw = read_raw_table(CSV.as_bytes()).unwrap();
        let query = ViewQuery {
            start: parse_date_bound("2024-01-12", BoundKind::Start),
            end: parse_date_bound("2024-01-12", BoundKind::End),
            ..Default::default()
        };
        let mut app = App::new("dark", DashboardPage::Sales, &raw, all_pages(), query);

        press(&mut app, ']');
        press(&mut app, '{');
        assert_eq!(app.start, parse_date_bound("2024-01-12", BoundKind::Start));
        assert_eq!(app.end, parse_date_bound("2024-01-12", BoundKind::End));
        assert_eq!(deal_count(&app, DashboardPage::Sales), 1);
    }

    // ── Scrolling ─────────────────────────────────────────────────────────────

    fn many_deals_app(count: usize) -> App {
        let mut csv = String::from(
            "TITLE;ASSIGNED_BY_NAME;OPPORTUNITY_ACCOUNT;ACCOUNT_CURRENCY_ID;SOURCE_NAME;COMPANY_NAME;DATE_CREATE;STAGE_NAME\n",
        );
        for i in 1..=count {
            csv.push_str(&format!(
                "D{i:02};Alice;{};USD;Site;GOL;2024-01-10 09:00:00,000000;Negócio Fechado\n",
                i * 10
            ));
        }
        let raw = read_raw_table(csv.as_bytes()).unwrap();
        App::new("dark", DashboardPage::Data, &raw, all_pages(), ViewQuery::default())
    }

    fn scroll(app: &App) -> usize {
        app.current().unwrap().scroll()
    }

    #[test]
    fn test_scroll_keys_on_data_page() {
        let mut app = many_deals_app(25);

        code(&mut app, KeyCode::Down);
        code(&mut app, KeyCode::Down);
        assert_eq!(scroll(&app), 2);
        code(&mut app, KeyCode::Up);
        assert_eq!(scroll(&app), 1);
        code(&mut app, KeyCode::PageDown);
        assert_eq!(scroll(&app), 1 + PAGE_SCROLL_ROWS);
        code(&mut app, KeyCode::End);
        assert_eq!(scroll(&app), 25);
        code(&mut app, KeyCode::PageDown);
        assert_eq!(scroll(&app), 25);
        code(&mut app, KeyCode::Home);
        assert_eq!(scroll(&app), 0);
        code(&mut app, KeyCode::PageUp);
        assert_eq!(scroll(&app), 0);
    }

    #[test]
    fn test_scroll_ignored_outside_data_page() {
        let mut app = many_deals_app(25);
        press(&mut app, '2');
        code(&mut app, KeyCode::End);
        assert_eq!(scroll(&app), 0);
    }

    #[test]
    fn test_selector_change_resets_scroll() {
        let mut app = many_deals_app(25);
        code(&mut app, KeyCode::End);
        press(&mut app, 's');
        assert_eq!(scroll(&app), 0);
    }

    #[test]
    fn test_render_data_page_after_end_shows_total() {
        let mut app = many_deals_app(40);
        let mut terminal = Terminal::new(TestBackend::new(130, 24)).unwrap();
        let text = |terminal: &Terminal<TestBackend>| -> String {
            terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .map(|c| c.symbol())
                .collect()
        };

        terminal.draw(|frame| app.render(frame)).unwrap();
        assert!(!text(&terminal).contains("TOTAL"));

        code(&mut app, KeyCode::End);
        terminal.draw(|frame| app.render(frame)).unwrap();
        assert!(text(&terminal).contains("TOTAL"));

        // 41 rows with 14 on screen: the last full screen starts at 27.
        assert_eq!(scroll(&app), 27);
        code(&mut app, KeyCode::Up);
        assert_eq!(scroll(&app), 26);
        terminal.draw(|frame| app.render(frame)).unwrap();
        assert!(!text(&terminal).contains("TOTAL"));
    }

    // ── render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_every_page_does_not_panic() {
        let mut app = make_app(DashboardPage::Sales);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        for key in ['1', '2', '3'] {
            press(&mut app, key);
            terminal.draw(|frame| app.render(frame)).unwrap();
        }
    }
}
