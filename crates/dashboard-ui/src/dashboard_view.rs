//! Page view for the dashboard TUI.
//!
//! Lays out the header, the three per-dimension bar charts (or the detail
//! table on the data page) and the key hints for one [`DashboardView`].

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Text,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use dashboard_core::config::DashboardPage;
use dashboard_data::analysis::{DashboardView, DimensionSummary};

use crate::components::bar_chart::AmountBarChart;
use crate::components::header::{key_hints, Header};
use crate::table_view;
use crate::themes::Theme;

/// Terminal width from which the charts sit side by side.
pub const SIDE_BY_SIDE_MIN_WIDTH: u16 = 120;

const HEADER_HEIGHT: u16 = 6;

/// Detail-table rows that fit on a page rendered into `area`.
pub fn table_capacity(area: Rect) -> usize {
    let body_height = area.height.saturating_sub(HEADER_HEIGHT + 1);
    table_view::visible_rows(Rect {
        height: body_height,
        ..area
    })
}

/// Render one full page into `area`.
///
/// `scroll` is the first detail-table row shown on the data page.
pub fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    page: DashboardPage,
    view: &DashboardView,
    scroll: usize,
    theme: &Theme,
) {
    let [header_area, body_area, hints_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

    let header = Header {
        page,
        total_amount: view.total_amount,
        deal_count: view.deal_count,
        range: view.range,
        filters: &view.filters,
        theme,
    };
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);
    frame.render_widget(Paragraph::new(key_hints(page, theme)), hints_area);

    if view.is_empty() {
        table_view::render_no_data(frame, body_area, theme);
        return;
    }

    match page {
        DashboardPage::Data => {
            table_view::render_detail_table(frame, body_area, "Deals", &view.details, scroll, theme)
        }
        DashboardPage::Sales | DashboardPage::Overview => {
            render_charts(frame, body_area, &view.summaries, theme)
        }
    }
}

/// Render one bordered bar chart per summary, splitting `area` evenly.
pub fn render_charts(frame: &mut Frame, area: Rect, summaries: &[DimensionSummary], theme: &Theme) {
    if summaries.is_empty() {
        return;
    }

    let direction = if area.width >= SIDE_BY_SIDE_MIN_WIDTH {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints(vec![Constraint::Fill(1); summaries.len()])
        .split(area);

    for (summary, chunk) in summaries.iter().zip(chunks.iter()) {
        render_chart(frame, *chunk, summary, theme);
    }
}

fn render_chart(frame: &mut Frame, area: Rect, summary: &DimensionSummary, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(format!(" Amount by {} ", summary.dimension.label()));
    let inner_width = area.width.saturating_sub(2);

    let chart = AmountBarChart::new(&summary.rows, summary.selected.as_deref(), theme)
        .with_width(inner_width);
    frame.render_widget(Paragraph::new(Text::from(chart.to_lines())).block(block), area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
