//! Detail table and placeholder panels for the dashboard TUI.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per deal plus
//! a highlighted totals row at the bottom. Tables taller than their area are
//! scrolled by a row offset.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use dashboard_core::formatting;
use dashboard_core::models::DetailRow;
use dashboard_core::time_utils::format_timestamp;

use crate::themes::Theme;

/// Message shown when the current selection matches no deal.
pub const NO_DATA_MESSAGE: &str = "No data to display for the filter applied.";

const HEADERS: [&str; 6] = ["Company", "Title", "Source", "Date", "Salesperson", "Amount"];

/// Number of table rows that fit in `area` below the borders and header.
pub fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(3) as usize
}

/// Render the per-deal detail table into `area`, starting at row `offset`.
///
/// The offset is clamped so the last screen is always full and ends with the
/// totals row.
pub fn render_detail_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[DetailRow],
    offset: usize,
    theme: &Theme,
) {
    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h).style(theme.table_header)))
        .height(1);

    let mut all_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(row.company.clone()),
                Cell::from(row.title.clone().unwrap_or_default()),
                Cell::from(row.source.clone()),
                Cell::from(format_timestamp(row.date)),
                Cell::from(row.salesperson.clone()),
                Cell::from(formatting::format_currency(row.amount)),
            ])
            .style(style)
        })
        .collect();

    let total: f64 = rows.iter().map(|r| r.amount).sum();
    all_rows.push(
        Row::new(vec![
            Cell::from("TOTAL"),
            Cell::from(format!("{} deals", rows.len())),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
            Cell::from(formatting::format_currency(total)),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Min(16),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(19),
        Constraint::Length(18),
        Constraint::Length(16),
    ];

    let offset = offset.min(all_rows.len().saturating_sub(visible_rows(area)));
    let mut state = TableState::default().with_offset(offset);

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_stateful_widget(table, area, &mut state);
}

/// Placeholder panel for an empty selection.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(NO_DATA_MESSAGE, theme.warning)),
        Line::from(""),
        Line::from(Span::styled("Press 'x' to clear the selectors", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// Panel shown when the page could not be prepared from the input file.
pub fn render_error(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.error)),
        Line::from(""),
        Line::from(Span::styled(
            "Switch page with 1/2/3 or press 'q' to exit",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Error "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
