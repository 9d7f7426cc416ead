use crate::themes::Theme;
use dashboard_core::formatting::format_compact;
use dashboard_core::models::AggregateRow;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Visual configuration shared by every bar in a chart.
pub struct BarChartConfig {
    /// Columns reserved for the category label.
    pub label_width: u16,
    /// Columns of the longest bar.
    pub bar_width: u16,
    pub filled_char: char,
    pub empty_char: char,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            label_width: 18,
            bar_width: 40,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

// ── AmountBarChart ───────────────────────────────────────────────────────────

/// Horizontal bar chart of one aggregation, one line per group.
///
/// Bars are scaled against the largest amount in the chart and labelled with
/// a two-significant-digit compact figure.
pub struct AmountBarChart<'a> {
    pub rows: &'a [AggregateRow],
    /// Group matching the active selector, drawn with the highlight style.
    pub selected: Option<&'a str>,
    pub theme: &'a Theme,
    pub config: BarChartConfig,
}

impl<'a> AmountBarChart<'a> {
    pub fn new(rows: &'a [AggregateRow], selected: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            rows,
            selected,
            theme,
            config: BarChartConfig::default(),
        }
    }

    /// Fit the chart into `width` terminal columns.
    pub fn with_width(mut self, width: u16) -> Self {
        let label_width = (width / 3).clamp(8, 24);
        // label, one gap, bar, " 999k"
        let bar_width = width.saturating_sub(label_width + 7).max(1);
        self.config.label_width = label_width;
        self.config.bar_width = bar_width;
        self
    }

    fn max_amount(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| r.amount)
            .fold(0.0_f64, f64::max)
    }

    /// Number of filled cells for `amount`.
    pub fn filled_cells(&self, amount: f64) -> u16 {
        let max = self.max_amount();
        if max <= 0.0 || amount <= 0.0 {
            return 0;
        }
        ((amount / max) * self.config.bar_width as f64).round() as u16
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        self.rows
            .iter()
            .map(|row| {
                let filled = self.filled_cells(row.amount).min(self.config.bar_width);
                let empty = self.config.bar_width - filled;
                let is_selected = self.selected == Some(row.key.as_str());

                let filled_str: String =
                    std::iter::repeat_n(self.config.filled_char, filled as usize).collect();
                let empty_str: String =
                    std::iter::repeat_n(self.config.empty_char, empty as usize).collect();

                Line::from(vec![
                    Span::styled(
                        fit_label(&row.key, self.config.label_width as usize),
                        self.theme.selector_style(is_selected),
                    ),
                    Span::raw(" "),
                    Span::styled(filled_str, self.theme.bar_style(is_selected)),
                    Span::styled(empty_str, self.theme.bar_empty),
                    Span::styled(format!(" {}", format_compact(row.amount)), self.theme.bar_label),
                ])
            })
            .collect()
    }
}

/// Pad or truncate `text` to exactly `width` display columns.
///
/// Truncated labels end with `…`.
pub fn fit_label(text: &str, width: usize) -> String {
    if text.width() <= width {
        let mut out = text.to_string();
        out.push_str(&" ".repeat(width - text.width()));
        return out;
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width - used));
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
