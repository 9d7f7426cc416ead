use crate::components::selector::SelectorBar;
use crate::themes::Theme;
use dashboard_core::config::DashboardPage;
use dashboard_core::formatting::{format_metric, format_number};
use dashboard_core::models::{DateRange, FilterSet};
use dashboard_core::time_utils::format_date;
use ratatui::text::{Line, Span};

/// Decorative marks placed either side of the page title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Page header rendering six lines:
///
/// 1. Page title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Headline metric and deal count.
/// 4. Effective date range.
/// 5. Selector summary.
/// 6. An empty line.
pub struct Header<'a> {
    pub page: DashboardPage,
    pub total_amount: f64,
    pub deal_count: usize,
    pub range: Option<DateRange>,
    pub filters: &'a FilterSet,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let range_text = match self.range {
            Some(range) => format!("{} → {}", format_date(range.start), format_date(range.end)),
            None => "no data".to_string(),
        };
        let deals_word = if self.deal_count == 1 { "deal" } else { "deals" };

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_accent),
                Span::styled(
                    format!(" {} ", self.page.title().to_uppercase()),
                    self.theme.header,
                ),
                Span::styled(SPARKLES, self.theme.header_accent),
            ]),
            Line::from(Span::styled("=".repeat(60), self.theme.separator)),
            Line::from(vec![
                Span::styled("Amount: ", self.theme.label),
                Span::styled(format_metric(self.total_amount), self.theme.metric),
                Span::styled(
                    format!("  ({} {})", format_number(self.deal_count as f64, 0), deals_word),
                    self.theme.dim,
                ),
            ]),
            Line::from(vec![
                Span::styled("Date: ", self.theme.label),
                Span::styled(range_text, self.theme.value),
            ]),
            SelectorBar::new(self.filters, self.theme).to_line(),
            Line::from(""),
        ]
    }
}

/// Key hints shown at the bottom of every page.
pub fn key_hints(page: DashboardPage, theme: &Theme) -> Line<'static> {
    let mut hints = String::from(
        "1/2/3 page · s/o/c select · x clear · [ ] start · { } end · r all dates",
    );
    if page == DashboardPage::Data {
        hints.push_str(" · ↑↓ PgUp/PgDn scroll");
    }
    hints.push_str(" · q quit");
    Line::from(Span::styled(hints, theme.dim))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn header<'a>(filters: &'a FilterSet, theme: &'a Theme) -> Header<'a> {
        let day = |d| {
            NaiveDate::from_ymd_opt(2024, 1, d)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        };
        Header {
            page: DashboardPage::Overview,
            total_amount: 12_345.6,
            deal_count: 4,
            range: Some(DateRange { start: day(10), end: day(20) }),
            filters,
            theme,
        }
    }

    #[test]
    fn test_header_line_count() {
        let theme = Theme::dark();
        let filters = FilterSet::default();
        assert_eq!(header(&filters, &theme).to_lines().len(), 6);
    }

    #[test]
    fn test_header_title_uppercase() {
        let theme = Theme::dark();
        let filters = FilterSet::default();
        let lines = header(&filters, &theme).to_lines();
        let title = text(&lines[0]);
        assert!(title.contains("SALES OVERVIEW"), "got: {title}");
        assert!(title.starts_with(SPARKLES));
    }

    #[test]
    fn test_header_separator() {
        let theme = Theme::dark();
        let filters = FilterSet::default();
        let sep = text(&header(&filters, &theme).to_lines()[1]);
        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_metric_line() {
        let theme = Theme::dark();
        let filters = FilterSet::default();
        let metric = text(&header(&filters, &theme).to_lines()[2]);
        assert_eq!(metric, "Amount: $12,346  (4 deals)");
    }

    #[test]
    fn test_header_range_line() {
        let theme = Theme::dark();
        let filters = FilterSet::default();
        let range = text(&header(&filters, &theme).to_lines()[3]);
        assert_eq!(range, "Date: 2024-01-10 → 2024-01-20");
    }

    #[test]
    fn test_header_without_range() {
        let theme = Theme::dark();
        let filters = FilterSet::default();
        let mut h = header(&filters, &theme);
        h.range = None;
        h.deal_count = 1;
        let lines = h.to_lines();
        assert_eq!(text(&lines[3]), "Date: no data");
        assert!(text(&lines[2]).ends_with("(1 deal)"));
    }

    #[test]
    fn test_key_hints_scroll_only_on_data_page() {
        let theme = Theme::dark();
        let hints = |page| text(&key_hints(page, &theme));
        assert!(hints(DashboardPage::Data).contains("scroll"));
        assert!(!hints(DashboardPage::Overview).contains("scroll"));
        assert!(hints(DashboardPage::Sales).ends_with("q quit"));
    }
}
