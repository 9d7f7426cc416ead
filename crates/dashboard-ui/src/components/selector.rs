use crate::themes::Theme;
use dashboard_core::models::{Dimension, FilterSet};
use ratatui::text::{Line, Span};

/// Label shown for an unset selector.
pub const ALL_LABEL: &str = "All";

/// Next value of a dropdown selector.
///
/// Cycles `None → options[0] → … → options[n-1] → None`. A current value that
/// is no longer among `options` restarts the cycle at the first option.
pub fn cycle_selection(current: Option<&str>, options: &[String]) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    match current {
        None => Some(options[0].clone()),
        Some(value) => match options.iter().position(|o| o == value) {
            Some(i) if i + 1 < options.len() => Some(options[i + 1].clone()),
            Some(_) => None,
            None => Some(options[0].clone()),
        },
    }
}

/// One-line summary of the three selectors, e.g.
/// `[ salesperson: All | source: Site | company: All ]`.
pub struct SelectorBar<'a> {
    pub filters: &'a FilterSet,
    pub theme: &'a Theme,
}

impl<'a> SelectorBar<'a> {
    pub fn new(filters: &'a FilterSet, theme: &'a Theme) -> Self {
        Self { filters, theme }
    }

    pub fn to_line(&self) -> Line<'a> {
        let mut spans = vec![Span::styled("[ ", self.theme.label)];
        for (i, dimension) in Dimension::ALL.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", self.theme.label));
            }
            let value = self.filters.get(dimension);
            spans.push(Span::styled(
                format!("{}: ", dimension.label().to_lowercase()),
                self.theme.label,
            ));
            spans.push(Span::styled(
                value.unwrap_or(ALL_LABEL).to_string(),
                self.theme.selector_style(value.is_some()),
            ));
        }
        spans.push(Span::styled(" ]", self.theme.label));
        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
