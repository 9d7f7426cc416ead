use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Every style used by the dashboard widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,
    /// Headline metric.
    pub metric: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub warning: Style,
    pub error: Style,

    // ── Bar charts ───────────────────────────────────────────────────────────
    pub bar_fill: Style,
    /// Fill for the bar matching the active selector.
    pub bar_selected: Style,
    pub bar_empty: Style,
    pub bar_label: Style,

    // ── Selectors ────────────────────────────────────────────────────────────
    pub selector_active: Style,
    pub selector_idle: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            metric: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            bar_fill: Style::default().fg(Color::Cyan),
            bar_selected: Style::default().fg(Color::Yellow),
            bar_empty: Style::default().fg(Color::DarkGray),
            bar_label: Style::default().fg(Color::Gray),

            selector_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            selector_idle: Style::default().fg(Color::Gray),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and saturated accents so that content
    /// remains legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            metric: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            bar_fill: Style::default().fg(Color::Blue),
            bar_selected: Style::default().fg(Color::Magenta),
            bar_empty: Style::default().fg(Color::Gray),
            bar_label: Style::default().fg(Color::DarkGray),

            selector_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            selector_idle: Style::default().fg(Color::DarkGray),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette and
    /// no bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),
            metric: Style::default().fg(Color::Green),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            bar_fill: Style::default().fg(Color::Green),
            bar_selected: Style::default().fg(Color::Yellow),
            bar_empty: Style::default().fg(Color::DarkGray),
            bar_label: Style::default().fg(Color::White),

            selector_active: Style::default().fg(Color::Yellow),
            selector_idle: Style::default().fg(Color::Gray),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    pub fn bar_style(&self, selected: bool) -> Style {
        if selected {
            self.bar_selected
        } else {
            self.bar_fill
        }
    }

    pub fn selector_style(&self, active: bool) -> Style {
        if active {
            self.selector_active
        } else {
            self.selector_idle
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
