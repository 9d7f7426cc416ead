use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{CurrencyPolicy, DashboardPage, DecimalConvention, PipelineConfig};
use crate::error::{DashboardError, Result};
use crate::models::{FilterSet, ViewQuery};
use crate::time_utils::{parse_date_bound, BoundKind};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Sales dashboard for CRM deal exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-dashboard",
    about = "Sales dashboard for CRM deal exports",
    version
)]
pub struct Settings {
    /// Semicolon-delimited deals export (bundled sample when omitted)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Dashboard page
    #[arg(long, default_value = "sales", value_parser = ["sales", "overview", "data"])]
    pub page: String,

    /// How ',' is read in amounts ("auto" follows the page)
    #[arg(long, default_value = "auto", value_parser = ["auto", "comma-decimal", "comma-thousands"])]
    pub amount_format: String,

    /// Treatment of currency codes other than BRL and USD
    #[arg(long, default_value = "pass-through", value_parser = ["pass-through", "strict"])]
    pub currency_policy: String,

    /// First day of the date range (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Last day of the date range, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Initial salesperson selection
    #[arg(long)]
    pub salesperson: Option<String>,

    /// Initial source selection
    #[arg(long)]
    pub source: Option<String>,

    /// Initial company selection
    #[arg(long)]
    pub company: Option<String>,

    /// Output mode
    #[arg(long, default_value = "tui", value_parser = ["tui", "json"])]
    pub output: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Display preferences saved to `~/.sales-dashboard/last_used.json`.
///
/// Only the page and theme are kept. The input file, amount format and
/// currency policy change how amounts are read, so they come from the
/// command line on every run.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl LastUsedParams {
    /// Default path: `~/.sales-dashboard/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// The config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".sales-dashboard").join("last_used.json")
    }

    /// Load persisted params; `Default` when the file is absent or unreadable.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to `path`, creating parent directories.
    pub fn save_to(&self, path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at `path` if it exists.
    pub fn clear_at(path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, fill the page and theme from the last run where
    /// no explicit CLI value was provided, and persist them.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit arguments and
    /// config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("could not clear {}: {}", config_path.display(), e);
            }
            return Self::apply_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        if !is_arg_explicitly_set(&matches, "page") {
            if let Some(v) = last.page {
                settings.page = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }

        settings = Self::apply_debug(settings);

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::debug!("could not persist settings: {}", e);
        }

        settings
    }

    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Selected page; unknown persisted names fall back to the sales page.
    pub fn dashboard_page(&self) -> DashboardPage {
        DashboardPage::from_name(&self.page).unwrap_or(DashboardPage::Sales)
    }

    /// Page preset with the amount-format and currency-policy overrides applied.
    pub fn pipeline_config(&self, page: DashboardPage) -> Result<PipelineConfig> {
        let mut config = PipelineConfig::for_page(page);

        if self.amount_format != "auto" {
            config.decimal_convention = DecimalConvention::from_name(&self.amount_format)
                .ok_or_else(|| {
                    DashboardError::Config(format!("unknown amount format: {}", self.amount_format))
                })?;
        }
        config.currency_policy = CurrencyPolicy::from_name(&self.currency_policy).ok_or_else(|| {
            DashboardError::Config(format!("unknown currency policy: {}", self.currency_policy))
        })?;

        Ok(config)
    }

    /// Initial selector state from `--start/--end/--salesperson/--source/--company`.
    pub fn view_query(&self) -> Result<ViewQuery> {
        let start = parse_bound(self.start.as_deref(), BoundKind::Start)?;
        let end = parse_bound(self.end.as_deref(), BoundKind::End)?;

        Ok(ViewQuery {
            start,
            end,
            filters: FilterSet {
                salesperson: self.salesperson.clone(),
                source: self.source.clone(),
                company: self.company.clone(),
            },
        })
    }
}

fn parse_bound(value: Option<&str>, kind: BoundKind) -> Result<Option<chrono::NaiveDateTime>> {
    value
        .map(|v| {
            parse_date_bound(v, kind)
                .ok_or_else(|| DashboardError::Config(format!("invalid date bound: {v}")))
        })
        .transpose()
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            page: Some(s.page.clone()),
            theme: Some(s.theme.clone()),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
