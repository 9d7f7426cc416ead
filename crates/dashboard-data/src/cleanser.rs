//! Status restriction and null filling.

use dashboard_core::config::PipelineConfig;
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{Column, Deal, DetailRow, NormalizedTable};
use dashboard_core::time_utils::parse_deal_timestamp;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Cleanser {
    closed_status: Option<String>,
    unidentified: String,
}

impl Cleanser {
    pub fn new(closed_status: Option<String>, unidentified: impl Into<String>) -> Self {
        Self {
            closed_status,
            unidentified: unidentified.into(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.closed_status.clone(), config.unidentified_label.clone())
    }

    /// Keep closed deals only, fill missing categories, parse dates.
    ///
    /// Rows with another status are dropped silently. Dates are parsed only
    /// for the rows that survive; one malformed date aborts the table.
    pub fn cleanse(&self, table: &NormalizedTable) -> Result<Vec<Deal>> {
        let mut required = vec![Column::Source, Column::Company];
        if self.closed_status.is_some() {
            required.insert(0, Column::Status);
        }
        if let Some(missing) = required.into_iter().find(|c| !table.has_column(*c)) {
            return Err(DashboardError::MissingRequiredColumn(
                missing.canonical_name().to_string(),
            ));
        }

        let fill = |value: &Option<String>| {
            value
                .clone()
                .unwrap_or_else(|| self.unidentified.clone())
        };

        let mut deals = Vec::new();
        for row in &table.rows {
            if let Some(closed) = &self.closed_status {
                if row.status.as_deref() != Some(closed.as_str()) {
                    continue;
                }
            }

            let date_text = row.date.as_deref().unwrap_or_default();
            let date = parse_deal_timestamp(date_text).ok_or_else(|| {
                DashboardError::MalformedTimestamp {
                    row: row.row,
                    value: date_text.to_string(),
                }
            })?;

            deals.push(Deal {
                salesperson: fill(&row.salesperson),
                source: fill(&row.source),
                company: fill(&row.company),
                date,
                amount: row.amount,
                status: row.status.clone(),
                title: row.title.clone(),
            });
        }

        debug!(
            "Cleansed {} of {} rows",
            deals.len(),
            table.rows.len()
        );
        Ok(deals)
    }
}

/// Tabular projection, largest amount first.
pub fn detail_rows(deals: &[Deal]) -> Vec<DetailRow> {
    let mut rows: Vec<DetailRow> = deals.iter().map(DetailRow::from).collect();
    rows.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    rows
}

// ── Tests ─────────────────────────────────────────────────────────────────────
