//! Header renaming and amount coercion.
//!
//! Turns the loader's [`RawTable`] into a [`NormalizedTable`]: source headers
//! are mapped to canonical [`Column`]s, amounts are parsed under the
//! configured [`DecimalConvention`] and converted to the reference currency.

use std::collections::HashSet;

use dashboard_core::config::{
    CurrencyPolicy, DecimalConvention, PipelineConfig, FOREIGN_CURRENCY, FOREIGN_CURRENCY_DIVISOR,
    REFERENCE_CURRENCY,
};
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{Column, NormalizedDeal, NormalizedTable, RawTable};
use tracing::{debug, warn};

/// Columns without which no deal can be built.
const REQUIRED_COLUMNS: [Column; 4] = [
    Column::Salesperson,
    Column::Amount,
    Column::AccountCurrencyId,
    Column::Date,
];

// ── Normalizer ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    convention: DecimalConvention,
    policy: CurrencyPolicy,
}

impl Normalizer {
    pub fn new(convention: DecimalConvention, policy: CurrencyPolicy) -> Self {
        Self { convention, policy }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.decimal_convention, config.currency_policy)
    }

    /// Rename, parse and convert every row of `raw`.
    ///
    /// Headers must use the CRM export names; a table that already carries
    /// canonical names is rejected with `MissingRequiredColumn`, so output
    /// can never be converted twice. Any unparseable amount aborts the whole
    /// table.
    pub fn normalize(&self, raw: &RawTable) -> Result<NormalizedTable> {
        let mut positions: Vec<(Column, usize)> = Vec::new();
        for column in Column::ALL {
            if let Some(idx) = raw.column_index(column.source_name()) {
                positions.push((column, idx));
            }
        }

        for required in REQUIRED_COLUMNS {
            if !positions.iter().any(|(c, _)| *c == required) {
                return Err(DashboardError::MissingRequiredColumn(
                    required.source_name().to_string(),
                ));
            }
        }

        let lookup = |column: Column| positions.iter().find(|(c, _)| *c == column).map(|(_, i)| *i);
        let mut warned: HashSet<String> = HashSet::new();
        let mut rows = Vec::with_capacity(raw.len());

        for i in 0..raw.len() {
            let row = i + 1;
            let text = |column: Column| {
                lookup(column)
                    .and_then(|idx| raw.cell(i, idx))
                    .map(str::to_string)
            };

            let amount_text = text(Column::Amount);
            let amount = match amount_text.as_deref() {
                None => 0.0,
                Some(t) => parse_amount(t, self.convention).ok_or_else(|| {
                    DashboardError::MalformedAmount {
                        row,
                        value: t.to_string(),
                    }
                })?,
            };

            let currency = text(Column::AccountCurrencyId);
            let amount = self.to_reference_currency(amount, currency.as_deref(), row, &mut warned)?;

            rows.push(NormalizedDeal {
                row,
                salesperson: text(Column::Salesperson),
                source: text(Column::Source),
                company: text(Column::Company),
                date: text(Column::Date),
                amount,
                status: text(Column::Status),
                title: text(Column::Title),
                account_currency_id: currency,
            });
        }

        debug!(
            "Normalized {} rows ({} columns recognised)",
            rows.len(),
            positions.len()
        );

        Ok(NormalizedTable {
            columns: positions.into_iter().map(|(c, _)| c).collect(),
            rows,
        })
    }

    fn to_reference_currency(
        &self,
        amount: f64,
        code: Option<&str>,
        row: usize,
        warned: &mut HashSet<String>,
    ) -> Result<f64> {
        match code {
            Some(FOREIGN_CURRENCY) => Ok(amount / FOREIGN_CURRENCY_DIVISOR),
            Some(REFERENCE_CURRENCY) => Ok(amount),
            other => {
                let code = other.unwrap_or_default();
                match self.policy {
                    CurrencyPolicy::Strict => Err(DashboardError::UnsupportedCurrency {
                        row,
                        code: code.to_string(),
                    }),
                    CurrencyPolicy::PassThrough => {
                        if warned.insert(code.to_string()) {
                            warn!(
                                "Currency {:?} (first seen on row {}) is not converted",
                                code, row
                            );
                        }
                        Ok(amount)
                    }
                }
            }
        }
    }
}

// ── Amount parsing ────────────────────────────────────────────────────────────

/// Parse a locale-formatted amount.
///
/// Returns `None` when the text is not a finite number once the separators
/// have been rewritten.
pub fn parse_amount(text: &str, convention: DecimalConvention) -> Option<f64> {
    let trimmed = text.trim();
    let rewritten = match convention {
        DecimalConvention::CommaDecimal => trimmed.replace(',', "."),
        DecimalConvention::CommaThousands => trimmed.replace(',', ""),
    };
    rewritten.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
