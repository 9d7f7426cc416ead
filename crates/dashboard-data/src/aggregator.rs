//! Group-and-rank aggregation of deal amounts.

use std::collections::BTreeMap;

use dashboard_core::config::{AggregationRule, GroupRestriction, SortDirection};
use dashboard_core::models::{AggregateRow, Deal, Dimension};

// ── DealAggregator ────────────────────────────────────────────────────────────

/// Stateless helper that groups deals by a categorical dimension.
pub struct DealAggregator;

impl DealAggregator {
    /// One row per distinct key with the summed amount, keys ascending.
    pub fn group_sum(deals: &[Deal], dimension: Dimension) -> Vec<AggregateRow> {
        let mut map: BTreeMap<&str, f64> = BTreeMap::new();
        for deal in deals {
            *map.entry(deal.key(dimension)).or_insert(0.0) += deal.amount;
        }
        map.into_iter()
            .map(|(key, amount)| AggregateRow {
                key: key.to_string(),
                amount,
            })
            .collect()
    }

    /// Group, sort by amount and restrict per `rule`.
    ///
    /// Equal amounts keep key order. An empty input yields an empty result.
    pub fn aggregate(
        deals: &[Deal],
        dimension: Dimension,
        rule: &AggregationRule,
    ) -> Vec<AggregateRow> {
        let mut rows = Self::group_sum(deals, dimension);
        match rule.sort {
            SortDirection::Ascending => rows.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
            SortDirection::Descending => rows.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
        }

        match &rule.restriction {
            GroupRestriction::None => rows,
            GroupRestriction::AllowList(keys) => rows
                .into_iter()
                .filter(|r| keys.iter().any(|k| *k == r.key))
                .collect(),
            GroupRestriction::Largest(n) => {
                let n = (*n).min(rows.len());
                match rule.sort {
                    SortDirection::Ascending => rows.split_off(rows.len() - n),
                    SortDirection::Descending => {
                        rows.truncate(n);
                        rows
                    }
                }
            }
        }
    }

    /// Sum of all deal amounts.
    pub fn total(deals: &[Deal]) -> f64 {
        deals.iter().map(|d| d.amount).sum()
    }

    /// Sum of all aggregate rows.
    pub fn calculate_totals(rows: &[AggregateRow]) -> f64 {
        rows.iter().map(|r| r.amount).sum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
