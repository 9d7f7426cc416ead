//! Date-range and categorical selection over cleansed deals.
//!
//! Every function returns a new vector; inputs are never modified so the
//! full table stays available for recomputing summaries.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use dashboard_core::models::{DateRange, Deal, Dimension, FilterSet};

// ── Date range ────────────────────────────────────────────────────────────────

/// Fill unset bounds with the earliest / latest deal date.
///
/// Returns `None` for an empty table.
pub fn resolve_date_range(
    deals: &[Deal],
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Option<DateRange> {
    let covering = DateRange::covering(deals)?;
    Some(DateRange {
        start: start.unwrap_or(covering.start),
        end: end.unwrap_or(covering.end),
    })
}

/// Deals dated within `[start, end]`, both ends inclusive.
pub fn select_date_range(
    deals: &[Deal],
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Vec<Deal> {
    match resolve_date_range(deals, start, end) {
        Some(range) => deals
            .iter()
            .filter(|d| range.contains(d.date))
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

// ── Categorical filters ───────────────────────────────────────────────────────

/// Deals whose `dimension` field equals `value`.
pub fn apply_filter(deals: &[Deal], dimension: Dimension, value: &str) -> Vec<Deal> {
    deals
        .iter()
        .filter(|d| d.key(dimension) == value)
        .cloned()
        .collect()
}

/// Deals satisfying every selector present in `filters`.
pub fn apply_filters(deals: &[Deal], filters: &FilterSet) -> Vec<Deal> {
    deals.iter().filter(|d| filters.matches(d)).cloned().collect()
}

/// Distinct values of `dimension`, in first-seen order.
pub fn distinct_values(deals: &[Deal], dimension: Dimension) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    deals
        .iter()
        .map(|d| d.key(dimension))
        .filter(|k| seen.insert(*k))
        .map(str::to_string)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::config::UNIDENTIFIED;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn deal(salesperson: &str, source: &str, company: &str, day: u32, amount: f64) -> Deal {
        Deal {
            salesperson: salesperson.to_string(),
            source: source.to_string(),
            company: company.to_string(),
            date: ts(day, 12),
            amount,
            status: None,
            title: None,
        }
    }

    fn sample() -> Vec<Deal> {
        vec![
            deal("Alice", "Site", "GOL", 1, 100.0),
            deal("Bob", "Eventos", "Wiseup", 3, 200.0),
            deal("Alice", "Eventos", "GOL", 5, 300.0),
            deal("Carol", UNIDENTIFIED, "Wiseup", 7, 400.0),
            deal("Bob", "Site", UNIDENTIFIED, 9, 500.0),
        ]
    }

    // ── select_date_range ─────────────────────────────────────────────────────

    #[test]
    fn test_select_date_range_default_keeps_everything() {
        let deals = sample();
        assert_eq!(select_date_range(&deals, None, None).len(), deals.len());
    }

    #[test]
    fn test_select_date_range_inclusive_bounds() {
        let deals = sample();
        let selected = select_date_range(&deals, Some(ts(3, 12)), Some(ts(7, 12)));
        let days: Vec<f64> = selected.iter().map(|d| d.amount).collect();
        assert_eq!(days, vec![200.0, 300.0, 400.0]);
    }

    #[test]
    fn test_select_date_range_open_end() {
        let deals = sample();
        let selected = select_date_range(&deals, Some(ts(6, 0)), None);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_select_date_range_inverted_bounds_is_empty() {
        let deals = sample();
        assert!(select_date_range(&deals, Some(ts(9, 0)), Some(ts(1, 0))).is_empty());
    }

    #[test]
    fn test_select_date_range_empty_input() {
        assert!(resolve_date_range(&[], None, None).is_none());
        assert!(select_date_range(&[], None, None).is_empty());
    }

    #[test]
    fn test_resolve_date_range_fills_unset_bounds() {
        let deals = sample();
        let range = resolve_date_range(&deals, Some(ts(2, 0)), None).unwrap();
        assert_eq!(range.start, ts(2, 0));
        assert_eq!(range.end, ts(9, 12));
    }

    // ── apply_filters ─────────────────────────────────────────────────────────

    #[test]
    fn test_apply_filters_empty_set_is_identity() {
        let deals = sample();
        assert_eq!(apply_filters(&deals, &FilterSet::default()), deals);
    }

    #[test]
    fn test_apply_filters_conjunction() {
        let deals = sample();
        let filters = FilterSet {
            salesperson: Some("Alice".to_string()),
            source: Some("Eventos".to_string()),
            company: None,
        };
        let selected = apply_filters(&deals, &filters);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].amount, 300.0);
    }

    #[test]
    fn test_apply_filters_matches_unidentified_label() {
        let deals = sample();
        let filters = FilterSet {
            source: Some(UNIDENTIFIED.to_string()),
            ..Default::default()
        };
        let selected = apply_filters(&deals, &filters);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].salesperson, "Carol");
    }

    #[test]
    fn test_apply_filter_order_does_not_matter() {
        let deals = sample();
        let picks = [
            (Dimension::Salesperson, "Bob"),
            (Dimension::Source, "Site"),
            (Dimension::Company, UNIDENTIFIED),
        ];

        for (a_dim, a_val) in picks {
            for (b_dim, b_val) in picks {
                let ab = apply_filter(&apply_filter(&deals, a_dim, a_val), b_dim, b_val);
                let ba = apply_filter(&apply_filter(&deals, b_dim, b_val), a_dim, a_val);
                assert_eq!(ab, ba, "{a_dim:?}={a_val} vs {b_dim:?}={b_val}");
            }
        }
    }

    #[test]
    fn test_apply_filters_equals_sequential_application() {
        let deals = sample();
        let filters = FilterSet {
            salesperson: Some("Bob".to_string()),
            source: Some("Site".to_string()),
            company: Some(UNIDENTIFIED.to_string()),
        };
        let sequential = apply_filter(
            &apply_filter(
                &apply_filter(&deals, Dimension::Company, UNIDENTIFIED),
                Dimension::Salesperson,
                "Bob",
            ),
            Dimension::Source,
            "Site",
        );
        assert_eq!(apply_filters(&deals, &filters), sequential);
    }

    // ── distinct_values ───────────────────────────────────────────────────────

    #[test]
    fn test_distinct_values_first_seen_order() {
        let deals = sample();
        assert_eq!(
            distinct_values(&deals, Dimension::Salesperson),
            vec!["Alice", "Bob", "Carol"]
        );
        assert_eq!(
            distinct_values(&deals, Dimension::Source),
            vec!["Site", "Eventos", UNIDENTIFIED]
        );
    }

    #[test]
    fn test_distinct_values_empty() {
        assert!(distinct_values(&[], Dimension::Company).is_empty());
    }
}
