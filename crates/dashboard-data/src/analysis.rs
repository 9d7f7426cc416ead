//! Main dashboard pipeline.
//!
//! Composes normalisation, cleansing, date and categorical selection and
//! aggregation into a [`DashboardView`] ready for the UI layer.

use dashboard_core::config::{CrossFilterMode, PipelineConfig};
use dashboard_core::error::Result;
use dashboard_core::models::{
    AggregateRow, DateRange, Deal, DetailRow, Dimension, FilterSet, RawTable, ViewQuery,
};
use serde::Serialize;
use tracing::debug;

use crate::aggregator::DealAggregator;
use crate::cleanser::{detail_rows, Cleanser};
use crate::normalizer::Normalizer;
use crate::selectors::{apply_filters, distinct_values, resolve_date_range, select_date_range};

// ── Public types ──────────────────────────────────────────────────────────────

/// Grouped amounts for one dimension plus its current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionSummary {
    pub dimension: Dimension,
    pub rows: Vec<AggregateRow>,
    /// Active selector value for this dimension, if any.
    pub selected: Option<String>,
}

impl DimensionSummary {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Values offered by each selector.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectorOptions {
    pub salesperson: Vec<String>,
    pub source: Vec<String>,
    pub company: Vec<String>,
}

impl SelectorOptions {
    pub fn get(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Salesperson => &self.salesperson,
            Dimension::Source => &self.source,
            Dimension::Company => &self.company,
        }
    }
}

/// Everything one dashboard page displays for a given [`ViewQuery`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Effective date range, `None` when there is no data at all.
    pub range: Option<DateRange>,
    pub filters: FilterSet,
    /// Deals left after the date range and every selector.
    pub deal_count: usize,
    pub total_amount: f64,
    /// Salesperson, source and company summaries, in that order.
    pub summaries: Vec<DimensionSummary>,
    pub details: Vec<DetailRow>,
    pub options: SelectorOptions,
}

impl DashboardView {
    pub fn summary(&self, dimension: Dimension) -> Option<&DimensionSummary> {
        self.summaries.iter().find(|s| s.dimension == dimension)
    }

    /// `true` when the current selection matches no deal.
    pub fn is_empty(&self) -> bool {
        self.deal_count == 0
    }
}

// ── DealPipeline ──────────────────────────────────────────────────────────────

/// One configured instance of the normalise → cleanse → select → aggregate
/// pipeline.
#[derive(Debug, Clone)]
pub struct DealPipeline {
    config: PipelineConfig,
}

impl DealPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Normalise and cleanse a freshly loaded table.
    pub fn prepare(&self, raw: &RawTable) -> Result<Vec<Deal>> {
        let normalized = Normalizer::from_config(&self.config).normalize(raw)?;
        let deals = Cleanser::from_config(&self.config).cleanse(&normalized)?;
        debug!("Prepared {} deals from {} raw rows", deals.len(), raw.len());
        Ok(deals)
    }

    /// Recompute every table of the page for `query`.
    ///
    /// `deals` is the cleansed table and is left untouched; each summary
    /// restarts from the date-filtered set.
    pub fn view(&self, deals: &[Deal], query: &ViewQuery) -> DashboardView {
        let range = resolve_date_range(deals, query.start, query.end);
        let dated = select_date_range(deals, query.start, query.end);
        let filtered = apply_filters(&dated, &query.filters);

        let summaries = Dimension::ALL
            .into_iter()
            .map(|d| self.summarize(&dated, &query.filters, d))
            .collect();

        let options = SelectorOptions {
            salesperson: distinct_values(&dated, Dimension::Salesperson),
            source: distinct_values(&dated, Dimension::Source),
            company: distinct_values(&dated, Dimension::Company),
        };

        debug!(
            "View: {} dated, {} after selectors",
            dated.len(),
            filtered.len()
        );

        DashboardView {
            range,
            filters: query.filters.clone(),
            deal_count: filtered.len(),
            total_amount: DealAggregator::total(&filtered),
            summaries,
            details: detail_rows(&filtered),
            options,
        }
    }

    /// Summary for `dimension` under the configured cross-filter mode.
    pub fn summarize(
        &self,
        dated: &[Deal],
        filters: &FilterSet,
        dimension: Dimension,
    ) -> DimensionSummary {
        let effective = match self.config.cross_filter {
            CrossFilterMode::DrillDown => filters.without(dimension),
            CrossFilterMode::Conjunctive => filters.clone(),
        };
        let subset = apply_filters(dated, &effective);

        DimensionSummary {
            dimension,
            rows: DealAggregator::aggregate(&subset, dimension, self.config.rule(dimension)),
            selected: filters.get(dimension).map(str::to_string),
        }
    }
}

/// Load-free convenience: prepare `raw` and build the view in one call.
pub fn analyze_deals(
    raw: &RawTable,
    config: PipelineConfig,
    query: &ViewQuery,
) -> Result<DashboardView> {
    let pipeline = DealPipeline::new(config);
    let deals = pipeline.prepare(raw)?;
    Ok(pipeline.view(&deals, query))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
