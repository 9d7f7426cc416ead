use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ── Column ────────────────────────────────────────────────────────────────────

/// Canonical semantic columns of a deals table.
///
/// Each column has a fixed source header in the CRM export and a canonical
/// name used everywhere after normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Salesperson,
    Amount,
    Source,
    Company,
    Date,
    AccountCurrencyId,
    Status,
    Title,
}

impl Column {
    /// Every column, in export order.
    pub const ALL: [Column; 8] = [
        Column::Salesperson,
        Column::Amount,
        Column::Source,
        Column::Company,
        Column::Date,
        Column::AccountCurrencyId,
        Column::Status,
        Column::Title,
    ];

    /// Header used by the CRM export, e.g. `"ASSIGNED_BY_NAME"`.
    pub fn source_name(self) -> &'static str {
        match self {
            Column::Salesperson => "ASSIGNED_BY_NAME",
            Column::Amount => "OPPORTUNITY_ACCOUNT",
            Column::Source => "SOURCE_NAME",
            Column::Company => "COMPANY_NAME",
            Column::Date => "DATE_CREATE",
            Column::AccountCurrencyId => "ACCOUNT_CURRENCY_ID",
            Column::Status => "STAGE_NAME",
            Column::Title => "TITLE",
        }
    }

    /// Name used after normalisation, e.g. `"salesperson"`.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Column::Salesperson => "salesperson",
            Column::Amount => "amount",
            Column::Source => "source",
            Column::Company => "company",
            Column::Date => "date",
            Column::AccountCurrencyId => "account_currency_id",
            Column::Status => "status",
            Column::Title => "title",
        }
    }
}

// ── RawTable ──────────────────────────────────────────────────────────────────

/// Untyped table as produced by the loader.
///
/// Cells are `None` when the field was blank in the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Position of `header` in the header row.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cell at (`row`, `col`); short rows read as missing.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ── Normalised table ──────────────────────────────────────────────────────────

/// A record after renaming and amount coercion, before cleansing.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDeal {
    /// 1-based data row in the source file.
    pub row: usize,
    pub salesperson: Option<String>,
    pub source: Option<String>,
    pub company: Option<String>,
    /// Date text, parsed by the cleanser.
    pub date: Option<String>,
    /// Amount in the reference currency.
    pub amount: f64,
    pub status: Option<String>,
    pub title: Option<String>,
    /// Currency tag of the original amount.
    pub account_currency_id: Option<String>,
}

/// Output of the normaliser: typed rows plus the set of canonical columns the
/// input actually carried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    pub columns: Vec<Column>,
    pub rows: Vec<NormalizedDeal>,
}

impl NormalizedTable {
    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }
}

// ── Deal ──────────────────────────────────────────────────────────────────────

/// One cleansed CRM deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub salesperson: String,
    pub source: String,
    pub company: String,
    pub date: NaiveDateTime,
    /// Amount in the reference currency.
    pub amount: f64,
    pub status: Option<String>,
    pub title: Option<String>,
}

impl Deal {
    /// Value of the categorical field selected by `dimension`.
    pub fn key(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Salesperson => &self.salesperson,
            Dimension::Source => &self.source,
            Dimension::Company => &self.company,
        }
    }
}

// ── Dimension ─────────────────────────────────────────────────────────────────

/// Categorical fields a dashboard can filter and group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Salesperson,
    Source,
    Company,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Salesperson, Dimension::Source, Dimension::Company];

    /// Display label, e.g. `"Salesperson"`.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Salesperson => "Salesperson",
            Dimension::Source => "Source",
            Dimension::Company => "Company",
        }
    }
}

// ── FilterSet ─────────────────────────────────────────────────────────────────

/// Active categorical selections.
///
/// `None` means the selector is unset. `Some(value)` matches rows whose field
/// equals `value` exactly, including the "unidentified" label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salesperson: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl FilterSet {
    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Salesperson => self.salesperson.as_deref(),
            Dimension::Source => self.source.as_deref(),
            Dimension::Company => self.company.as_deref(),
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: Option<String>) {
        match dimension {
            Dimension::Salesperson => self.salesperson = value,
            Dimension::Source => self.source = value,
            Dimension::Company => self.company = value,
        }
    }

    /// Copy of this set with the selector for `dimension` cleared.
    pub fn without(&self, dimension: Dimension) -> FilterSet {
        let mut copy = self.clone();
        copy.set(dimension, None);
        copy
    }

    /// `true` when `deal` satisfies every present selector.
    pub fn matches(&self, deal: &Deal) -> bool {
        Dimension::ALL
            .into_iter()
            .all(|d| self.get(d).map_or(true, |v| deal.key(d) == v))
    }

    pub fn is_empty(&self) -> bool {
        Dimension::ALL.into_iter().all(|d| self.get(d).is_none())
    }
}

// ── Output rows ───────────────────────────────────────────────────────────────

/// One group of an aggregation: a distinct key and its summed amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: String,
    pub amount: f64,
}

/// Stable projection of a deal used by the tabular view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    pub company: String,
    pub title: Option<String>,
    pub source: String,
    pub date: NaiveDateTime,
    pub salesperson: String,
    pub amount: f64,
}

impl From<&Deal> for DetailRow {
    fn from(deal: &Deal) -> Self {
        DetailRow {
            company: deal.company.clone(),
            title: deal.title.clone(),
            source: deal.source.clone(),
            date: deal.date,
            salesperson: deal.salesperson.clone(),
            amount: deal.amount,
        }
    }
}

/// Selector state for one dashboard recomputation.
///
/// Unset bounds default to the earliest / latest deal date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub filters: FilterSet,
}

/// Inclusive timestamp interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts <= self.end
    }

    /// `[min(date), max(date)]` over `deals`, or `None` when empty.
    pub fn covering(deals: &[Deal]) -> Option<DateRange> {
        let start = deals.iter().map(|d| d.date).min()?;
        let end = deals.iter().map(|d| d.date).max()?;
        Some(DateRange { start, end })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
