//! Pipeline configuration and the per-page presets.
//!
//! The three dashboard pages share one pipeline and differ only in the
//! values held by [`PipelineConfig`].

use serde::{Deserialize, Serialize};

use crate::models::Dimension;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Stage label of a won deal in the CRM export.
pub const CLOSED_STATUS: &str = "Negócio Fechado";

/// Placeholder substituted for missing categorical values.
pub const UNIDENTIFIED: &str = "Não Identificado";

/// Currency tag that gets converted.
pub const FOREIGN_CURRENCY: &str = "BRL";

/// Currency every amount is expressed in after normalisation.
pub const REFERENCE_CURRENCY: &str = "USD";

/// Fixed divisor applied to amounts tagged [`FOREIGN_CURRENCY`].
pub const FOREIGN_CURRENCY_DIVISOR: f64 = 5.0;

/// Source channels shown on the sales page.
pub const SOURCE_ALLOW_LIST: &[&str] = &[
    "Whatsapp",
    "Cliente Existente",
    "Telefone",
    "Eventos",
    "Site",
    "Formulário de CRM",
    "Whatsapp - Atendimento Demo Bitrix24",
];

/// Companies shown on the sales page.
pub const COMPANY_ALLOW_LIST: &[&str] = &[
    "Wiseup",
    "GOL",
    "Distribuidora X",
    "Uol LTDA",
    "Pessoal Teste",
];

/// Number of companies kept by the overview page.
pub const OVERVIEW_TOP_COMPANIES: usize = 5;

// ── DecimalConvention ─────────────────────────────────────────────────────────

/// How `,` is interpreted inside an amount cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecimalConvention {
    /// `"1000,50"` → `1000.5`.
    CommaDecimal,
    /// `"1,000.50"` → `1000.5`.
    CommaThousands,
}

impl DecimalConvention {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "comma-decimal" => Some(Self::CommaDecimal),
            "comma-thousands" => Some(Self::CommaThousands),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CommaDecimal => "comma-decimal",
            Self::CommaThousands => "comma-thousands",
        }
    }
}

// ── CurrencyPolicy ────────────────────────────────────────────────────────────

/// Treatment of currency tags other than the foreign and reference codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurrencyPolicy {
    /// Keep the amount unconverted and log a warning.
    #[default]
    PassThrough,
    /// Abort with `UnsupportedCurrency`.
    Strict,
}

impl CurrencyPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pass-through" => Some(Self::PassThrough),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::PassThrough => "pass-through",
            Self::Strict => "strict",
        }
    }
}

// ── Aggregation rules ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Post-sort restriction applied to grouped rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupRestriction {
    #[default]
    None,
    /// Keep only the listed keys, preserving sort order.
    AllowList(Vec<String>),
    /// Keep the `n` largest groups, preserving sort order.
    Largest(usize),
}

impl GroupRestriction {
    pub fn allow_list(keys: &[&str]) -> Self {
        Self::AllowList(keys.iter().map(|k| k.to_string()).collect())
    }
}

/// How one dimension is grouped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationRule {
    pub sort: SortDirection,
    pub restriction: GroupRestriction,
}

impl AggregationRule {
    pub fn sorted(sort: SortDirection) -> Self {
        Self {
            sort,
            restriction: GroupRestriction::None,
        }
    }

    pub fn with_restriction(mut self, restriction: GroupRestriction) -> Self {
        self.restriction = restriction;
        self
    }
}

/// How per-dimension summaries react to the active selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossFilterMode {
    /// Summary for D uses the selectors on the other dimensions only.
    DrillDown,
    /// Summary for D uses every selector, D's own included.
    Conjunctive,
}

// ── DashboardPage ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardPage {
    Sales,
    Overview,
    Data,
}

impl DashboardPage {
    pub const ALL: [DashboardPage; 3] = [
        DashboardPage::Sales,
        DashboardPage::Overview,
        DashboardPage::Data,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sales" => Some(Self::Sales),
            "overview" => Some(Self::Overview),
            "data" => Some(Self::Data),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Overview => "overview",
            Self::Data => "data",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Sales => "Amount Dashboard",
            Self::Overview => "Sales Overview",
            Self::Data => "Data",
        }
    }
}

// ── PipelineConfig ────────────────────────────────────────────────────────────

/// Every knob on which the dashboard pages differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub decimal_convention: DecimalConvention,
    pub currency_policy: CurrencyPolicy,
    /// Rows with any other status are dropped. `None` keeps every row and
    /// does not require a status column.
    pub closed_status: Option<String>,
    pub unidentified_label: String,
    pub salesperson: AggregationRule,
    pub source: AggregationRule,
    pub company: AggregationRule,
    pub cross_filter: CrossFilterMode,
}

impl PipelineConfig {
    /// Sales page: comma-decimal amounts, every status, fixed allow-lists,
    /// drill-down summaries.
    pub fn sales() -> Self {
        Self {
            decimal_convention: DecimalConvention::CommaDecimal,
            currency_policy: CurrencyPolicy::PassThrough,
            closed_status: None,
            unidentified_label: UNIDENTIFIED.to_string(),
            salesperson: AggregationRule::sorted(SortDirection::Descending),
            source: AggregationRule::sorted(SortDirection::Ascending)
                .with_restriction(GroupRestriction::allow_list(SOURCE_ALLOW_LIST)),
            company: AggregationRule::sorted(SortDirection::Ascending)
                .with_restriction(GroupRestriction::allow_list(COMPANY_ALLOW_LIST)),
            cross_filter: CrossFilterMode::DrillDown,
        }
    }

    /// Overview page: comma-thousands amounts, closed deals only, the five
    /// largest companies, summaries filtered by every selector.
    pub fn overview() -> Self {
        Self {
            decimal_convention: DecimalConvention::CommaThousands,
            currency_policy: CurrencyPolicy::PassThrough,
            closed_status: Some(CLOSED_STATUS.to_string()),
            unidentified_label: UNIDENTIFIED.to_string(),
            salesperson: AggregationRule::sorted(SortDirection::Descending),
            source: AggregationRule::sorted(SortDirection::Ascending),
            company: AggregationRule::sorted(SortDirection::Ascending)
                .with_restriction(GroupRestriction::Largest(OVERVIEW_TOP_COMPANIES)),
            cross_filter: CrossFilterMode::Conjunctive,
        }
    }

    /// Data page: same cleansing as the overview, no group restriction.
    pub fn data() -> Self {
        Self {
            company: AggregationRule::sorted(SortDirection::Ascending),
            ..Self::overview()
        }
    }

    pub fn for_page(page: DashboardPage) -> Self {
        match page {
            DashboardPage::Sales => Self::sales(),
            DashboardPage::Overview => Self::overview(),
            DashboardPage::Data => Self::data(),
        }
    }

    pub fn rule(&self, dimension: Dimension) -> &AggregationRule {
        match dimension {
            Dimension::Salesperson => &self.salesperson,
            Dimension::Source => &self.source,
            Dimension::Company => &self.company,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
