//! Data layer for the sales dashboard.
//!
//! Reads the semicolon-separated deals export, normalises amounts and
//! currencies, cleanses categories and dates, and computes the per-page
//! summaries through [`analysis::DealPipeline`].

pub mod aggregator;
pub mod analysis;
pub mod cleanser;
pub mod normalizer;
pub mod reader;
pub mod selectors;

pub use dashboard_core as core;
