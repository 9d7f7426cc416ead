//! Shared domain types for the sales dashboard.
//!
//! Holds the deal and table models, the per-page pipeline configuration,
//! CLI settings, the error taxonomy and the timestamp / number formatting
//! helpers used by the data and UI crates.

pub mod config;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{DashboardError, Result};
