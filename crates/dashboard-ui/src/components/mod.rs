//! Reusable line-level widgets composed by the page views.

pub mod bar_chart;
pub mod header;
pub mod selector;
