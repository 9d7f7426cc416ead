//! Terminal UI layer for the sales dashboard.
//!
//! Provides themes, the header, selector and bar-chart components, the page
//! and table views, and the application event loop built on top of
//! [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod table_view;
pub mod themes;

pub use dashboard_core as core;
