//! Terminal UI layer for the healthcare dashboard.
//!
//! Provides themes, the header and control components, chart widgets, the
//! single-page dashboard layout, and the main application event loop built
//! on top of [`ratatui`].

pub mod app;
pub mod charts;
pub mod components;
pub mod dashboard_view;
pub mod themes;

pub use dash_core as core;
