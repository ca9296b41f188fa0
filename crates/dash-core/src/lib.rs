//! Core domain types for the healthcare dashboard.
//!
//! Records and month buckets, renderer-agnostic chart specifications, the
//! shared error type, numeric helpers, display formatting and CLI settings.

pub mod chart;
pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod stats;
