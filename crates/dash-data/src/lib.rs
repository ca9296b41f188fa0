//! Data layer for the healthcare dashboard.
//!
//! Loads the CSV dataset once, derives the immutable [`dataset::Dataset`] and
//! its summary figures, and provides the aggregation primitives and the five
//! figure functions that turn a selection into chart specifications.

pub mod aggregator;
pub mod dataset;
pub mod figures;
pub mod reader;

pub use dash_core as core;
