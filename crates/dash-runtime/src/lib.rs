//! Runtime layer for the healthcare dashboard.
//!
//! Holds the control state, binds controls to the figures that read them,
//! and runs figure rendering in a background tokio task.

pub mod controls;
pub mod dispatcher;
pub mod orchestrator;

pub use dash_core as core;
pub use dash_data as data;
