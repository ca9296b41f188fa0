//! Reusable line-oriented widgets for the dashboard header and controls.

pub mod controls;
pub mod header;
