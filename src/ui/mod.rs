//! Native egui view of the dashboard.

pub mod panels;
pub mod plot;
