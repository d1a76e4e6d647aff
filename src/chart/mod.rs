//! Chart descriptions and the two builders that produce them.
//!
//! Builders are pure: a record subset goes in, a [`figure::Figure`] comes
//! out. Rendering is left to Plotly (web) or `egui_plot` (desktop).

pub mod builder;
pub mod figure;
