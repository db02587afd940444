//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `plot.rs` — mode selection, load → build → deliver, summary output.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate loading, placement and drawing to `services/*`.
//! - Keep behavior and output schema stable.

pub mod plot;

pub use plot::{handle_plot, run_plots, PlotRequest};
