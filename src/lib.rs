//! Risk plot generator.
//!
//! Turns a risk assessment table (observation, likelihood, impact, optional
//! risk rating) into a quadrant grid, a severity donut or a recommendations
//! scatter.

pub mod cli;
pub mod commands;
pub mod domain;
pub mod errors;
pub mod services;

pub use cli::Cli;
pub use domain::figure::{Figure, Overlays};
pub use domain::models::{
    AggregateCounts, ExposureLevel, Level, Observation, QuadrantCoordinate, RenderMode,
    RenderReport, RiskContext, Schema,
};
pub use errors::{RowIssue, RpgError};
pub use services::canvas::{FigureSink, PlottersCanvas};
pub use services::jitter::JitterPlacer;
