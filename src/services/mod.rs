//! Service layer containing the plotting logic and its side-effect helpers.
//!
//! ## Service map
//! - `loader.rs` — CSV rows → typed observations, all-rows validation.
//! - `quadrant.rs` — (likelihood, impact) → fixed quadrant center.
//! - `jitter.rs` — seedable stepped placement inside a quadrant cell.
//! - `severity.rs` — rating tally and dominant exposure level.
//! - `figure.rs` — render profiles and backend-independent figures.
//! - `assets.rs` — background image search and decoding.
//! - `canvas.rs` — `FigureSink` seam and the plotters backend.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects (file reads, drawing, spawning a viewer) stay in `loader`,
//!   `assets` and `canvas`.
//! - Keep command handlers thin; delegate to services.

pub mod assets;
pub mod canvas;
pub mod figure;
pub mod jitter;
pub mod loader;
pub mod output;
pub mod quadrant;
pub mod severity;
