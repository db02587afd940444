//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs` — categories, observations, counts, context, reports.
//! - `figure.rs` — backend-independent plot descriptions.
//! - `constants.rs` — palette, layout, placement and asset constants.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem or rendering side effects.
//!
//! ## Compatibility note
//! `RenderReport` and the types it embeds are the `--json` output schema.

pub mod constants;
pub mod figure;
pub mod models;
