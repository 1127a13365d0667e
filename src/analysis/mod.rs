//! Analysis engine: classification, security summaries, aggregation.
//!
//! Pure functions from loaded workspace data to summary records:
//!
//! - [`classify`] - Ordered substring classification into Keycloak categories
//! - [`security`] - User security analysis and per-category detail rows
//! - [`summary`] - Per-workspace summaries and run-level totals
//!
//! Nothing in this module touches the filesystem or runs a process.

pub mod classify;
pub mod security;
pub mod summary;
