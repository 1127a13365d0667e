//! Terraform boundary: discovery, CLI invocation, and the state model.
//!
//! This module owns everything that touches the filesystem or the
//! Terraform binary:
//!
//! - [`discover`] - Find workspaces by walking a directory tree
//! - [`cli`] - Run `terraform show -json` and `terraform output -json`
//! - [`loader`] - Fill discovered workspaces with state and outputs
//! - [`types`] - Serde mirror of the state snapshot JSON
//!
//! Everything downstream of this module is pure: the analysis and report
//! layers only ever see [`discover::Workspace`] values that were loaded
//! here.

pub mod cli;
pub mod discover;
pub mod loader;
pub mod types;
