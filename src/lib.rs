//! # Keycloak Terraform Audit
//!
//! Command-line auditor for Terraform-managed Keycloak infrastructure.
//!
//! ## Overview
//!
//! This crate scans a directory tree for Terraform workspaces, reads their
//! state through the Terraform CLI (`terraform show -json` and
//! `terraform output -json`), and classifies every managed resource into
//! Keycloak identity categories (realms, users, clients, roles, identity
//! providers, and so on). On top of the classification it derives a user
//! security report: which users carry an initial password, which of those
//! passwords are temporary, and which accounts are disabled.
//!
//! Results are rendered as console tables, with a plain-text fallback for
//! non-interactive sessions, and can be exported as JSON or CSV for further
//! processing.
//!
//! ## Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`terraform`] - Workspace discovery, Terraform CLI invocation, state model
//! - [`analysis`] - Resource classification and security summaries
//! - [`report`] - Console renderers and JSON/CSV exporters
//! - [`utils`] - Shared utilities (number formatting, progress reporting)
//!
//! ## Example Usage
//!
//! ```bash
//! # Overview table for every workspace under the current directory
//! keycloak-tf-audit
//!
//! # Scan a specific tree and drill into user security
//! keycloak-tf-audit --path ~/infrastructure/keycloak --filter users
//!
//! # Full per-workspace walk plus a JSON export
//! keycloak-tf-audit -p ./envs --detailed --export audit.json
//!
//! # CSV of every managed user for spreadsheet review
//! keycloak-tf-audit -p ./envs --export-csv users.csv
//! ```
//!
//! ## Exit Codes
//!
//! The process exits non-zero when no Terraform workspaces are found under
//! the scan path, so the binary can gate CI pipelines.
//!
//! ## Installation
//!
//! ```bash
//! cargo install keycloak-tf-audit
//! ```

pub mod analysis;
pub mod report;
pub mod terraform;
pub mod utils;
