//! Utility functions and helpers.
//!
//! This module provides common functionality used across the renderers and
//! the workspace loader:
//!
//! - [`format`] - Number and text formatting for table output
//! - [`progress`] - Progress tracking and display utilities
//!
//! # Examples
//!
//! ## Formatting counts
//!
//! ```
//! use keycloak_tf_audit::utils::format::format_number;
//!
//! assert_eq!(format_number(1234), "1,234");
//! ```

pub mod format;
pub mod progress;
