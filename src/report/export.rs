//! JSON and CSV export.
//!
//! The JSON document is the machine-readable twin of the console report:
//! run totals plus every workspace summary, keyed by workspace name in
//! sorted order. The CSV export flattens the per-user security rows for
//! spreadsheet review.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::analysis::summary::{AnalysisTotals, RunSummary, WorkspaceSummary};

/// Top-level JSON export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// RFC 3339 timestamp of when the export was written
    pub timestamp: String,
    /// Scan root the workspaces were discovered under
    pub base_path: String,
    pub analysis_summary: AnalysisTotals,
    /// Workspace summaries keyed by name, sorted
    pub workspaces: BTreeMap<String, WorkspaceSummary>,
}

impl ExportDocument {
    pub fn from_run(run: &RunSummary) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            base_path: run.base_path.display().to_string(),
            analysis_summary: run.totals(),
            workspaces: run
                .workspaces
                .iter()
                .map(|summary| (summary.name.clone(), summary.clone()))
                .collect(),
        }
    }
}

/// Write the full analysis as pretty-printed JSON.
pub fn write_json(path: &Path, run: &RunSummary) -> Result<()> {
    let document = ExportDocument::from_run(run);
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, &document)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    Ok(())
}

/// Write one CSV row per managed user, across all workspaces in
/// discovery order.
pub fn write_user_csv(path: &Path, run: &RunSummary) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writer.write_record([
        "workspace",
        "username",
        "email",
        "enabled",
        "has_password",
        "temporary_password",
    ])?;

    for summary in &run.workspaces {
        let Some(users) = summary
            .detailed_analysis
            .as_ref()
            .and_then(|d| d.user_security.as_ref())
        else {
            continue;
        };
        for user in &users.user_details {
            writer.write_record([
                summary.name.as_str(),
                user.username.as_str(),
                user.email.as_str(),
                if user.enabled { "true" } else { "false" },
                if user.has_password { "true" } else { "false" },
                if user.temporary_password { "true" } else { "false" },
            ])?;
        }
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    Ok(())
}
