//! Terraform workspace discovery.
//!
//! Walks a directory tree and records every directory that directly
//! contains Terraform configuration (any `.tf` file). Discovery only looks
//! at the filesystem; no Terraform command runs until the loader is asked
//! to read a workspace's state.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::terraform::types::StateResource;

/// Display name used when the scan root itself is a workspace.
pub const ROOT_WORKSPACE_NAME: &str = "root";

/// Local state file that marks a workspace as loadable.
const STATE_FILE: &str = "terraform.tfstate";

/// A discovered Terraform workspace.
///
/// `resources` and `outputs` start empty; the loader fills them in for
/// workspaces that have local state.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Absolute directory of the workspace
    pub path: PathBuf,
    /// Path relative to the scan root, or [`ROOT_WORKSPACE_NAME`]
    pub name: String,
    /// Whether `terraform.tfstate` exists next to the configuration
    pub has_local_state: bool,
    /// Root module resources, populated by the loader
    pub resources: Vec<StateResource>,
    /// Workspace outputs as printed by `terraform output -json`
    pub outputs: BTreeMap<String, serde_json::Value>,
}

/// Recursively discover Terraform workspaces under `base_path`.
///
/// Directories are visited in sorted order so repeated scans of the same
/// tree produce the same workspace list. Unreadable directories are
/// skipped rather than aborting the walk.
pub fn discover_workspaces(base_path: &Path) -> Vec<Workspace> {
    let mut workspaces = Vec::new();

    for entry in WalkDir::new(base_path).follow_links(false).sort_by_file_name() {
        let Ok(entry) = entry else { continue };
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        if !holds_terraform_config(dir) {
            continue;
        }

        workspaces.push(Workspace {
            path: dir.to_path_buf(),
            name: workspace_name(base_path, dir),
            has_local_state: dir.join(STATE_FILE).exists(),
            resources: Vec::new(),
            outputs: BTreeMap::new(),
        });
    }

    workspaces
}

/// A directory is a workspace when it directly contains a `.tf` file.
/// Subdirectories do not count; they are visited on their own.
fn holds_terraform_config(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };

    for entry in entries.flatten() {
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let file_name = entry.file_name();
        if Path::new(&file_name)
            .extension()
            .is_some_and(|ext| ext == "tf")
        {
            return true;
        }
    }

    false
}

/// Workspace display name: the path relative to the scan root, or the
/// root sentinel when the scan root is itself a workspace.
fn workspace_name(base: &Path, dir: &Path) -> String {
    match dir.strip_prefix(base) {
        Ok(rel) if rel.as_os_str().is_empty() => ROOT_WORKSPACE_NAME.to_string(),
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(_) => dir.to_string_lossy().into_owned(),
    }
}
