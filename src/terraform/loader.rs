//! Workspace state loading.
//!
//! Loads resources and outputs into discovered workspaces, one at a time.
//! A workspace without local state is skipped without ever invoking
//! Terraform. A workspace whose state cannot be read stays in the run with
//! empty resources; the failure is reported and the loader moves on.

use crate::terraform::cli::{TerraformCli, TerraformError};
use crate::terraform::discover::Workspace;
use crate::utils::progress::ProgressBar;

/// Load state and outputs for a single workspace.
///
/// Returns `Ok(true)` when state was read, `Ok(false)` when the workspace
/// has no local state to read. Failures to collect outputs are not fatal;
/// the workspace just ends up with an empty output map.
pub fn load_workspace_state(
    cli: &TerraformCli,
    workspace: &mut Workspace,
) -> Result<bool, TerraformError> {
    if !workspace.has_local_state {
        return Ok(false);
    }

    let snapshot = cli.show_state(&workspace.path)?;
    workspace.resources = snapshot.root_resources();
    workspace.outputs = cli.outputs(&workspace.path).unwrap_or_default();

    Ok(true)
}

/// Load every workspace in place, reporting progress on stderr.
///
/// Returns the number of workspaces whose state was actually read.
pub fn load_all(cli: &TerraformCli, workspaces: &mut [Workspace], show_progress: bool) -> usize {
    let progress = show_progress
        .then(|| ProgressBar::new(workspaces.len(), "Loading Terraform states"));
    let mut loaded = 0;

    for workspace in workspaces.iter_mut() {
        match load_workspace_state(cli, workspace) {
            Ok(true) => loaded += 1,
            Ok(false) => {}
            Err(err) => {
                let line = format!("⚠️  Failed to load state for {}: {err}", workspace.name);
                match &progress {
                    Some(progress) => progress.println(&line),
                    None => eprintln!("{line}"),
                }
            }
        }
        if let Some(progress) = &progress {
            progress.inc();
        }
    }

    if let Some(progress) = &progress {
        progress.finish_and_clear();
    }

    loaded
}
