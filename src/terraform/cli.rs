//! Terraform CLI invocation.
//!
//! Every workspace read goes through [`TerraformCli`], which runs the
//! Terraform binary with the workspace directory as the child's working
//! directory. The auditor's own working directory is never changed, so a
//! failure in one workspace cannot leak into the next.
//!
//! The binary is resolved once at startup: `--terraform-bin` flag first,
//! then the `TERRAFORM_BIN` environment variable, then plain `terraform`
//! from `PATH`.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::terraform::types::StateSnapshot;

/// Environment variable consulted when no `--terraform-bin` flag is given.
pub const TERRAFORM_BIN_ENV: &str = "TERRAFORM_BIN";

const DEFAULT_PROGRAM: &str = "terraform";

/// Errors surfaced by a single Terraform invocation.
///
/// These stay local to the workspace being read; the loader reports them
/// and keeps going.
#[derive(Debug, Error)]
pub enum TerraformError {
    #[error("failed to invoke {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("terraform exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("invalid JSON from terraform: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Handle on the Terraform binary used for all workspace reads.
pub struct TerraformCli {
    program: String,
}

impl TerraformCli {
    /// Resolve the Terraform binary from the command line flag, the
    /// `TERRAFORM_BIN` environment variable, or the default.
    pub fn from_options(flag: Option<&str>) -> Self {
        let program = flag
            .map(str::to_owned)
            .or_else(|| std::env::var(TERRAFORM_BIN_ENV).ok())
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
        Self { program }
    }

    /// The resolved binary name or path
    #[allow(dead_code)]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Read a workspace's state snapshot via `terraform show -json`.
    pub fn show_state(&self, dir: &Path) -> Result<StateSnapshot, TerraformError> {
        let stdout = self.run(dir, &["show", "-json"])?;
        Ok(serde_json::from_str(&stdout)?)
    }

    /// Read a workspace's outputs via `terraform output -json`.
    pub fn outputs(&self, dir: &Path) -> Result<BTreeMap<String, serde_json::Value>, TerraformError> {
        let stdout = self.run(dir, &["output", "-json"])?;
        Ok(serde_json::from_str(&stdout)?)
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Result<String, TerraformError> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| TerraformError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(TerraformError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
