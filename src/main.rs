use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};

mod analysis;
mod report;
mod terraform;
mod utils;

use analysis::summary::RunSummary;
use report::{export, DetailFilter};
use terraform::cli::TerraformCli;
use terraform::{discover, loader};

#[derive(Parser)]
#[command(name = "keycloak-tf-audit")]
#[command(about = "Audit Terraform-managed Keycloak infrastructure", long_about = None)]
#[command(version)]
#[command(after_help = "\
Examples:
  keycloak-tf-audit                                Overview of the current directory
  keycloak-tf-audit -p ~/terraform/keycloak        Scan a specific tree
  keycloak-tf-audit -f users                       User security detail view
  keycloak-tf-audit -d -e audit.json               Full walk plus JSON export
  keycloak-tf-audit --export-csv users.csv         Per-user CSV for spreadsheets")]
struct Cli {
    /// Base path to scan for Terraform workspaces
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Show a single detail view instead of the overview
    #[arg(short, long, value_enum)]
    filter: Option<DetailFilter>,

    /// Show the complete per-workspace analysis (overrides --filter)
    #[arg(short, long)]
    detailed: bool,

    /// Export the analysis to a JSON file
    #[arg(short, long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Export per-user security rows to a CSV file
    #[arg(long, value_name = "FILE")]
    export_csv: Option<PathBuf>,

    /// Disable styled tables and progress output
    #[arg(long)]
    no_color: bool,

    /// Terraform binary to invoke (default: $TERRAFORM_BIN or "terraform")
    #[arg(long, value_name = "BIN")]
    terraform_bin: Option<String>,

    /// Generate shell completion scripts and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if let Some(shell) = args.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "keycloak-tf-audit", &mut std::io::stdout());
        return Ok(());
    }

    eprintln!("🚀 Starting Keycloak Terraform analysis");

    let base_path = args
        .path
        .canonicalize()
        .with_context(|| format!("Scan path does not exist: {}", args.path.display()))?;

    eprintln!("🔍 Scanning for Terraform workspaces in: {}", base_path.display());
    let mut workspaces = discover::discover_workspaces(&base_path);
    if workspaces.is_empty() {
        bail!("No Terraform workspaces found under {}", base_path.display());
    }
    eprintln!("✅ Found {} Terraform workspaces", workspaces.len());

    let terraform = TerraformCli::from_options(args.terraform_bin.as_deref());
    let show_progress = !args.no_color && io::stderr().is_terminal();
    let loaded = loader::load_all(&terraform, &mut workspaces, show_progress);
    eprintln!("✅ Loaded state from {loaded}/{} workspaces", workspaces.len());

    let run = RunSummary::build(&base_path, &workspaces);

    let styled = !args.no_color && io::stdout().is_terminal();
    let reporter = report::select_reporter(styled);
    let mut out = io::stdout().lock();

    if args.detailed {
        reporter.complete(&mut out, &run)?;
    } else if let Some(filter) = args.filter {
        reporter.detail(&mut out, &run, filter)?;
    } else {
        reporter.overview(&mut out, &run)?;
    }

    if let Some(path) = args.export.as_deref() {
        export::write_json(path, &run)?;
        eprintln!("✅ Analysis exported to: {}", path.display());
    }
    if let Some(path) = args.export_csv.as_deref() {
        export::write_user_csv(path, &run)?;
        eprintln!("✅ User security rows exported to: {}", path.display());
    }

    eprintln!("🎉 Analysis complete! Analyzed {} workspaces.", run.workspaces.len());
    Ok(())
}
