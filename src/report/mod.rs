//! Console renderers and exporters.
//!
//! Rendering goes through the [`Render`] trait so the rest of the binary
//! never cares whether output is styled. [`select_reporter`] picks the
//! implementation once at startup:
//!
//! - [`styled`] - Bordered tables for interactive terminals
//! - [`plain`] - Aligned column output for pipes and logs
//! - [`export`] - JSON and CSV file writers
//!
//! Both renderers take the output stream as an argument, so tests can
//! render into a buffer and assert on the result.

use std::io::{self, Write};

use clap::ValueEnum;

use crate::analysis::classify::Category;
use crate::analysis::summary::RunSummary;
use crate::utils::format::format_number;

pub mod export;
pub mod plain;
pub mod styled;

/// Which detail view `--filter` selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DetailFilter {
    /// Per-user security table plus password statistics
    Users,
    /// Realm configuration rows
    Realms,
    /// Client configuration rows
    Clients,
    /// Identity provider rows
    Idp,
    /// Authentication flow rows
    Auth,
    /// The complete per-workspace walk
    All,
}

/// A console renderer.
///
/// One required method per view; `detail` dispatches a filter choice.
/// The complete walk is line-oriented and identical in both modes, so it
/// lives here as a default method.
pub trait Render {
    fn overview(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()>;
    fn users(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()>;
    fn realms(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()>;
    fn clients(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()>;
    fn identity_providers(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()>;
    fn authentication_flows(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()>;

    /// Render the view a `--filter` choice asks for.
    fn detail(&self, out: &mut dyn Write, run: &RunSummary, filter: DetailFilter) -> io::Result<()> {
        match filter {
            DetailFilter::Users => self.users(out, run),
            DetailFilter::Realms => self.realms(out, run),
            DetailFilter::Clients => self.clients(out, run),
            DetailFilter::Idp => self.identity_providers(out, run),
            DetailFilter::Auth => self.authentication_flows(out, run),
            DetailFilter::All => self.complete(out, run),
        }
    }

    /// Walk every workspace that has resources: counts per category plus
    /// output names.
    fn complete(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "📋 COMPLETE RESOURCE ANALYSIS")?;
        writeln!(out, "{}", "=".repeat(70))?;

        for summary in &run.workspaces {
            if summary.resource_count == 0 {
                continue;
            }

            writeln!(out)?;
            writeln!(out, "📁 Workspace: {}", summary.name)?;
            writeln!(out, "   Path: {}", summary.path)?;
            writeln!(out, "   Resources: {}", format_number(summary.resource_count))?;
            for category in Category::ALL {
                let count = summary.category_count(category);
                if count > 0 {
                    writeln!(out, "   {}: {}", category.label(), format_number(count))?;
                }
            }
            if let Some(outputs) = summary.outputs.as_ref().filter(|o| !o.is_empty()) {
                writeln!(out, "   Outputs:")?;
                for name in outputs.keys() {
                    writeln!(out, "     - {name}")?;
                }
            }
        }

        Ok(())
    }
}

/// Pick the renderer for this run. Styled output is used on interactive
/// stdout unless the user opted out.
pub fn select_reporter(styled: bool) -> Box<dyn Render> {
    if styled {
        Box::new(styled::StyledReporter)
    } else {
        Box::new(plain::PlainReporter)
    }
}
