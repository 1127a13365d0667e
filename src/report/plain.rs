//! Plain-text renderer.
//!
//! Aligned column output for pipes, CI logs, and terminals where styled
//! tables are unwelcome. Carries the same information as the styled
//! renderer, including the per-user rows, so redirecting stdout never
//! loses detail.

use std::io::{self, Write};

use crate::analysis::classify::Category;
use crate::analysis::summary::RunSummary;
use crate::report::Render;
use crate::utils::format::{format_number, truncate};

pub struct PlainReporter;

const RULE_WIDTH: usize = 90;

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn section(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

impl Render for PlainReporter {
    fn overview(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()> {
        section(out, "KEYCLOAK TERRAFORM INFRASTRUCTURE OVERVIEW")?;

        writeln!(
            out,
            "{:<30} {:>9} {:>8} {:>8} {:>8} {:>8}  {}",
            "Workspace", "Resources", "Realms", "Users", "Clients", "IDPs", "State"
        )?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

        for summary in &run.workspaces {
            writeln!(
                out,
                "{:<30} {:>9} {:>8} {:>8} {:>8} {:>8}  {}",
                truncate(&summary.name, 30),
                format_number(summary.resource_count),
                format_number(summary.category_count(Category::Realms)),
                format_number(summary.category_count(Category::Users)),
                format_number(summary.category_count(Category::Clients)),
                format_number(summary.category_count(Category::IdentityProviders)),
                if summary.has_state { "present" } else { "missing" }
            )?;
        }

        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        let totals = run.totals();
        writeln!(
            out,
            "{:<30} {:>9} {:>8} {:>8} {:>8} {:>8}",
            "TOTAL",
            format_number(totals.total_resources),
            format_number(run.category_total(Category::Realms)),
            format_number(run.category_total(Category::Users)),
            format_number(run.category_total(Category::Clients)),
            format_number(run.category_total(Category::IdentityProviders)),
        )?;

        writeln!(out)?;
        writeln!(
            out,
            "📊 Total workspaces: {} | Total resources: {} | With state: {}",
            format_number(totals.total_workspaces),
            format_number(totals.total_resources),
            format_number(totals.workspaces_with_state),
        )?;

        Ok(())
    }

    fn users(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()> {
        section(out, "👥 USER SECURITY ANALYSIS")?;

        let mut found = false;
        for summary in &run.workspaces {
            let Some(users) = summary
                .detailed_analysis
                .as_ref()
                .and_then(|d| d.user_security.as_ref())
            else {
                continue;
            };
            found = true;

            writeln!(out)?;
            writeln!(out, "📁 {}", summary.name)?;
            writeln!(
                out,
                "   {:<20} {:<28} {:>8} {:>9} {:>10}",
                "Username", "Email", "Enabled", "Password", "Temporary"
            )?;
            writeln!(out, "   {}", "-".repeat(80))?;
            for user in &users.user_details {
                let email = if user.email.is_empty() { "N/A" } else { user.email.as_str() };
                writeln!(
                    out,
                    "   {:<20} {:<28} {:>8} {:>9} {:>10}",
                    truncate(&user.username, 20),
                    truncate(email, 28),
                    yes_no(user.enabled),
                    yes_no(user.has_password),
                    yes_no(user.temporary_password),
                )?;
            }
            writeln!(
                out,
                "   Total: {} | With passwords: {} | Without passwords: {} | Temporary: {} | Enabled: {} | Disabled: {}",
                users.total_users,
                users.users_with_passwords,
                users.users_without_passwords,
                users.temporary_passwords,
                users.enabled_users,
                users.disabled_users,
            )?;
        }

        if !found {
            writeln!(out, "No managed users in any workspace.")?;
        }

        Ok(())
    }

    fn realms(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()> {
        section(out, "🏰 REALM CONFIGURATION ANALYSIS")?;

        let mut found = false;
        for summary in &run.workspaces {
            let Some(realms) = summary
                .detailed_analysis
                .as_ref()
                .and_then(|d| d.realms.as_ref())
            else {
                continue;
            };
            found = true;

            writeln!(out)?;
            writeln!(out, "📁 {}", summary.name)?;
            writeln!(
                out,
                "   {:<20} {:<26} {:>8}  {}",
                "Realm", "Display Name", "Enabled", "Address"
            )?;
            writeln!(out, "   {}", "-".repeat(86))?;
            for realm in realms {
                writeln!(
                    out,
                    "   {:<20} {:<26} {:>8}  {}",
                    truncate(&realm.name, 20),
                    truncate(&realm.display_name, 26),
                    yes_no(realm.enabled),
                    realm.address,
                )?;
            }
        }

        if !found {
            writeln!(out, "No managed realms in any workspace.")?;
        }

        Ok(())
    }

    fn clients(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()> {
        section(out, "📱 CLIENT CONFIGURATION ANALYSIS")?;

        let mut found = false;
        for summary in &run.workspaces {
            let Some(clients) = summary
                .detailed_analysis
                .as_ref()
                .and_then(|d| d.clients.as_ref())
            else {
                continue;
            };
            found = true;

            writeln!(out)?;
            writeln!(out, "📁 {}", summary.name)?;
            writeln!(
                out,
                "   {:<24} {:<20} {:>8} {:<10}  {}",
                "Client ID", "Name", "Enabled", "Protocol", "Address"
            )?;
            writeln!(out, "   {}", "-".repeat(86))?;
            for client in clients {
                writeln!(
                    out,
                    "   {:<24} {:<20} {:>8} {:<10}  {}",
                    truncate(&client.client_id, 24),
                    truncate(&client.name, 20),
                    yes_no(client.enabled),
                    truncate(&client.protocol, 10),
                    client.address,
                )?;
            }
        }

        if !found {
            writeln!(out, "No managed clients in any workspace.")?;
        }

        Ok(())
    }

    fn identity_providers(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()> {
        section(out, "🔗 IDENTITY PROVIDER ANALYSIS")?;

        let mut found = false;
        for summary in &run.workspaces {
            let Some(providers) = summary
                .detailed_analysis
                .as_ref()
                .and_then(|d| d.identity_providers.as_ref())
            else {
                continue;
            };
            found = true;

            writeln!(out)?;
            writeln!(out, "📁 {}", summary.name)?;
            writeln!(
                out,
                "   {:<22} {:<16} {:>8}  {}",
                "Alias", "Provider", "Enabled", "Address"
            )?;
            writeln!(out, "   {}", "-".repeat(86))?;
            for provider in providers {
                writeln!(
                    out,
                    "   {:<22} {:<16} {:>8}  {}",
                    truncate(&provider.alias, 22),
                    truncate(&provider.provider_id, 16),
                    yes_no(provider.enabled),
                    provider.address,
                )?;
            }
        }

        if !found {
            writeln!(out, "No managed identity providers in any workspace.")?;
        }

        Ok(())
    }

    fn authentication_flows(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()> {
        section(out, "🔑 AUTHENTICATION FLOW ANALYSIS")?;

        let mut found = false;
        for summary in &run.workspaces {
            let Some(flows) = summary
                .detailed_analysis
                .as_ref()
                .and_then(|d| d.authentication_flows.as_ref())
            else {
                continue;
            };
            found = true;

            writeln!(out)?;
            writeln!(out, "📁 {}", summary.name)?;
            writeln!(
                out,
                "   {:<24} {:<16} {:<30}  {}",
                "Alias", "Provider", "Description", "Address"
            )?;
            writeln!(out, "   {}", "-".repeat(86))?;
            for flow in flows {
                writeln!(
                    out,
                    "   {:<24} {:<16} {:<30}  {}",
                    truncate(&flow.alias, 24),
                    truncate(&flow.provider_id, 16),
                    truncate(&flow.description, 30),
                    flow.address,
                )?;
            }
        }

        if !found {
            writeln!(out, "No managed authentication flows in any workspace.")?;
        }

        Ok(())
    }
}
