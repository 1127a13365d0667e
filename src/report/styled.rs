//! Styled renderer.
//!
//! Bordered tables for interactive terminals. Each view prints a short
//! title, one table per workspace (or one combined table for the
//! overview), and a stats block where the view has one.

use std::io::{self, Write};

use tabled::{settings::Style, Table, Tabled};

use crate::analysis::classify::Category;
use crate::analysis::summary::RunSummary;
use crate::report::Render;
use crate::utils::format::{check_mark, format_number, warning_mark};

pub struct StyledReporter;

#[derive(Tabled)]
struct OverviewRow {
    #[tabled(rename = "Workspace")]
    workspace: String,
    #[tabled(rename = "Resources")]
    resources: String,
    #[tabled(rename = "Realms")]
    realms: String,
    #[tabled(rename = "Users")]
    users: String,
    #[tabled(rename = "Clients")]
    clients: String,
    #[tabled(rename = "IDPs")]
    idps: String,
    #[tabled(rename = "State")]
    state: String,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Enabled")]
    enabled: &'static str,
    #[tabled(rename = "Has Password")]
    has_password: &'static str,
    #[tabled(rename = "Temporary")]
    temporary: &'static str,
}

#[derive(Tabled)]
struct RealmRow {
    #[tabled(rename = "Realm")]
    name: String,
    #[tabled(rename = "Display Name")]
    display_name: String,
    #[tabled(rename = "Enabled")]
    enabled: &'static str,
    #[tabled(rename = "Address")]
    address: String,
}

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "Client ID")]
    client_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: &'static str,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Address")]
    address: String,
}

#[derive(Tabled)]
struct IdentityProviderRow {
    #[tabled(rename = "Alias")]
    alias: String,
    #[tabled(rename = "Provider")]
    provider_id: String,
    #[tabled(rename = "Enabled")]
    enabled: &'static str,
    #[tabled(rename = "Address")]
    address: String,
}

#[derive(Tabled)]
struct FlowRow {
    #[tabled(rename = "Alias")]
    alias: String,
    #[tabled(rename = "Provider")]
    provider_id: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Address")]
    address: String,
}

fn or_na(text: &str) -> String {
    if text.is_empty() {
        "N/A".to_string()
    } else {
        text.to_string()
    }
}

impl Render for StyledReporter {
    fn overview(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()> {
        let mut rows: Vec<OverviewRow> = run
            .workspaces
            .iter()
            .map(|summary| OverviewRow {
                workspace: summary.name.clone(),
                resources: format_number(summary.resource_count),
                realms: format_number(summary.category_count(Category::Realms)),
                users: format_number(summary.category_count(Category::Users)),
                clients: format_number(summary.category_count(Category::Clients)),
                idps: format_number(summary.category_count(Category::IdentityProviders)),
                state: if summary.has_state {
                    "✅ Has State".to_string()
                } else {
                    "❌ No State".to_string()
                },
            })
            .collect();

        let totals = run.totals();
        rows.push(OverviewRow {
            workspace: "TOTAL".to_string(),
            resources: format_number(totals.total_resources),
            realms: format_number(run.category_total(Category::Realms)),
            users: format_number(run.category_total(Category::Users)),
            clients: format_number(run.category_total(Category::Clients)),
            idps: format_number(run.category_total(Category::IdentityProviders)),
            state: String::new(),
        });

        let table = Table::new(rows).with(Style::modern()).to_string();

        writeln!(out)?;
        writeln!(out, "🔐 Keycloak Terraform Infrastructure Overview")?;
        writeln!(out, "{table}")?;

        let stats = vec![
            StatRow {
                metric: "📊 Total Workspaces".to_string(),
                value: format_number(totals.total_workspaces),
            },
            StatRow {
                metric: "📦 Total Resources".to_string(),
                value: format_number(totals.total_resources),
            },
            StatRow {
                metric: "🏰 Total Realms".to_string(),
                value: format_number(run.category_total(Category::Realms)),
            },
            StatRow {
                metric: "👥 Total Users".to_string(),
                value: format_number(run.category_total(Category::Users)),
            },
            StatRow {
                metric: "📱 Total Clients".to_string(),
                value: format_number(run.category_total(Category::Clients)),
            },
            StatRow {
                metric: "🔗 Total Identity Providers".to_string(),
                value: format_number(run.category_total(Category::IdentityProviders)),
            },
        ];
        let stats_table = Table::new(stats).with(Style::rounded()).to_string();
        writeln!(out, "{stats_table}")?;

        Ok(())
    }

    fn users(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "👥 User Security Analysis")?;

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

            let rows: Vec<UserRow> = users
                .user_details
                .iter()
                .map(|user| UserRow {
                    username: user.username.clone(),
                    email: or_na(&user.email),
                    enabled: check_mark(user.enabled),
                    has_password: check_mark(user.has_password),
                    temporary: warning_mark(user.temporary_password),
                })
                .collect();

            let table = Table::new(rows).with(Style::modern()).to_string();

            writeln!(out)?;
            writeln!(out, "📁 {}", summary.name)?;
            writeln!(out, "{table}")?;

            let stats = vec![
                StatRow {
                    metric: "Total Users".to_string(),
                    value: format_number(users.total_users),
                },
                StatRow {
                    metric: "With Passwords".to_string(),
                    value: format_number(users.users_with_passwords),
                },
                StatRow {
                    metric: "Without Passwords".to_string(),
                    value: format_number(users.users_without_passwords),
                },
                StatRow {
                    metric: "Temporary Passwords".to_string(),
                    value: format_number(users.temporary_passwords),
                },
                StatRow {
                    metric: "Enabled".to_string(),
                    value: format_number(users.enabled_users),
                },
                StatRow {
                    metric: "Disabled".to_string(),
                    value: format_number(users.disabled_users),
                },
            ];
            let stats_table = Table::new(stats).with(Style::rounded()).to_string();
            writeln!(out, "{stats_table}")?;
        }

        if !found {
            writeln!(out, "No managed users in any workspace.")?;
        }

        Ok(())
    }

    fn realms(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "🏰 Realm Configuration Analysis")?;

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

            let rows: Vec<RealmRow> = realms
                .iter()
                .map(|realm| RealmRow {
                    name: realm.name.clone(),
                    display_name: or_na(&realm.display_name),
                    enabled: check_mark(realm.enabled),
                    address: realm.address.clone(),
                })
                .collect();

            let table = Table::new(rows).with(Style::modern()).to_string();

            writeln!(out)?;
            writeln!(out, "📁 {}", summary.name)?;
            writeln!(out, "{table}")?;
        }

        if !found {
            writeln!(out, "No managed realms in any workspace.")?;
        }

        Ok(())
    }

    fn clients(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "📱 Client Configuration Analysis")?;

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

            let rows: Vec<ClientRow> = clients
                .iter()
                .map(|client| ClientRow {
                    client_id: client.client_id.clone(),
                    name: or_na(&client.name),
                    enabled: check_mark(client.enabled),
                    protocol: or_na(&client.protocol),
                    address: client.address.clone(),
                })
                .collect();

            let table = Table::new(rows).with(Style::modern()).to_string();

            writeln!(out)?;
            writeln!(out, "📁 {}", summary.name)?;
            writeln!(out, "{table}")?;
        }

        if !found {
            writeln!(out, "No managed clients in any workspace.")?;
        }

        Ok(())
    }

    fn identity_providers(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "🔗 Identity Provider Analysis")?;

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

            let rows: Vec<IdentityProviderRow> = providers
                .iter()
                .map(|provider| IdentityProviderRow {
                    alias: provider.alias.clone(),
                    provider_id: or_na(&provider.provider_id),
                    enabled: check_mark(provider.enabled),
                    address: provider.address.clone(),
                })
                .collect();

            let table = Table::new(rows).with(Style::modern()).to_string();

            writeln!(out)?;
            writeln!(out, "📁 {}", summary.name)?;
            writeln!(out, "{table}")?;
        }

        if !found {
            writeln!(out, "No managed identity providers in any workspace.")?;
        }

        Ok(())
    }

    fn authentication_flows(&self, out: &mut dyn Write, run: &RunSummary) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "🔑 Authentication Flow Analysis")?;

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

            let rows: Vec<FlowRow> = flows
                .iter()
                .map(|flow| FlowRow {
                    alias: flow.alias.clone(),
                    provider_id: or_na(&flow.provider_id),
                    description: or_na(&flow.description),
                    address: flow.address.clone(),
                })
                .collect();

            let table = Table::new(rows).with(Style::modern()).to_string();

            writeln!(out)?;
            writeln!(out, "📁 {}", summary.name)?;
            writeln!(out, "{table}")?;
        }

        if !found {
            writeln!(out, "No managed authentication flows in any workspace.")?;
        }

        Ok(())
    }
}
