//! Per-workspace summaries and run-level aggregation.
//!
//! [`summarize`] turns one loaded workspace into the record every renderer
//! and exporter consumes. A workspace with nothing to analyze (no state,
//! or an empty state) gets an explicit error marker instead of a partial
//! record, so downstream consumers never have to guess why counts are
//! missing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::classify::{self, Category};
use crate::analysis::security::{
    self, ClientDetail, FlowDetail, IdentityProviderDetail, RealmDetail, UserSecuritySummary,
};
use crate::terraform::discover::Workspace;
use crate::terraform::types::StateResource;

/// Marker recorded for workspaces whose state produced no resources.
pub const NO_RESOURCES_ERROR: &str = "No resources found or state not loaded";

/// Detail blocks for the categories worth drilling into.
///
/// Only populated categories are present; a workspace managing nothing
/// but roles serializes this as an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_security: Option<UserSecuritySummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realms: Option<Vec<RealmDetail>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<ClientDetail>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_providers: Option<Vec<IdentityProviderDetail>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_flows: Option<Vec<FlowDetail>>,
}

/// Everything the auditor knows about one workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub name: String,
    pub path: String,
    /// Whether a local state file existed, independent of whether it
    /// could actually be read
    pub has_state: bool,
    pub resource_count: usize,
    /// Non-zero category counts only
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub categories: BTreeMap<Category, usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_analysis: Option<DetailedAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<BTreeMap<String, serde_json::Value>>,
}

impl WorkspaceSummary {
    /// Count for one category, zero when absent.
    pub fn category_count(&self, category: Category) -> usize {
        self.categories.get(&category).copied().unwrap_or(0)
    }
}

/// Run-level totals shown in the stats panel and the export header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisTotals {
    pub total_workspaces: usize,
    pub total_resources: usize,
    pub workspaces_with_state: usize,
}

/// One full audit run: the scan root plus every workspace summary in
/// discovery order.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub base_path: PathBuf,
    pub workspaces: Vec<WorkspaceSummary>,
}

impl RunSummary {
    /// Summarize every loaded workspace, preserving discovery order.
    pub fn build(base_path: &Path, workspaces: &[Workspace]) -> Self {
        Self {
            base_path: base_path.to_path_buf(),
            workspaces: workspaces.iter().map(summarize).collect(),
        }
    }

    /// Run totals, derived from the workspace list on demand.
    pub fn totals(&self) -> AnalysisTotals {
        AnalysisTotals {
            total_workspaces: self.workspaces.len(),
            total_resources: self.workspaces.iter().map(|w| w.resource_count).sum(),
            workspaces_with_state: self.workspaces.iter().filter(|w| w.has_state).count(),
        }
    }

    /// Sum of one category across all workspaces.
    pub fn category_total(&self, category: Category) -> usize {
        self.workspaces
            .iter()
            .map(|w| w.category_count(category))
            .sum()
    }

    /// Look up a workspace summary by name.
    #[allow(dead_code)]
    pub fn get(&self, name: &str) -> Option<&WorkspaceSummary> {
        self.workspaces.iter().find(|w| w.name == name)
    }
}

/// Summarize a single workspace.
pub fn summarize(workspace: &Workspace) -> WorkspaceSummary {
    if workspace.resources.is_empty() {
        return WorkspaceSummary {
            name: workspace.name.clone(),
            path: workspace.path.display().to_string(),
            has_state: workspace.has_local_state,
            resource_count: 0,
            categories: BTreeMap::new(),
            error: Some(NO_RESOURCES_ERROR.to_string()),
            detailed_analysis: None,
            outputs: None,
        };
    }

    let categories = classify::categorize(&workspace.resources);
    let counts: BTreeMap<Category, usize> = categories
        .iter()
        .filter(|(_, resources)| !resources.is_empty())
        .map(|(category, resources)| (*category, resources.len()))
        .collect();

    let mut detail = DetailedAnalysis::default();
    if let Some(users) = non_empty(&categories, Category::Users) {
        detail.user_security = Some(security::analyze_users(users));
    }
    if let Some(realms) = non_empty(&categories, Category::Realms) {
        detail.realms = Some(security::analyze_realms(realms));
    }
    if let Some(clients) = non_empty(&categories, Category::Clients) {
        detail.clients = Some(security::analyze_clients(clients));
    }
    if let Some(providers) = non_empty(&categories, Category::IdentityProviders) {
        detail.identity_providers = Some(security::analyze_identity_providers(providers));
    }
    if let Some(flows) = non_empty(&categories, Category::AuthenticationFlows) {
        detail.authentication_flows = Some(security::analyze_flows(flows));
    }

    WorkspaceSummary {
        name: workspace.name.clone(),
        path: workspace.path.display().to_string(),
        has_state: workspace.has_local_state,
        resource_count: workspace.resources.len(),
        categories: counts,
        error: None,
        detailed_analysis: Some(detail),
        outputs: Some(workspace.outputs.clone()),
    }
}

fn non_empty<'a>(
    categories: &'a BTreeMap<Category, Vec<&'a StateResource>>,
    category: Category,
) -> Option<&'a [&'a StateResource]> {
    categories
        .get(&category)
        .filter(|resources| !resources.is_empty())
        .map(Vec::as_slice)
}
