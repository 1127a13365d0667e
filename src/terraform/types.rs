//! Data structures representing `terraform show -json` output.
//!
//! These types closely mirror the JSON document Terraform prints for a
//! state snapshot, enabling efficient deserialization with serde. Only the
//! parts the auditor reads are modeled; everything else is ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level state snapshot.
///
/// `terraform show -json` prints one of these per workspace. A workspace
/// whose state is empty (or was never applied) comes back with `values`
/// absent, so every level of the chain is optional.
///
/// # Fields
///
/// - `format_version`: State JSON format version (e.g., "1.0")
/// - `terraform_version`: Terraform release that wrote the state
/// - `values`: Root of the resource tree (absent for empty states)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateSnapshot {
    pub format_version: Option<String>,
    pub terraform_version: Option<String>,
    pub values: Option<StateValues>,
}

/// The `values` object of a state snapshot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateValues {
    pub root_module: Option<RootModule>,
}

/// Root module of the state tree.
///
/// Resources living in child modules are not audited; the classifier only
/// sees what the root module manages directly.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RootModule {
    #[serde(default)]
    pub resources: Vec<StateResource>,
}

/// A single managed resource from the state.
///
/// # Fields
///
/// - `address`: Full resource address (e.g., "keycloak_user.alice")
/// - `resource_type`: Terraform type (e.g., "keycloak_realm")
/// - `name`: Resource name within its type
/// - `mode`: "managed" or "data"
/// - `provider_name`: Fully qualified provider source
/// - `values`: Flattened attribute map as Terraform recorded it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateResource {
    #[serde(default)]
    pub address: String,
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(default)]
    pub name: String,
    pub mode: Option<String>,
    pub provider_name: Option<String>,
    #[serde(default)]
    pub values: HashMap<String, serde_json::Value>,
}

impl StateSnapshot {
    /// Consume the snapshot and return the root module's resources.
    ///
    /// Empty states, states without a root module, and root modules
    /// without resources all collapse to an empty vector.
    pub fn root_resources(self) -> Vec<StateResource> {
        self.values
            .and_then(|values| values.root_module)
            .map(|module| module.resources)
            .unwrap_or_default()
    }
}

impl StateResource {
    /// Get a string attribute from the resource values
    pub fn value_str(&self, key: &str) -> Option<&str> {
        self.values.get(key)?.as_str()
    }

    /// Get a boolean attribute from the resource values
    pub fn value_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key)?.as_bool()
    }

    /// Check whether an attribute is present at all, regardless of value
    pub fn has_value(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}
