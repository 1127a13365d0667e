//! User security analysis and per-category detail projections.
//!
//! Works on the classified resource buckets. The user analysis answers the
//! questions an identity audit actually asks: which accounts carry an
//! initial password, which of those are temporary, and which accounts are
//! disabled. The remaining projections flatten realm, client, identity
//! provider, and authentication flow resources into rows for the detail
//! views.
//!
//! A missing or oddly typed attribute falls back to a default instead of
//! failing the audit:
//!
//! - missing `username` reads as "unknown"
//! - missing `email` reads as empty
//! - missing `enabled` reads as enabled

use serde::{Deserialize, Serialize};

use crate::terraform::types::StateResource;

/// Aggregated password and account status over one workspace's users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSecuritySummary {
    pub total_users: usize,
    pub users_with_passwords: usize,
    pub users_without_passwords: usize,
    pub temporary_passwords: usize,
    pub enabled_users: usize,
    pub disabled_users: usize,
    /// One row per user, in state order
    pub user_details: Vec<UserSecurityDetail>,
}

/// Security-relevant fields of a single managed user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSecurityDetail {
    pub username: String,
    pub email: String,
    pub enabled: bool,
    pub has_password: bool,
    pub temporary_password: bool,
}

/// Row for the realm detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmDetail {
    pub name: String,
    pub enabled: bool,
    pub display_name: String,
    pub address: String,
}

/// Row for the client detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDetail {
    pub client_id: String,
    pub name: String,
    pub enabled: bool,
    pub protocol: String,
    pub address: String,
}

/// Row for the identity provider detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProviderDetail {
    pub alias: String,
    pub provider_id: String,
    pub enabled: bool,
    pub address: String,
}

/// Row for the authentication flow detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDetail {
    pub alias: String,
    pub provider_id: String,
    pub description: String,
    pub address: String,
}

/// Analyze the user resources of one workspace.
///
/// A user "has a password" when the state records an `initial_password`
/// block at all; the password is temporary when that block carries
/// `temporary: true`.
pub fn analyze_users(users: &[&StateResource]) -> UserSecuritySummary {
    let mut summary = UserSecuritySummary {
        total_users: users.len(),
        ..Default::default()
    };

    for user in users {
        let has_password = user.has_value("initial_password");
        let temporary_password = has_password
            && user
                .values
                .get("initial_password")
                .and_then(|block| block.get("temporary"))
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
        let enabled = user.value_bool("enabled").unwrap_or(true);

        if has_password {
            summary.users_with_passwords += 1;
            if temporary_password {
                summary.temporary_passwords += 1;
            }
        } else {
            summary.users_without_passwords += 1;
        }

        if enabled {
            summary.enabled_users += 1;
        } else {
            summary.disabled_users += 1;
        }

        summary.user_details.push(UserSecurityDetail {
            username: user.value_str("username").unwrap_or("unknown").to_string(),
            email: user.value_str("email").unwrap_or("").to_string(),
            enabled,
            has_password,
            temporary_password,
        });
    }

    summary
}

/// Flatten realm resources into detail rows.
pub fn analyze_realms(realms: &[&StateResource]) -> Vec<RealmDetail> {
    realms
        .iter()
        .map(|realm| RealmDetail {
            name: realm.value_str("realm").unwrap_or("unknown").to_string(),
            enabled: realm.value_bool("enabled").unwrap_or(true),
            display_name: realm.value_str("display_name").unwrap_or("").to_string(),
            address: realm.address.clone(),
        })
        .collect()
}

/// Flatten client resources into detail rows.
pub fn analyze_clients(clients: &[&StateResource]) -> Vec<ClientDetail> {
    clients
        .iter()
        .map(|client| ClientDetail {
            client_id: client.value_str("client_id").unwrap_or("unknown").to_string(),
            name: client.value_str("name").unwrap_or("").to_string(),
            enabled: client.value_bool("enabled").unwrap_or(true),
            protocol: client.value_str("protocol").unwrap_or("").to_string(),
            address: client.address.clone(),
        })
        .collect()
}

/// Flatten identity provider resources into detail rows.
pub fn analyze_identity_providers(providers: &[&StateResource]) -> Vec<IdentityProviderDetail> {
    providers
        .iter()
        .map(|provider| IdentityProviderDetail {
            alias: provider.value_str("alias").unwrap_or("unknown").to_string(),
            provider_id: provider.value_str("provider_id").unwrap_or("").to_string(),
            enabled: provider.value_bool("enabled").unwrap_or(true),
            address: provider.address.clone(),
        })
        .collect()
}

/// Flatten authentication flow resources into detail rows.
pub fn analyze_flows(flows: &[&StateResource]) -> Vec<FlowDetail> {
    flows
        .iter()
        .map(|flow| FlowDetail {
            alias: flow.value_str("alias").unwrap_or("unknown").to_string(),
            provider_id: flow.value_str("provider_id").unwrap_or("").to_string(),
            description: flow.value_str("description").unwrap_or("").to_string(),
            address: flow.address.clone(),
        })
        .collect()
}
