//! Resource classification.
//!
//! Maps Terraform resource types onto Keycloak identity categories using
//! ordered substring tests. The order is load-bearing: a type is assigned
//! to the first matching category, so `keycloak_user_federation_mapper`
//! counts as a user resource, never a mapper, and `keycloak_realm` lands
//! in realms before the user test can see it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::terraform::types::StateResource;

/// The one resource type that contains "realm" lexically but is not a
/// realm resource. Checked explicitly so users never leak into realms.
pub const USER_RESOURCE_TYPE: &str = "keycloak_user";

/// Keycloak identity categories.
///
/// Declaration order matches classification priority, and `Ord` follows
/// declaration order, so sorted maps keyed by category iterate from
/// realms down to the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Realms,
    Users,
    Clients,
    Roles,
    Groups,
    IdentityProviders,
    AuthenticationFlows,
    Scopes,
    Mappers,
    Other,
}

impl Category {
    /// Every category, in classification priority order.
    pub const ALL: [Category; 10] = [
        Category::Realms,
        Category::Users,
        Category::Clients,
        Category::Roles,
        Category::Groups,
        Category::IdentityProviders,
        Category::AuthenticationFlows,
        Category::Scopes,
        Category::Mappers,
        Category::Other,
    ];

    /// Human-readable label for table headers and the complete walk.
    pub fn label(self) -> &'static str {
        match self {
            Category::Realms => "Realms",
            Category::Users => "Users",
            Category::Clients => "Clients",
            Category::Roles => "Roles",
            Category::Groups => "Groups",
            Category::IdentityProviders => "Identity Providers",
            Category::AuthenticationFlows => "Authentication Flows",
            Category::Scopes => "Scopes",
            Category::Mappers => "Mappers",
            Category::Other => "Other",
        }
    }
}

/// Classify a single resource type.
///
/// Total: every input string maps to exactly one category.
pub fn classify(resource_type: &str) -> Category {
    if resource_type.contains("realm") && resource_type != USER_RESOURCE_TYPE {
        Category::Realms
    } else if resource_type.contains("user") {
        Category::Users
    } else if resource_type.contains("client") {
        Category::Clients
    } else if resource_type.contains("role") {
        Category::Roles
    } else if resource_type.contains("group") {
        Category::Groups
    } else if resource_type.contains("identity_provider") || resource_type.contains("idp") {
        Category::IdentityProviders
    } else if resource_type.contains("authentication") || resource_type.contains("flow") {
        Category::AuthenticationFlows
    } else if resource_type.contains("scope") {
        Category::Scopes
    } else if resource_type.contains("mapper") {
        Category::Mappers
    } else {
        Category::Other
    }
}

/// Group resources by category.
///
/// Every category is present in the result, empty or not, so callers can
/// index without guarding.
pub fn categorize(resources: &[StateResource]) -> BTreeMap<Category, Vec<&StateResource>> {
    let mut categories: BTreeMap<Category, Vec<&StateResource>> = Category::ALL
        .iter()
        .map(|category| (*category, Vec::new()))
        .collect();

    for resource in resources {
        categories
            .entry(classify(&resource.resource_type))
            .or_default()
            .push(resource);
    }

    categories
}
