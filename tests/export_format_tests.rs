/// Golden tests for the JSON export document.
/// The export is consumed by downstream tooling, so its exact shape is
/// pinned here: sparse category maps, the error marker for unloaded
/// workspaces, and omission of empty optional blocks.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::json;

use keycloak_tf_audit::analysis::summary::RunSummary;
use keycloak_tf_audit::report::export::ExportDocument;
use keycloak_tf_audit::terraform::discover::Workspace;

fn prod_workspace() -> Workspace {
    let resources = serde_json::from_value(json!([
        {
            "address": "keycloak_realm.main",
            "type": "keycloak_realm",
            "name": "main",
            "values": {"realm": "acme", "enabled": true, "display_name": "Acme Corp"}
        },
        {
            "address": "keycloak_user.alice",
            "type": "keycloak_user",
            "name": "alice",
            "values": {
                "username": "alice",
                "email": "alice@acme.io",
                "enabled": true,
                "initial_password": {"value": "changeme", "temporary": true}
            }
        },
        {
            "address": "keycloak_user.bob",
            "type": "keycloak_user",
            "name": "bob",
            "values": {"username": "bob", "email": ""}
        }
    ]))
    .unwrap();

    let mut outputs = BTreeMap::new();
    outputs.insert(
        "realm_id".to_string(),
        json!({"sensitive": false, "type": "string", "value": "acme"}),
    );

    Workspace {
        path: PathBuf::from("/infra/prod"),
        name: "prod".to_string(),
        has_local_state: true,
        resources,
        outputs,
    }
}

fn staging_workspace() -> Workspace {
    Workspace {
        path: PathBuf::from("/infra/staging"),
        name: "staging".to_string(),
        has_local_state: false,
        resources: Vec::new(),
        outputs: BTreeMap::new(),
    }
}

#[test]
fn test_export_document_shape() {
    let run = RunSummary::build(Path::new("/infra"), &[prod_workspace(), staging_workspace()]);

    let mut document = ExportDocument::from_run(&run);
    document.timestamp = "2026-08-22T12:00:00+00:00".to_string();

    let value = serde_json::to_value(&document).unwrap();
    let expected = json!({
        "timestamp": "2026-08-22T12:00:00+00:00",
        "base_path": "/infra",
        "analysis_summary": {
            "total_workspaces": 2,
            "total_resources": 3,
            "workspaces_with_state": 1
        },
        "workspaces": {
            "prod": {
                "name": "prod",
                "path": "/infra/prod",
                "has_state": true,
                "resource_count": 3,
                "categories": {"realms": 1, "users": 2},
                "detailed_analysis": {
                    "user_security": {
                        "total_users": 2,
                        "users_with_passwords": 1,
                        "users_without_passwords": 1,
                        "temporary_passwords": 1,
                        "enabled_users": 2,
                        "disabled_users": 0,
                        "user_details": [
                            {
                                "username": "alice",
                                "email": "alice@acme.io",
                                "enabled": true,
                                "has_password": true,
                                "temporary_password": true
                            },
                            {
                                "username": "bob",
                                "email": "",
                                "enabled": true,
                                "has_password": false,
                                "temporary_password": false
                            }
                        ]
                    },
                    "realms": [
                        {
                            "name": "acme",
                            "enabled": true,
                            "display_name": "Acme Corp",
                            "address": "keycloak_realm.main"
                        }
                    ]
                },
                "outputs": {
                    "realm_id": {"sensitive": false, "type": "string", "value": "acme"}
                }
            },
            "staging": {
                "name": "staging",
                "path": "/infra/staging",
                "has_state": false,
                "resource_count": 0,
                "error": "No resources found or state not loaded"
            }
        }
    });

    assert_eq!(value, expected);
}

#[test]
fn test_workspace_with_only_roles_serializes_empty_detail() {
    let resources = serde_json::from_value(json!([
        {
            "address": "keycloak_role.admin",
            "type": "keycloak_role",
            "name": "admin",
            "values": {"name": "admin"}
        }
    ]))
    .unwrap();
    let ws = Workspace {
        path: PathBuf::from("/infra/roles"),
        name: "roles".to_string(),
        has_local_state: true,
        resources,
        outputs: BTreeMap::new(),
    };

    let run = RunSummary::build(Path::new("/infra"), &[ws]);
    let mut document = ExportDocument::from_run(&run);
    document.timestamp = "2026-08-22T12:00:00+00:00".to_string();

    let value = serde_json::to_value(&document).unwrap();
    // no detail categories present, but the block itself is kept
    assert_eq!(value["workspaces"]["roles"]["detailed_analysis"], json!({}));
    assert_eq!(value["workspaces"]["roles"]["categories"], json!({"roles": 1}));
    assert_eq!(value["workspaces"]["roles"]["outputs"], json!({}));
}

#[test]
fn test_document_round_trips_through_serde() {
    let run = RunSummary::build(Path::new("/infra"), &[prod_workspace(), staging_workspace()]);
    let document = ExportDocument::from_run(&run);

    let text = serde_json::to_string_pretty(&document).unwrap();
    let reloaded: ExportDocument = serde_json::from_str(&text).unwrap();

    assert_eq!(document, reloaded);
}
