/// Integration tests for the full audit pipeline
/// These tests drive discovery, state loading, and summarization against
/// a stub terraform binary so no real Terraform install is needed.
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use keycloak_tf_audit::analysis::classify::Category;
use keycloak_tf_audit::analysis::summary::{RunSummary, NO_RESOURCES_ERROR};
use keycloak_tf_audit::terraform::cli::TerraformCli;
use keycloak_tf_audit::terraform::{discover, loader};

const PROD_STATE: &str = r#"{
    "format_version": "1.0",
    "terraform_version": "1.6.2",
    "values": {
        "root_module": {
            "resources": [
                {
                    "address": "keycloak_realm.main",
                    "mode": "managed",
                    "type": "keycloak_realm",
                    "name": "main",
                    "provider_name": "registry.terraform.io/mrparkers/keycloak",
                    "values": {
                        "realm": "acme",
                        "enabled": true,
                        "display_name": "Acme Corp"
                    }
                },
                {
                    "address": "keycloak_user.alice",
                    "mode": "managed",
                    "type": "keycloak_user",
                    "name": "alice",
                    "provider_name": "registry.terraform.io/mrparkers/keycloak",
                    "values": {
                        "username": "alice",
                        "email": "alice@acme.io",
                        "enabled": true,
                        "initial_password": {"value": "changeme", "temporary": true}
                    }
                },
                {
                    "address": "keycloak_user.bob",
                    "mode": "managed",
                    "type": "keycloak_user",
                    "name": "bob",
                    "provider_name": "registry.terraform.io/mrparkers/keycloak",
                    "values": {
                        "username": "bob",
                        "email": ""
                    }
                }
            ]
        }
    }
}"#;

const PROD_OUTPUTS: &str = r#"{
    "realm_id": {"sensitive": false, "type": "string", "value": "acme"},
    "admin_url": {"sensitive": false, "type": "string", "value": "https://kc.acme.io/admin"}
}"#;

/// Two workspaces: prod has configuration plus local state, staging has
/// configuration only.
fn create_workspace_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path();

    fs::create_dir_all(base.join("prod")).unwrap();
    fs::create_dir_all(base.join("staging")).unwrap();
    fs::write(base.join("prod/main.tf"), "# keycloak realm and users\n").unwrap();
    fs::write(base.join("prod/terraform.tfstate"), "{}").unwrap();
    fs::write(base.join("staging/main.tf"), "# not yet applied\n").unwrap();

    tmp
}

/// Shell script standing in for the terraform binary. Answers `show`
/// with the given state JSON and `output` with the given outputs JSON.
#[cfg(unix)]
fn write_stub_terraform(dir: &Path, state_json: &str, outputs_json: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("terraform-stub");
    let script = format!(
        "#!/bin/sh\ncase \"$1\" in\nshow) cat <<'EOF'\n{state_json}\nEOF\n;;\noutput) cat <<'EOF'\n{outputs_json}\nEOF\n;;\nesac\n"
    );
    fs::write(&path, script).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();

    path
}

#[cfg(unix)]
fn analyzed_run(tree: &TempDir) -> RunSummary {
    let stub = write_stub_terraform(tree.path(), PROD_STATE, PROD_OUTPUTS);
    let base = tree.path().canonicalize().unwrap();

    let mut workspaces = discover::discover_workspaces(&base);
    let terraform = TerraformCli::from_options(Some(stub.to_str().unwrap()));
    loader::load_all(&terraform, &mut workspaces, false);

    RunSummary::build(&base, &workspaces)
}

#[test]
fn test_discovery_finds_both_workspaces() {
    let tree = create_workspace_tree();
    let base = tree.path().canonicalize().unwrap();

    let workspaces = discover::discover_workspaces(&base);

    assert_eq!(workspaces.len(), 2);
    assert_eq!(workspaces[0].name, "prod");
    assert!(workspaces[0].has_local_state);
    assert_eq!(workspaces[1].name, "staging");
    assert!(!workspaces[1].has_local_state);
}

#[cfg(unix)]
#[test]
fn test_load_all_reads_only_stateful_workspaces() {
    let tree = create_workspace_tree();
    let stub = write_stub_terraform(tree.path(), PROD_STATE, PROD_OUTPUTS);
    let base = tree.path().canonicalize().unwrap();

    let mut workspaces = discover::discover_workspaces(&base);
    let terraform = TerraformCli::from_options(Some(stub.to_str().unwrap()));
    let loaded = loader::load_all(&terraform, &mut workspaces, false);

    assert_eq!(loaded, 1);
    assert_eq!(workspaces[0].resources.len(), 3);
    assert!(workspaces[0].outputs.contains_key("realm_id"));
    assert!(workspaces[1].resources.is_empty());
}

#[cfg(unix)]
#[test]
fn test_full_pipeline_summaries() {
    let tree = create_workspace_tree();
    let run = analyzed_run(&tree);

    let totals = run.totals();
    assert_eq!(totals.total_workspaces, 2);
    assert_eq!(totals.total_resources, 3);
    assert_eq!(totals.workspaces_with_state, 1);
    assert_eq!(run.category_total(Category::Realms), 1);
    assert_eq!(run.category_total(Category::Users), 2);

    let prod = run.get("prod").unwrap();
    assert_eq!(prod.resource_count, 3);
    assert_eq!(prod.category_count(Category::Realms), 1);
    assert_eq!(prod.category_count(Category::Users), 2);
    assert!(prod.error.is_none());
    assert_eq!(prod.outputs.as_ref().unwrap().len(), 2);

    let users = prod
        .detailed_analysis
        .as_ref()
        .unwrap()
        .user_security
        .as_ref()
        .unwrap();
    assert_eq!(users.total_users, 2);
    assert_eq!(users.users_with_passwords, 1);
    assert_eq!(users.users_without_passwords, 1);
    assert_eq!(users.temporary_passwords, 1);
    assert_eq!(users.enabled_users, 2);
    assert_eq!(users.user_details[0].username, "alice");
    assert_eq!(users.user_details[1].username, "bob");

    let staging = run.get("staging").unwrap();
    assert_eq!(staging.resource_count, 0);
    assert_eq!(staging.error.as_deref(), Some(NO_RESOURCES_ERROR));
    assert!(staging.detailed_analysis.is_none());
    assert!(staging.outputs.is_none());
}

#[cfg(unix)]
#[test]
fn test_json_export_round_trips() {
    use keycloak_tf_audit::report::export::{self, ExportDocument};

    let tree = create_workspace_tree();
    let run = analyzed_run(&tree);

    let out_dir = TempDir::new().unwrap();
    let json_path = out_dir.path().join("audit.json");
    export::write_json(&json_path, &run).unwrap();
    assert!(json_path.exists());

    let reloaded: ExportDocument =
        serde_json::from_reader(fs::File::open(&json_path).unwrap()).unwrap();
    chrono::DateTime::parse_from_rfc3339(&reloaded.timestamp).unwrap();
    assert_eq!(reloaded.analysis_summary.total_resources, 3);
    assert_eq!(reloaded.workspaces.len(), 2);
    assert_eq!(reloaded.workspaces["prod"].category_count(Category::Users), 2);
    assert_eq!(
        reloaded.workspaces["staging"].error.as_deref(),
        Some(NO_RESOURCES_ERROR)
    );

    // a second write parses identically apart from its timestamp
    let mut first = ExportDocument::from_run(&run);
    let mut second = ExportDocument::from_run(&run);
    first.timestamp = String::new();
    second.timestamp = String::new();
    assert_eq!(first, second);
}

#[cfg(unix)]
#[test]
fn test_csv_export_lists_each_user() {
    use keycloak_tf_audit::report::export;

    let tree = create_workspace_tree();
    let run = analyzed_run(&tree);

    let out_dir = TempDir::new().unwrap();
    let csv_path = out_dir.path().join("users.csv");
    export::write_user_csv(&csv_path, &run).unwrap();

    let contents = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "workspace,username,email,enabled,has_password,temporary_password"
    );
    assert_eq!(lines[1], "prod,alice,alice@acme.io,true,true,true");
    assert_eq!(lines[2], "prod,bob,,true,false,false");
}

#[cfg(unix)]
#[test]
fn test_no_state_workspace_never_invokes_terraform() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let base = tmp.path();
    fs::create_dir_all(base.join("staging")).unwrap();
    fs::write(base.join("staging/main.tf"), "# no state here\n").unwrap();

    // stub records every invocation in a marker file
    let marker = base.join("invoked");
    let stub = base.join("terraform-stub");
    fs::write(
        &stub,
        format!("#!/bin/sh\ntouch \"{}\"\necho '{{}}'\n", marker.display()),
    )
    .unwrap();
    let mut perms = fs::metadata(&stub).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&stub, perms).unwrap();

    let canonical = base.canonicalize().unwrap();
    let mut workspaces = discover::discover_workspaces(&canonical);
    let terraform = TerraformCli::from_options(Some(stub.to_str().unwrap()));
    let loaded = loader::load_all(&terraform, &mut workspaces, false);

    assert_eq!(loaded, 0);
    assert!(!marker.exists());
}

#[test]
fn test_empty_root_exits_nonzero() {
    let empty = TempDir::new().unwrap();
    fs::create_dir_all(empty.path().join("docs")).unwrap();

    let output = std::process::Command::new("cargo")
        .args(["run", "--quiet", "--", "--path"])
        .arg(empty.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No Terraform workspaces found"));
}

#[cfg(unix)]
#[test]
fn test_renderers_accept_pipeline_output() {
    use keycloak_tf_audit::report::{select_reporter, DetailFilter, Render};

    let tree = create_workspace_tree();
    let run = analyzed_run(&tree);

    for styled in [false, true] {
        let reporter = select_reporter(styled);
        let mut buf = Vec::new();
        reporter.overview(&mut buf, &run).unwrap();
        reporter.detail(&mut buf, &run, DetailFilter::Users).unwrap();
        reporter.detail(&mut buf, &run, DetailFilter::Realms).unwrap();
        reporter.complete(&mut buf, &run).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("prod"));
        assert!(text.contains("alice"));
        assert!(text.contains("acme"));
    }
}
