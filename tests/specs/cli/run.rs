//! `plancheck run` specs against the built-in Synapse scenarios

use crate::prelude::*;

#[test]
fn all_builtin_scenarios_pass_against_full_plan() {
    let project = Project::new();
    project
        .builtin("run", &[])
        .passes()
        .stdout_has("PASS  basic")
        .stdout_has("PASS  security")
        .stdout_has("PASS  private_endpoint")
        .stdout_has("PASS  naming")
        .stdout_has("PASS  git_integration")
        .stdout_has("6 resources")
        .stdout_has("5 passed, 0 failed");
}

#[test]
fn every_scenario_runs_init_plan_show() {
    let project = Project::new();
    project.builtin("run", &["--jobs", "1"]).passes();

    let calls = project.calls();
    assert_eq!(calls.len(), 15, "{calls:?}");
    for name in ["basic", "security", "private_endpoint", "naming", "git_integration"] {
        let mine: Vec<&str> = calls
            .iter()
            .filter_map(|c| c.strip_prefix(&format!("{name} ")))
            .collect();
        assert_eq!(mine, vec!["init", "plan", "show"], "{name}: {calls:?}");
    }
}

#[test]
fn no_init_skips_terraform_init() {
    let project = Project::new();
    project.builtin("run", &["--no-init", "-s", "naming"]).passes();
    assert_eq!(project.calls(), vec!["naming plan", "naming show"]);
}

#[test]
fn filter_runs_only_matching_scenarios() {
    let project = Project::new();
    project
        .builtin("run", &["--scenario", "int"])
        .passes()
        .stdout_has("PASS  private_endpoint")
        .stdout_has("PASS  git_integration")
        .stdout_lacks("basic")
        .stdout_has("2 passed, 0 failed");
}

#[test]
fn missing_resource_fails_with_assertion_detail() {
    let project = Project::new();
    project.plan(
        "security",
        &plan_json(&[planned(
            "azurerm_synapse_workspace",
            "main",
            serde_json::json!({ "name": "synw-test" }),
        )]),
    );
    project
        .builtin("run", &[])
        .exits_with(1)
        .stdout_has(
            "assertion #2 (azurerm_synapse_workspace_security_alert_policy.main exists) failed: \
             resource azurerm_synapse_workspace_security_alert_policy.main not found in plan",
        )
        .stdout_has("4 passed, 1 failed");
}

#[test]
fn naming_checks_the_planned_workspace_name() {
    let project = Project::new();
    project.plan(
        "naming",
        &plan_json(&[planned(
            "azurerm_synapse_workspace",
            "main",
            serde_json::json!({ "name": "synw-test-weu" }),
        )]),
    );
    project
        .builtin("run", &["-s", "naming"])
        .exits_with(1)
        .stdout_has("FAIL  naming")
        .stdout_has("expected to contain \"prod\", got \"synw-test-weu\"");
}

#[test]
fn extra_private_endpoint_fails_the_count() {
    let project = Project::new();
    project.plan(
        "private_endpoint",
        &plan_json(&[
            planned("azurerm_private_endpoint", "synapse_sql", serde_json::json!({})),
            planned("azurerm_private_endpoint", "synapse_dev", serde_json::json!({})),
            planned("azurerm_private_endpoint", "synapse_web", serde_json::json!({})),
        ]),
    );
    project
        .builtin("run", &["-s", "private_endpoint"])
        .exits_with(1)
        .stdout_has("expected 2 azurerm_private_endpoint resource(s), found 3");
}

#[test]
fn terraform_failure_is_isolated_to_its_scenario() {
    let project = Project::new();
    project.fail_plan("git_integration", "Error: No valid credential sources found\n");
    project
        .builtin("run", &[])
        .exits_with(1)
        .stdout_has("FAIL  git_integration ")
        .stdout_has("plan execution failed: terraform plan exited with exit code 1:")
        .stdout_has("      Error: No valid credential sources found")
        .stdout_has("PASS  security")
        .stdout_has("4 passed, 1 failed");
}

#[test]
fn json_report_carries_each_outcome() {
    let project = Project::new();
    project.fail_plan("basic", "Error: boom\n");
    let run = project.builtin("run", &["-o", "json"]).exits_with(1);
    let report = run.json();

    assert_eq!(report["passed"], false);
    assert_eq!(report["passed_count"], 4);
    assert_eq!(report["failed_count"], 1);
    let scenarios = report["scenarios"].as_array().unwrap();
    let names: Vec<&str> = scenarios.iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["basic", "security", "private_endpoint", "naming", "git_integration"]
    );
    assert_eq!(scenarios[0]["status"], "failed");
    assert_eq!(scenarios[0]["error"]["kind"], "execution");
    assert_eq!(scenarios[1]["status"], "passed");
    assert_eq!(scenarios[1]["resources"], 6);
}

#[test]
fn scratch_directories_are_removed_after_the_run() {
    let project = Project::new();
    let tmp = project.path().join("tmp");
    std::fs::create_dir_all(&tmp).unwrap();
    project.builtin("run", &[]).env("TMPDIR", &tmp).passes();
    assert_eq!(std::fs::read_dir(&tmp).unwrap().count(), 0);
}

#[test]
fn keep_workdir_leaves_var_files_behind() {
    let project = Project::new();
    let tmp = project.path().join("tmp");
    std::fs::create_dir_all(&tmp).unwrap();
    project
        .builtin("run", &["--keep-workdir", "-s", "naming"])
        .env("TMPDIR", &tmp)
        .passes();

    let kept: Vec<_> = std::fs::read_dir(&tmp).unwrap().flatten().collect();
    assert_eq!(kept.len(), 1);
    let vars = std::fs::read_to_string(kept[0].path().join("plancheck.tfvars.json")).unwrap();
    let vars: serde_json::Value = serde_json::from_str(&vars).unwrap();
    assert_eq!(vars["environment"], "prod");
    assert_eq!(vars["naming_prefix"], "synapseprod");
}
