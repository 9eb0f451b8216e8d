//! Scenarios declared in files (`--dir`)

use crate::prelude::*;

const SCENARIOS_HCL: &str = r#"
scenario "dev_workspace" {
  description = "Dev workspace with a custom prefix"
  module      = "../module/examples/basic"
  vars = {
    resource_group_name = "rg-dev"
    environment         = "dev"
    naming_prefix       = "synapsedev"
  }

  expect "workspace" {
    exists = "azurerm_synapse_workspace.main"
  }

  expect "prefix" {
    address     = "azurerm_synapse_workspace.main"
    attribute   = "name"
    starts_with = "synw-"
  }
}
"#;

const SCENARIOS_TOML: &str = r#"
[scenario.public_access]
module = "../module/examples/complete"

[scenario.public_access.vars]
public_network_access_enabled = false

[[scenario.public_access.expect]]
address = "azurerm_synapse_workspace.main"
attribute = "public_network_access_enabled"
equals = false
"#;

#[test]
fn file_scenarios_run_with_relative_module_paths() {
    let project = Project::new();
    project.file("scenarios/dev.hcl", SCENARIOS_HCL);
    project.file("scenarios/access.toml", SCENARIOS_TOML);

    project
        .plancheck()
        .args(&["run", "--dir", "scenarios"])
        .passes()
        .stdout_has("PASS  public_access")
        .stdout_has("PASS  dev_workspace")
        .stdout_has("2 passed, 0 failed");
}

#[test]
fn file_scenarios_follow_builtins_in_list() {
    let project = Project::new();
    project.file("scenarios/dev.hcl", SCENARIOS_HCL);
    let root = project.module_root();
    let stdout = project
        .plancheck()
        .args(&["list", "--dir", "scenarios", "--builtin", root.to_str().unwrap()])
        .passes()
        .stdout();
    let names: Vec<&str> = stdout
        .lines()
        .skip(1)
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(
        names,
        vec!["basic", "security", "private_endpoint", "naming", "git_integration", "dev_workspace"]
    );
}

#[test]
fn show_prints_file_scenario_vars() {
    let project = Project::new();
    project.file("scenarios/dev.hcl", SCENARIOS_HCL);
    let run = project
        .plancheck()
        .args(&["show", "dev_workspace", "--dir", "scenarios"])
        .passes();
    assert_eq!(
        run.stdout(),
        "{\n  \"resource_group_name\": \"rg-dev\",\n  \"environment\": \"dev\",\n  \"naming_prefix\": \"synapsedev\"\n}\n"
    );
}

#[test]
fn duplicate_names_across_files_are_rejected() {
    let project = Project::new();
    project.file("scenarios/a.hcl", SCENARIOS_HCL);
    project.file("scenarios/b.hcl", SCENARIOS_HCL);
    project
        .plancheck()
        .args(&["list", "--dir", "scenarios"])
        .exits_with(2)
        .stderr_has("scenario 'dev_workspace' defined in both");
}

#[test]
fn file_scenario_failure_names_the_assertion() {
    let project = Project::new();
    project.file("scenarios/dev.hcl", SCENARIOS_HCL);
    project.plan(
        "dev_workspace",
        &plan_json(&[planned(
            "azurerm_synapse_workspace",
            "main",
            serde_json::json!({ "name": "ws-dev" }),
        )]),
    );
    project
        .plancheck()
        .args(&["run", "--dir", "scenarios"])
        .exits_with(1)
        .stdout_has("assertion #2 (azurerm_synapse_workspace.main.name should start with \"synw-\") failed");
}
