//! `plancheck show` specs

use crate::prelude::*;

#[test]
fn show_prints_the_var_file() {
    let project = Project::new();
    let run = project.builtin("show", &[]).args(&["naming"]).passes();
    let vars = run.json();
    assert_eq!(vars["resource_group_name"], "rg-test-synapse-naming");
    assert_eq!(vars["environment"], "prod");
    assert_eq!(vars["naming_prefix"], "synapseprod");
    assert_eq!(vars["location"], "westeurope");
}

#[test]
fn show_keeps_declaration_order() {
    let project = Project::new();
    let stdout = project
        .builtin("show", &[])
        .args(&["security"])
        .passes()
        .stdout();
    let first_key = stdout
        .lines()
        .nth(1)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    assert!(first_key.starts_with("\"resource_group_name\""), "{stdout}");
}

#[test]
fn show_json_wraps_vars_with_assertions() {
    let project = Project::new();
    let run = project
        .builtin("show", &["-o", "json"])
        .args(&["private_endpoint"])
        .passes();
    let shown = run.json();
    assert_eq!(shown["name"], "private_endpoint");
    assert_eq!(shown["vars"]["public_network_access_enabled"], false);
    assert!(shown["vars"]["private_endpoints"]["synapse_dev"]["subnet_id"]
        .as_str()
        .unwrap()
        .starts_with("/subscriptions/"));
    assert_eq!(shown["assertions"].as_array().unwrap().len(), 3);
}

#[test]
fn show_unknown_scenario_is_a_usage_error() {
    let project = Project::new();
    project
        .builtin("show", &[])
        .args(&["nope"])
        .exits_with(2)
        .stderr_eq("Error: unknown scenario: nope\n");
}
