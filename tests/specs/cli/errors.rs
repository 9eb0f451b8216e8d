//! CLI error handling specs
//!
//! Usage, configuration, and load errors exit 2; failed scenarios exit 1.

use crate::prelude::*;

#[test]
fn run_without_source_is_a_usage_error() {
    let project = Project::new();
    project
        .plancheck()
        .args(&["run"])
        .exits_with(2)
        .stderr_eq("Error: no scenario source given (use --dir and/or --builtin)\n");
    assert!(project.calls().is_empty());
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    cli().args(&["apply"]).exits_with(2).stderr_has("unrecognized subcommand");
}

#[test]
fn filter_matching_nothing_is_a_usage_error() {
    let project = Project::new();
    project
        .builtin("run", &["--scenario", "nope"])
        .exits_with(2)
        .stderr_has("Error: no scenario name contains 'nope'");
    assert!(project.calls().is_empty());
}

#[test]
fn zero_jobs_is_rejected() {
    let project = Project::new();
    project
        .builtin("run", &["--jobs", "0"])
        .exits_with(2)
        .stderr_has("must be at least 1");
}

#[test]
fn broken_scenario_file_names_the_file() {
    let project = Project::new();
    project.file("scenarios/broken.hcl", "scenario \"x\" {\n  module = \n");
    project
        .plancheck()
        .args(&["run", "--dir", "scenarios"])
        .exits_with(2)
        .stderr_has("Error: failed to load scenarios from scenarios")
        .stderr_has("Caused by:")
        .stderr_has("broken.hcl");
}

#[test]
fn missing_scenario_dir_is_a_usage_error() {
    let project = Project::new();
    project
        .plancheck()
        .args(&["list", "--dir", "nowhere"])
        .exits_with(2)
        .stderr_has("scenario directory nowhere does not exist");
}

#[test]
fn missing_terraform_binary_fails_the_scenario() {
    let project = Project::new();
    project
        .builtin("run", &["--scenario", "basic", "--terraform", "/no/such/terraform"])
        .exits_with(1)
        .stdout_has("FAIL  basic  plan execution failed: failed to start terraform init");
}
