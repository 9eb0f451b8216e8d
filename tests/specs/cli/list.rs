//! `plancheck list` specs

use crate::prelude::*;

#[test]
fn list_shows_builtin_scenarios_with_assertion_counts() {
    let project = Project::new();
    let root = project.module_root().display().to_string();
    let stdout = project.builtin("list", &[]).passes().stdout();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 6, "{stdout}");
    assert!(lines[0].starts_with("NAME              ASSERTIONS  MODULE"), "{stdout}");
    assert!(lines[0].ends_with("  DESCRIPTION"), "{stdout}");
    let expected = [
        ("basic", 1, "basic", "Minimal workspace from the basic example"),
        ("security", 4, "complete", "one SQL and one Spark pool"),
        ("private_endpoint", 3, "complete", "SQL and Dev private endpoints"),
        ("naming", 1, "basic", "flows into the workspace name"),
        ("git_integration", 1, "complete", "Workspace wired to a GitHub repository"),
    ];
    for (line, (name, count, example, description)) in lines[1..].iter().zip(expected) {
        let prefix = format!("{name:<16}  {count:>10}  {root}/examples/{example}");
        assert!(line.starts_with(&prefix), "expected '{prefix}' in:\n{stdout}");
        assert!(line.ends_with(description), "{stdout}");
    }
}

#[test]
fn list_json_includes_assertions() {
    let project = Project::new();
    let run = project.builtin("list", &["-o", "json"]).passes();
    let list = run.json();
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 5);
    assert_eq!(list[2]["name"], "private_endpoint");
    assert_eq!(
        list[2]["assertions"][2],
        "exactly 2 azurerm_private_endpoint resource(s)"
    );
}

#[test]
fn list_never_runs_terraform() {
    let project = Project::new();
    project.builtin("list", &[]).passes();
    assert!(project.calls().is_empty());
}
