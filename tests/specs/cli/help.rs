//! CLI help specs

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    cli()
        .passes()
        .stdout_has("Usage: plancheck")
        .stdout_has("run")
        .stdout_has("list")
        .stdout_has("show");
}

#[test]
fn run_help_lists_source_and_executor_flags() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--builtin <MODULE_ROOT>")
        .stdout_has("--dir <DIR>")
        .stdout_has("--scenario <FILTER>")
        .stdout_has("--no-init")
        .stdout_has("--keep-workdir");
}

#[test]
fn version_flag_prints_version() {
    cli()
        .args(&["--version"])
        .passes()
        .stdout_has("plancheck ");
}
