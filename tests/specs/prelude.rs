//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running plancheck against a fake terraform.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR does not hold the build (shared target directories).
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>.
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

fn plancheck_binary() -> PathBuf {
    binary_path("plancheck")
}

/// Create a CLI builder for plancheck commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            dir: None,
            envs: vec![("NO_COLOR".into(), "1".into())],
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = Command::new(plancheck_binary());
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        // Parent settings would change log volume, color, or parallelism.
        for var in ["RUST_LOG", "COLOR", "PLANCHECK_JOBS", "PLANCHECK_TERRAFORM"] {
            cmd.env_remove(var);
        }

        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    fn output(self) -> Output {
        self.command().output().expect("command should run")
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.output();
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.output();
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect a specific exit code
    pub fn exits_with(self, code: i32) -> RunAssert {
        let output = self.output();
        assert_eq!(
            output.status.code(),
            Some(code),
            "unexpected exit code\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout())
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout()))
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stderr equals expected exactly (with diff on failure).
    pub fn stderr_eq(self, expected: &str) -> Self {
        let stderr = self.stderr();
        similar_asserts::assert_eq!(stderr, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stdout does not contain substring.
    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}

// =============================================================================
// Fake terraform
// =============================================================================

/// Stands in for terraform. Finds the scenario name from the workspace
/// directory in `TF_DATA_DIR`, logs `<scenario> <subcommand>`, and answers
/// `show` from `plans/<scenario>.json` (or `plans/default.json`).
/// `plans/<scenario>.fail` makes `plan` exit 1 with that file as stderr.
const FAKE_TERRAFORM: &str = r#"#!/bin/sh
for arg in "$@"; do
  case "$arg" in
    -*) ;;
    *) cmd="$arg"; break ;;
  esac
done
ws=$(basename "$(dirname "$TF_DATA_DIR")")
name=${ws#plancheck-}
name=${name%-*}
echo "$name $cmd" >> "$PLANCHECK_SPEC_DIR/calls.log"
plans="$PLANCHECK_SPEC_DIR/plans"
case "$cmd" in
  plan)
    if [ -f "$plans/$name.fail" ]; then
      cat "$plans/$name.fail" >&2
      exit 1
    fi
    ;;
  show)
    if [ -f "$plans/$name.json" ]; then
      cat "$plans/$name.json"
    else
      cat "$plans/default.json"
    fi
    ;;
esac
exit 0
"#;

/// One planned resource for [`plan_json`].
pub struct Planned {
    pub resource_type: &'static str,
    pub name: &'static str,
    pub key: Option<&'static str>,
    pub after: serde_json::Value,
}

pub fn planned(resource_type: &'static str, name: &'static str, after: serde_json::Value) -> Planned {
    Planned {
        resource_type,
        name,
        key: None,
        after,
    }
}

pub fn planned_instance(
    resource_type: &'static str,
    name: &'static str,
    key: &'static str,
    after: serde_json::Value,
) -> Planned {
    Planned {
        resource_type,
        name,
        key: Some(key),
        after,
    }
}

/// Render resources as `terraform show -json` output, all being created.
pub fn plan_json(resources: &[Planned]) -> String {
    let changes: Vec<serde_json::Value> = resources
        .iter()
        .map(|r| {
            let address = match r.key {
                Some(key) => format!("{}.{}[\"{}\"]", r.resource_type, r.name, key),
                None => format!("{}.{}", r.resource_type, r.name),
            };
            serde_json::json!({
                "address": address,
                "mode": "managed",
                "type": r.resource_type,
                "name": r.name,
                "index": r.key,
                "change": {
                    "actions": ["create"],
                    "after": r.after,
                    "after_unknown": {}
                }
            })
        })
        .collect();
    serde_json::json!({
        "format_version": "1.2",
        "terraform_version": "1.9.5",
        "resource_changes": changes
    })
    .to_string()
}

/// A plan that satisfies every built-in Synapse scenario.
pub fn full_synapse_plan() -> String {
    plan_json(&[
        planned(
            "azurerm_synapse_workspace",
            "main",
            serde_json::json!({ "name": "synw-synapseprod-prod-weu", "public_network_access_enabled": false }),
        ),
        planned(
            "azurerm_synapse_workspace_security_alert_policy",
            "main",
            serde_json::json!({ "policy_state": "Enabled" }),
        ),
        planned_instance(
            "azurerm_synapse_sql_pool",
            "dedicated_pools",
            "datapool",
            serde_json::json!({ "sku_name": "DW100c" }),
        ),
        planned_instance(
            "azurerm_synapse_spark_pool",
            "pools",
            "sparkpool",
            serde_json::json!({ "node_size_family": "MemoryOptimized", "node_count": 3 }),
        ),
        planned(
            "azurerm_private_endpoint",
            "synapse_sql",
            serde_json::json!({ "name": "pe-synapse-sql" }),
        ),
        planned(
            "azurerm_private_endpoint",
            "synapse_dev",
            serde_json::json!({ "name": "pe-synapse-dev" }),
        ),
    ])
}

// =============================================================================
// Project
// =============================================================================

/// Temporary checkout of the module plus a fake terraform on disk.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    /// Module root with `examples/basic` and `examples/complete`, and a
    /// fake terraform whose default plan satisfies every built-in scenario.
    pub fn new() -> Self {
        let project = Self::empty();
        project.file("module/examples/basic/main.tf", "");
        project.file("module/examples/complete/main.tf", "");
        project.file("bin/terraform", FAKE_TERRAFORM);
        let script = project.path().join("bin/terraform");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        project.default_plan(&full_synapse_plan());
        project
    }

    /// A bare temporary directory
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn module_root(&self) -> PathBuf {
        self.path().join("module")
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Plan returned for scenarios without their own
    pub fn default_plan(&self, json: &str) {
        self.file("plans/default.json", json);
    }

    /// Plan returned for one scenario
    pub fn plan(&self, scenario: &str, json: &str) {
        self.file(format!("plans/{scenario}.json"), json);
    }

    /// Make `terraform plan` fail for one scenario with this stderr
    pub fn fail_plan(&self, scenario: &str, stderr: &str) {
        self.file(format!("plans/{scenario}.fail"), stderr);
    }

    /// `<scenario> <subcommand>` lines written by the fake terraform
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Run plancheck in this project with the fake terraform
    pub fn plancheck(&self) -> CliBuilder {
        cli()
            .pwd(self.path())
            .env("PLANCHECK_TERRAFORM", self.path().join("bin/terraform"))
            .env("PLANCHECK_SPEC_DIR", self.path())
    }

    /// `plancheck <subcommand> --builtin <module root> <args...>`
    pub fn builtin(&self, subcommand: &str, args: &[&str]) -> CliBuilder {
        let root = self.module_root();
        let root = root.to_string_lossy();
        let mut all = vec![subcommand, "--builtin", root.as_ref()];
        all.extend_from_slice(args);
        self.plancheck().args(&all)
    }
}
