// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan executors: turn a module directory and input variables into a plan

mod terraform;

pub use terraform::{TerraformConfig, TerraformExecutor};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ExecutorCall, FakePlanExecutor};

use async_trait::async_trait;
use pc_core::{Plan, PlanError, ScenarioName};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use thiserror::Error;

/// File name of the generated var file inside a scenario workspace.
pub const VAR_FILE_NAME: &str = "plancheck.tfvars.json";

/// File name of the saved plan inside a scenario workspace.
pub const PLAN_FILE_NAME: &str = "plan.tfplan";

/// Errors from plan execution
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to start {command}: {message}")]
    Spawn { command: String, message: String },

    #[error("{command} timed out after {}s", timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    #[error("{command} exited with {}{}", exit_label(*code), stderr_suffix(stderr))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        /// Tail of the captured stderr.
        stderr: String,
    },

    #[error("malformed plan output: {0}")]
    MalformedOutput(#[from] PlanError),

    #[error("scenario workspace I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("aborted: {0}")]
    Aborted(String),
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{}", stderr)
    }
}

/// Everything an executor needs to plan one scenario
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub scenario: ScenarioName,
    /// Root module to plan.
    pub module_dir: PathBuf,
    /// Input variables, written verbatim as the var file.
    pub vars: serde_json::Value,
}

impl PlanRequest {
    pub fn new(
        scenario: impl Into<ScenarioName>,
        module_dir: impl Into<PathBuf>,
        vars: serde_json::Value,
    ) -> Self {
        Self {
            scenario: scenario.into(),
            module_dir: module_dir.into(),
            vars,
        }
    }
}

/// Per-scenario scratch directory.
///
/// Holds the var file, the saved plan, and terraform's data directory, so
/// concurrent scenarios never share `.terraform` state. The directory is
/// removed when the workspace is dropped unless it was kept.
#[derive(Debug)]
pub struct PlanWorkspace {
    scenario: ScenarioName,
    root: PathBuf,
    guard: Option<TempDir>,
}

impl PlanWorkspace {
    /// Workspace backed by a temp dir that is removed on drop.
    pub fn new(scenario: ScenarioName, dir: TempDir) -> Self {
        Self {
            scenario,
            root: dir.path().to_path_buf(),
            guard: Some(dir),
        }
    }

    /// Workspace that owns nothing on disk.
    pub fn detached(scenario: ScenarioName, root: impl Into<PathBuf>) -> Self {
        Self {
            scenario,
            root: root.into(),
            guard: None,
        }
    }

    pub fn scenario(&self) -> &ScenarioName {
        &self.scenario
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn var_file(&self) -> PathBuf {
        self.root.join(VAR_FILE_NAME)
    }

    pub fn plan_file(&self) -> PathBuf {
        self.root.join(PLAN_FILE_NAME)
    }

    /// `TF_DATA_DIR` for this scenario.
    pub fn data_dir(&self) -> PathBuf {
        self.root.join("tf-data")
    }

    /// Remove the scratch directory now, reporting failures.
    pub fn remove(self) -> std::io::Result<()> {
        match self.guard {
            Some(dir) => dir.close(),
            None => Ok(()),
        }
    }

    /// Leave the scratch directory on disk and return its path.
    pub fn keep(self) -> PathBuf {
        match self.guard {
            Some(dir) => dir.keep(),
            None => self.root,
        }
    }
}

/// Adapter that produces a plan for a scenario.
///
/// The runner calls `prepare`, then `plan`, then always `cleanup` with the
/// workspace `prepare` returned, whatever `plan` did.
#[async_trait]
pub trait PlanExecutor: Clone + Send + Sync + 'static {
    /// Acquire the per-scenario workspace (scratch dir, var file).
    async fn prepare(&self, request: &PlanRequest) -> Result<PlanWorkspace, ExecError>;

    /// Produce the plan. Never applies anything.
    async fn plan(&self, workspace: &PlanWorkspace, request: &PlanRequest)
        -> Result<Plan, ExecError>;

    /// Release the workspace.
    async fn cleanup(&self, workspace: PlanWorkspace) -> Result<(), ExecError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
