// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terraform CLI executor

use super::{ExecError, PlanExecutor, PlanRequest, PlanWorkspace};
use crate::env;
use crate::subprocess::{run_with_timeout, tail, SubprocessError, STDERR_TAIL_LINES};
use async_trait::async_trait;
use pc_core::Plan;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

/// Terraform executor settings
#[derive(Debug, Clone, PartialEq)]
pub struct TerraformConfig {
    /// Binary to run.
    pub binary: PathBuf,
    /// Applies to each of init, plan, and show separately.
    pub timeout: Duration,
    /// Run `terraform init` before planning.
    pub init: bool,
    /// Leave scratch directories on disk after the run.
    pub keep_workdir: bool,
    pub plugin_cache_dir: Option<PathBuf>,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            binary: env::terraform_binary(),
            timeout: env::command_timeout(),
            init: true,
            keep_workdir: false,
            plugin_cache_dir: env::plugin_cache_dir(),
        }
    }
}

/// Plans scenarios by shelling out to the terraform CLI
#[derive(Debug, Clone, Default)]
pub struct TerraformExecutor {
    config: TerraformConfig,
}

impl TerraformExecutor {
    pub fn new(config: TerraformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TerraformConfig {
        &self.config
    }

    /// Build a terraform command for one scenario: `-chdir` into the module,
    /// isolated data dir, no prompts.
    fn command(&self, workspace: &PlanWorkspace, request: &PlanRequest, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.config.binary);
        cmd.arg(format!("-chdir={}", request.module_dir.display()))
            .args(args)
            .env("TF_IN_AUTOMATION", "1")
            .env("TF_INPUT", "0")
            .env("TF_DATA_DIR", workspace.data_dir())
            .stdin(Stdio::null());
        if let Some(cache) = &self.config.plugin_cache_dir {
            cmd.env("TF_PLUGIN_CACHE_DIR", cache);
        }
        cmd
    }

    async fn terraform(
        &self,
        workspace: &PlanWorkspace,
        request: &PlanRequest,
        args: &[&str],
    ) -> Result<Output, ExecError> {
        let description = format!("terraform {}", args.first().copied().unwrap_or_default());
        let cmd = self.command(workspace, request, args);
        tracing::debug!(scenario = %request.scenario, command = %description, "running");

        let output = run_with_timeout(cmd, self.config.timeout, &description)
            .await
            .map_err(|e| match e {
                SubprocessError::Spawn { source, .. } => ExecError::Spawn {
                    command: description.clone(),
                    message: format!("{} ({})", source, self.config.binary.display()),
                },
                SubprocessError::Timeout { timeout, .. } => ExecError::Timeout {
                    command: description.clone(),
                    timeout,
                },
            })?;

        if !output.status.success() {
            return Err(ExecError::NonZeroExit {
                command: description,
                code: output.status.code(),
                stderr: tail(&output.stderr, STDERR_TAIL_LINES),
            });
        }
        Ok(output)
    }
}

#[async_trait]
impl PlanExecutor for TerraformExecutor {
    async fn prepare(&self, request: &PlanRequest) -> Result<PlanWorkspace, ExecError> {
        if !request.module_dir.is_dir() {
            return Err(ExecError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("module directory {} does not exist", request.module_dir.display()),
            )));
        }

        let dir = tempfile::Builder::new()
            .prefix(&workdir_prefix(request.scenario.as_str()))
            .tempdir()?;
        let workspace = PlanWorkspace::new(request.scenario.clone(), dir);

        let vars = serde_json::to_vec_pretty(&request.vars).map_err(std::io::Error::other)?;
        tokio::fs::write(workspace.var_file(), vars).await?;
        tokio::fs::create_dir_all(workspace.data_dir()).await?;
        Ok(workspace)
    }

    async fn plan(&self, workspace: &PlanWorkspace, request: &PlanRequest) -> Result<Plan, ExecError> {
        if self.config.init {
            self.terraform(workspace, request, &["init", "-input=false", "-no-color"])
                .await?;
        }

        let var_file = format!("-var-file={}", workspace.var_file().display());
        let out = format!("-out={}", workspace.plan_file().display());
        self.terraform(
            workspace,
            request,
            &["plan", "-input=false", "-no-color", "-lock=false", &var_file, &out],
        )
        .await?;

        let plan_file = workspace.plan_file();
        let plan_file = plan_file.to_string_lossy();
        let output = self
            .terraform(workspace, request, &["show", "-json", &plan_file])
            .await?;

        Ok(Plan::from_bytes(&output.stdout)?)
    }

    async fn cleanup(&self, workspace: PlanWorkspace) -> Result<(), ExecError> {
        if self.config.keep_workdir {
            let scenario = workspace.scenario().clone();
            let path = workspace.keep();
            tracing::info!(%scenario, path = %path.display(), "kept scenario workdir");
            return Ok(());
        }
        workspace.remove()?;
        Ok(())
    }
}

/// Scratch directory prefix for a scenario. Names may contain path
/// separators or other characters the filesystem rejects.
fn workdir_prefix(scenario: &str) -> String {
    let safe: String = scenario
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    format!("plancheck-{}-", safe)
}

#[cfg(test)]
#[path = "terraform_tests.rs"]
mod tests;
