// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `plancheck run`: plan every selected scenario and check its assertions

use super::SourceArgs;
use crate::exit_error::{self, ExitError};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use pc_adapters::{PlanExecutor, TerraformConfig, TerraformExecutor, TracedExecutor};
use pc_engine::{RunReport, Runner, RunnerConfig};
use pc_scenario::Scenario;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only run scenarios whose name contains this text
    #[arg(long, short = 's', value_name = "FILTER")]
    pub scenario: Option<String>,

    /// Maximum scenarios planned at once [default: $PLANCHECK_JOBS or 4]
    #[arg(long, short = 'j', value_name = "N", value_parser = parse_jobs)]
    pub jobs: Option<usize>,

    /// Terraform binary [default: $PLANCHECK_TERRAFORM or terraform]
    #[arg(long, value_name = "BIN")]
    pub terraform: Option<PathBuf>,

    /// Skip `terraform init` (the module must already be initialized)
    #[arg(long)]
    pub no_init: bool,

    /// Leave each scenario's scratch directory on disk
    #[arg(long)]
    pub keep_workdir: bool,
}

fn parse_jobs(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl RunArgs {
    pub fn terraform_config(&self) -> TerraformConfig {
        let mut config = TerraformConfig::default();
        if let Some(binary) = &self.terraform {
            config.binary = binary.clone();
        }
        config.init = !self.no_init;
        config.keep_workdir = self.keep_workdir;
        config
    }

    pub fn runner_config(&self) -> RunnerConfig {
        let mut config = RunnerConfig::default();
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        config.filter = self.scenario.clone();
        config
    }
}

pub async fn handle(args: RunArgs, format: OutputFormat) -> Result<()> {
    let scenarios = args.source.load()?;
    let executor = TracedExecutor::new(TerraformExecutor::new(args.terraform_config()));
    let report = execute(executor, args.runner_config(), scenarios).await?;

    match format {
        OutputFormat::Text => print!("{}", output::format_run_text(&report)),
        OutputFormat::Json => output::print_json(&output::run_json(&report))?,
    }
    outcome(&report)
}

/// Run the scenarios the filter selects. Selecting nothing is a usage error,
/// not a vacuous pass.
pub async fn execute<E: PlanExecutor>(
    executor: E,
    config: RunnerConfig,
    scenarios: Vec<Scenario>,
) -> Result<RunReport> {
    if !scenarios.iter().any(|s| config.selects(s)) {
        let message = match &config.filter {
            Some(filter) => format!("no scenario name contains '{filter}'"),
            None => "no scenarios found".to_string(),
        };
        return Err(ExitError::usage(message).into());
    }
    Ok(Runner::new(executor, config).run(scenarios).await)
}

/// Exit status for a finished run. The report already names each failure.
pub fn outcome(report: &RunReport) -> Result<()> {
    if report.passed() {
        Ok(())
    } else {
        Err(ExitError::new(exit_error::FAILED, "").into())
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
