// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concurrent scenario runner

use crate::{env, RunReport, ScenarioError, ScenarioReport};
use pc_adapters::{ExecError, PlanExecutor, PlanRequest};
use pc_core::check_all;
use pc_scenario::Scenario;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::Instrument;

/// Runner settings
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    /// Maximum scenarios in flight at once (at least 1).
    pub jobs: usize,
    /// Only run scenarios whose name contains this text.
    pub filter: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            jobs: env::default_jobs(),
            filter: None,
        }
    }
}

impl RunnerConfig {
    pub fn selects(&self, scenario: &Scenario) -> bool {
        match &self.filter {
            Some(text) => scenario.name.as_str().contains(text.as_str()),
            None => true,
        }
    }
}

/// Runs each scenario as an independent task against a shared executor
#[derive(Clone)]
pub struct Runner<E> {
    executor: E,
    config: RunnerConfig,
}

impl<E: PlanExecutor> Runner<E> {
    pub fn new(executor: E, config: RunnerConfig) -> Self {
        Self { executor, config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run the selected scenarios and report them in input order.
    ///
    /// Scenarios share nothing but the executor handle; one failing or
    /// panicking never changes a sibling's outcome.
    pub async fn run(&self, scenarios: Vec<Scenario>) -> RunReport {
        let run_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();
        let selected: Vec<Scenario> = scenarios
            .into_iter()
            .filter(|s| self.config.selects(s))
            .collect();
        let jobs = self.config.jobs.max(1);
        tracing::info!(%run_id, scenarios = selected.len(), jobs, "run starting");

        let semaphore = Arc::new(Semaphore::new(jobs));
        let mut handles = Vec::with_capacity(selected.len());
        for scenario in selected {
            let executor = self.executor.clone();
            let semaphore = Arc::clone(&semaphore);
            let name = scenario.name.clone();
            let description = scenario.description.clone();
            let span = tracing::info_span!("scenario", name = %name, %run_id);
            let handle = tokio::spawn(
                async move {
                    // Never closed; a failed acquire runs unthrottled.
                    let _permit = semaphore.acquire_owned().await.ok();
                    run_scenario(&executor, scenario).await
                }
                .instrument(span),
            );
            handles.push((name, description, handle));
        }

        let mut reports = Vec::with_capacity(handles.len());
        for (name, description, handle) in handles {
            let report = match handle.await {
                Ok(report) => report,
                Err(join_err) => {
                    let message = task_failure_message(join_err);
                    tracing::error!(scenario = %name, %message, "scenario task failed");
                    ScenarioReport {
                        name,
                        description,
                        outcome: Err(ScenarioError::Execution(ExecError::Aborted(message))),
                        resources: None,
                        elapsed: Duration::ZERO,
                    }
                }
            };
            reports.push(report);
        }

        let report = RunReport {
            run_id,
            scenarios: reports,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            run_id = %report.run_id,
            passed = report.passed_count(),
            failed = report.failed_count(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "run finished"
        );
        report
    }
}

/// Plan one scenario and check its assertions.
///
/// `cleanup` runs on every path once `prepare` has handed out a workspace.
pub async fn run_scenario<E: PlanExecutor>(executor: &E, scenario: Scenario) -> ScenarioReport {
    let start = Instant::now();
    let request = PlanRequest::new(
        scenario.name.clone(),
        scenario.module_dir.clone(),
        scenario.params.to_json(),
    );

    let mut resources = None;
    let outcome = match executor.prepare(&request).await {
        Err(e) => Err(ScenarioError::Execution(e)),
        Ok(workspace) => {
            let outcome = match executor.plan(&workspace, &request).await {
                Err(e) => Err(ScenarioError::Execution(e)),
                Ok(plan) => {
                    resources = Some(plan.len());
                    check_all(&plan, &scenario.assertions).map_err(|(index, source)| {
                        ScenarioError::Assertion {
                            index,
                            assertion: scenario
                                .assertions
                                .get(index)
                                .map(ToString::to_string)
                                .unwrap_or_default(),
                            source,
                        }
                    })
                }
            };
            if let Err(e) = executor.cleanup(workspace).await {
                tracing::warn!(error = %e, "cleanup failed");
            }
            outcome
        }
    };

    let elapsed = start.elapsed();
    match &outcome {
        Ok(()) => tracing::info!(
            assertions = scenario.assertions.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "scenario passed"
        ),
        Err(e) => tracing::warn!(
            kind = e.kind(),
            error = %e,
            elapsed_ms = elapsed.as_millis() as u64,
            "scenario failed"
        ),
    }

    ScenarioReport {
        name: scenario.name,
        description: scenario.description,
        outcome,
        resources,
        elapsed,
    }
}

fn task_failure_message(err: JoinError) -> String {
    if err.is_cancelled() {
        return "scenario task was cancelled".to_string();
    }
    let payload = err.into_panic();
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    format!("scenario task panicked: {}", detail)
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
