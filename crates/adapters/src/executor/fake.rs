// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake plan executor for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ExecError, PlanExecutor, PlanRequest, PlanWorkspace};
use async_trait::async_trait;
use parking_lot::Mutex;
use pc_core::{Plan, ScenarioName};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Recorded executor call
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutorCall {
    Prepare {
        scenario: ScenarioName,
        module_dir: PathBuf,
    },
    Plan {
        scenario: ScenarioName,
        vars: serde_json::Value,
    },
    Cleanup {
        scenario: ScenarioName,
    },
}

impl ExecutorCall {
    pub fn scenario(&self) -> &ScenarioName {
        match self {
            ExecutorCall::Prepare { scenario, .. }
            | ExecutorCall::Plan { scenario, .. }
            | ExecutorCall::Cleanup { scenario } => scenario,
        }
    }
}

#[derive(Default)]
struct FakeExecutorState {
    plans: HashMap<String, Plan>,
    default_plan: Option<Plan>,
    plan_failures: HashMap<String, String>,
    prepare_failures: HashMap<String, String>,
    panics: HashSet<String>,
    delays: HashMap<String, Duration>,
    calls: Vec<ExecutorCall>,
    open_workspaces: usize,
}

/// Fake plan executor with canned plans and failures per scenario
#[derive(Clone, Default)]
pub struct FakePlanExecutor {
    inner: Arc<Mutex<FakeExecutorState>>,
}

impl FakePlanExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `plan` for scenario `name`.
    pub fn set_plan(&self, name: &str, plan: Plan) {
        self.inner.lock().plans.insert(name.to_string(), plan);
    }

    /// Return `plan` for any scenario without its own.
    pub fn set_default_plan(&self, plan: Plan) {
        self.inner.lock().default_plan = Some(plan);
    }

    /// Make `plan` fail for scenario `name` as a non-zero terraform exit.
    pub fn fail_plan(&self, name: &str, stderr: &str) {
        self.inner
            .lock()
            .plan_failures
            .insert(name.to_string(), stderr.to_string());
    }

    /// Make `prepare` fail for scenario `name`.
    pub fn fail_prepare(&self, name: &str, message: &str) {
        self.inner
            .lock()
            .prepare_failures
            .insert(name.to_string(), message.to_string());
    }

    /// Panic inside `plan` for scenario `name`.
    pub fn panic_on(&self, name: &str) {
        self.inner.lock().panics.insert(name.to_string());
    }

    /// Delay `plan` for scenario `name`.
    pub fn set_delay(&self, name: &str, delay: Duration) {
        self.inner.lock().delays.insert(name.to_string(), delay);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ExecutorCall> {
        self.inner.lock().calls.clone()
    }

    /// Calls recorded for one scenario, in order
    pub fn calls_for(&self, name: &str) -> Vec<ExecutorCall> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| c.scenario() == name)
            .cloned()
            .collect()
    }

    /// Workspaces handed out by `prepare` and not yet cleaned up
    pub fn open_workspaces(&self) -> usize {
        self.inner.lock().open_workspaces
    }
}

#[async_trait]
impl PlanExecutor for FakePlanExecutor {
    async fn prepare(&self, request: &PlanRequest) -> Result<PlanWorkspace, ExecError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ExecutorCall::Prepare {
            scenario: request.scenario.clone(),
            module_dir: request.module_dir.clone(),
        });
        if let Some(message) = inner.prepare_failures.get(request.scenario.as_str()) {
            return Err(ExecError::Io(std::io::Error::other(message.clone())));
        }
        inner.open_workspaces += 1;
        Ok(PlanWorkspace::detached(
            request.scenario.clone(),
            PathBuf::from("/fake").join(request.scenario.as_str()),
        ))
    }

    async fn plan(
        &self,
        _workspace: &PlanWorkspace,
        request: &PlanRequest,
    ) -> Result<Plan, ExecError> {
        let name = request.scenario.as_str();
        let delay = {
            let mut inner = self.inner.lock();
            inner.calls.push(ExecutorCall::Plan {
                scenario: request.scenario.clone(),
                vars: request.vars.clone(),
            });
            inner.delays.get(name).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let inner = self.inner.lock();
        if inner.panics.contains(name) {
            drop(inner);
            #[allow(clippy::panic)]
            {
                panic!("fake executor panic for {}", name);
            }
        }
        if let Some(stderr) = inner.plan_failures.get(name) {
            return Err(ExecError::NonZeroExit {
                command: "terraform plan".to_string(),
                code: Some(1),
                stderr: stderr.clone(),
            });
        }
        inner
            .plans
            .get(name)
            .or(inner.default_plan.as_ref())
            .cloned()
            .ok_or_else(|| ExecError::Aborted(format!("no canned plan for {}", name)))
    }

    async fn cleanup(&self, workspace: PlanWorkspace) -> Result<(), ExecError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ExecutorCall::Cleanup {
            scenario: workspace.scenario().clone(),
        });
        inner.open_workspaces = inner.open_workspaces.saturating_sub(1);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
