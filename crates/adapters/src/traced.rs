// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::executor::{ExecError, PlanExecutor, PlanRequest, PlanWorkspace};
use async_trait::async_trait;
use pc_core::Plan;
use tracing::Instrument;

/// Wrapper that adds tracing to any PlanExecutor
#[derive(Clone)]
pub struct TracedExecutor<E> {
    inner: E,
}

impl<E> TracedExecutor<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

#[async_trait]
impl<E: PlanExecutor> PlanExecutor for TracedExecutor<E> {
    async fn prepare(&self, request: &PlanRequest) -> Result<PlanWorkspace, ExecError> {
        let span = tracing::info_span!(
            "executor.prepare",
            scenario = %request.scenario,
            module = %request.module_dir.display()
        );
        async {
            let result = self.inner.prepare(request).await;
            match &result {
                Ok(ws) => tracing::debug!(workdir = %ws.path().display(), "workspace ready"),
                Err(e) => tracing::error!(error = %e, "prepare failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn plan(
        &self,
        workspace: &PlanWorkspace,
        request: &PlanRequest,
    ) -> Result<Plan, ExecError> {
        let span = tracing::info_span!("executor.plan", scenario = %request.scenario);
        async {
            tracing::info!("planning");
            let start = std::time::Instant::now();
            let result = self.inner.plan(workspace, request).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(plan) => tracing::info!(
                    elapsed_ms,
                    resources = plan.len(),
                    terraform_version = plan.terraform_version.as_deref().unwrap_or("unknown"),
                    "plan produced"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "plan failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn cleanup(&self, workspace: PlanWorkspace) -> Result<(), ExecError> {
        let scenario = workspace.scenario().clone();
        let result = self.inner.cleanup(workspace).await;
        tracing::info_span!("executor.cleanup", %scenario).in_scope(|| match &result {
            Ok(()) => tracing::debug!("cleaned up"),
            Err(e) => tracing::warn!(error = %e, "cleanup failed"),
        });
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
