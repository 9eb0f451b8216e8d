// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for scenario runs

use pc_adapters::ExecError;
use pc_core::AssertError;
use thiserror::Error;

/// Why a scenario failed
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// No plan was produced; assertions were not attempted.
    #[error("plan execution failed: {0}")]
    Execution(#[from] ExecError),

    /// The plan was produced but assertion `index` (zero-based) did not hold.
    #[error("assertion #{} ({assertion}) failed: {source}", index + 1)]
    Assertion {
        index: usize,
        assertion: String,
        #[source]
        source: AssertError,
    },
}

impl ScenarioError {
    /// Short classification for summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            ScenarioError::Execution(_) => "execution",
            ScenarioError::Assertion { .. } => "assertion",
        }
    }
}
