// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario and run reports

use crate::ScenarioError;
use pc_core::ScenarioName;
use std::time::Duration;

/// Outcome of one scenario
#[derive(Debug)]
pub struct ScenarioReport {
    pub name: ScenarioName,
    pub description: Option<String>,
    pub outcome: Result<(), ScenarioError>,
    /// Planned resources, when a plan was produced.
    pub resources: Option<usize>,
    pub elapsed: Duration,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&ScenarioError> {
        self.outcome.as_ref().err()
    }
}

/// Outcome of a whole run, scenarios in input order
#[derive(Debug)]
pub struct RunReport {
    pub run_id: String,
    pub scenarios: Vec<ScenarioReport>,
    pub elapsed: Duration,
}

impl RunReport {
    /// True when every scenario passed (vacuously true for an empty run).
    pub fn passed(&self) -> bool {
        self.scenarios.iter().all(ScenarioReport::passed)
    }

    pub fn passed_count(&self) -> usize {
        self.scenarios.iter().filter(|r| r.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.scenarios.len() - self.passed_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.scenarios.iter().filter(|r| !r.passed())
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioReport> {
        self.scenarios.iter().find(|r| r.name == name)
    }
}
