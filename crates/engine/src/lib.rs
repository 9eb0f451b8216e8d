// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Scenario runner: plans scenarios concurrently and checks their assertions

pub mod env;
mod error;
mod report;
mod runner;

pub use error::ScenarioError;
pub use report::{RunReport, ScenarioReport};
pub use runner::{run_scenario, Runner, RunnerConfig};
