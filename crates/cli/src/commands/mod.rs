// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod list;
pub mod run;
pub mod show;

use crate::exit_error::ExitError;
use anyhow::Result;
use clap::Args;
use pc_scenario::{load_scenarios, synapse, Scenario};
use std::path::PathBuf;

/// Where scenarios come from. At least one source is required.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Directory of scenario files (.hcl, .toml, .json), searched recursively
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Include the built-in Synapse scenarios for the module checked out here
    #[arg(long, value_name = "MODULE_ROOT")]
    pub builtin: Option<PathBuf>,
}

impl SourceArgs {
    /// Built-in scenarios first, then directory scenarios in file order.
    pub fn load(&self) -> Result<Vec<Scenario>> {
        if self.dir.is_none() && self.builtin.is_none() {
            return Err(ExitError::usage("no scenario source given (use --dir and/or --builtin)").into());
        }

        let mut scenarios = Vec::new();
        if let Some(root) = &self.builtin {
            let catalog = synapse::catalog(root).map_err(|e| {
                anyhow::Error::new(e).context(ExitError::usage("invalid built-in scenario"))
            })?;
            scenarios.extend(catalog);
        }
        if let Some(dir) = &self.dir {
            let loaded = load_scenarios(dir).map_err(|e| {
                anyhow::Error::new(e).context(ExitError::usage(format!(
                    "failed to load scenarios from {}",
                    dir.display()
                )))
            })?;
            for scenario in loaded {
                if scenarios.iter().any(|s| s.name == scenario.name) {
                    return Err(ExitError::usage(format!(
                        "scenario '{}' in {} shadows a built-in scenario",
                        scenario.name,
                        dir.display()
                    ))
                    .into());
                }
                scenarios.push(scenario);
            }
        }
        tracing::debug!(count = scenarios.len(), "scenarios loaded");
        Ok(scenarios)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
