// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `plancheck show`: print the variables a scenario would plan with

use super::SourceArgs;
use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use pc_scenario::Scenario;

#[derive(Args, Debug, Clone, Default)]
pub struct ShowArgs {
    /// Scenario name
    pub name: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn handle(args: ShowArgs, format: OutputFormat) -> Result<()> {
    let scenarios = args.source.load()?;
    let scenario = select(scenarios, &args.name)?;
    match format {
        // Byte-for-byte what the executor writes as the var file.
        OutputFormat::Text => println!("{}", serde_json::to_string_pretty(&scenario.params.to_json())?),
        OutputFormat::Json => output::print_json(&output::show_json(&scenario))?,
    }
    Ok(())
}

/// Exact name match.
pub fn select(scenarios: Vec<Scenario>, name: &str) -> Result<Scenario> {
    scenarios
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| ExitError::usage(format!("unknown scenario: {name}")).into())
}
