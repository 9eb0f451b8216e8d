// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::SourceArgs;
use crate::output::{self, OutputFormat, ScenarioSummaryJson};
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn handle(args: ListArgs, format: OutputFormat) -> Result<()> {
    let scenarios = args.source.load()?;
    match format {
        OutputFormat::Text => print!("{}", output::format_list_text(&scenarios)),
        OutputFormat::Json => {
            let summaries: Vec<ScenarioSummaryJson<'_>> =
                scenarios.iter().map(ScenarioSummaryJson::from).collect();
            output::print_json(&summaries)?;
        }
    }
    Ok(())
}
