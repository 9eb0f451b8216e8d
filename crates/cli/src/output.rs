// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON rendering for command output

use crate::color;
use clap::ValueEnum;
use pc_core::format_elapsed_ms;
use pc_engine::{RunReport, ScenarioError, ScenarioReport};
use pc_scenario::Scenario;
use serde::Serialize;
use std::fmt::Write;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Continuation lines of multi-line errors (terraform stderr) line up under
/// the detail column.
const INDENT: &str = "      ";

fn millis(elapsed: std::time::Duration) -> u64 {
    elapsed.as_millis() as u64
}

// --- run ---

/// One line per scenario, then a summary line.
pub fn format_run_text(report: &RunReport) -> String {
    let width = report
        .scenarios
        .iter()
        .map(|r| r.name.as_str().len())
        .max()
        .unwrap_or(0);

    let mut buf = String::new();
    for scenario in &report.scenarios {
        let name = scenario.name.as_str();
        match scenario.error() {
            None => {
                let detail = match scenario.resources {
                    Some(n) => format!(
                        "{} resources, {}",
                        n,
                        format_elapsed_ms(millis(scenario.elapsed))
                    ),
                    None => format_elapsed_ms(millis(scenario.elapsed)),
                };
                let _ = writeln!(
                    buf,
                    "{}  {name:<width$}  {}",
                    color::green("PASS"),
                    color::muted(&detail)
                );
            }
            Some(err) => {
                let message = err.to_string();
                let mut lines = message.lines();
                let first = lines.next().unwrap_or_default();
                let _ = writeln!(buf, "{}  {name:<width$}  {first}", color::red("FAIL"));
                for line in lines {
                    let _ = writeln!(buf, "{INDENT}{line}");
                }
            }
        }
    }

    if !report.scenarios.is_empty() {
        buf.push('\n');
    }
    let summary = format!(
        "{} passed, {} failed in {}",
        report.passed_count(),
        report.failed_count(),
        format_elapsed_ms(millis(report.elapsed))
    );
    let summary = if report.passed() {
        color::green(&summary)
    } else {
        color::red(&summary)
    };
    let _ = writeln!(buf, "{summary}");
    buf
}

#[derive(Debug, Serialize)]
pub struct RunJson<'a> {
    pub run_id: &'a str,
    pub passed: bool,
    pub passed_count: usize,
    pub failed_count: usize,
    pub elapsed_ms: u64,
    pub scenarios: Vec<ScenarioJson<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ScenarioJson<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<usize>,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureJson>,
}

#[derive(Debug, Serialize)]
pub struct FailureJson {
    pub kind: &'static str,
    /// One-based, matching the text output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion: Option<usize>,
    pub message: String,
}

impl<'a> From<&'a ScenarioReport> for ScenarioJson<'a> {
    fn from(report: &'a ScenarioReport) -> Self {
        Self {
            name: report.name.as_str(),
            description: report.description.as_deref(),
            status: if report.passed() { "passed" } else { "failed" },
            resources: report.resources,
            elapsed_ms: millis(report.elapsed),
            error: report.error().map(|err| FailureJson {
                kind: err.kind(),
                assertion: match err {
                    ScenarioError::Assertion { index, .. } => Some(index + 1),
                    ScenarioError::Execution(_) => None,
                },
                message: err.to_string(),
            }),
        }
    }
}

pub fn run_json(report: &RunReport) -> RunJson<'_> {
    RunJson {
        run_id: &report.run_id,
        passed: report.passed(),
        passed_count: report.passed_count(),
        failed_count: report.failed_count(),
        elapsed_ms: millis(report.elapsed),
        scenarios: report.scenarios.iter().map(ScenarioJson::from).collect(),
    }
}

// --- list / show ---

/// Aligned `NAME  ASSERTIONS  MODULE` table, description last.
pub fn format_list_text(scenarios: &[Scenario]) -> String {
    if scenarios.is_empty() {
        return "No scenarios found\n".to_string();
    }
    let rows: Vec<[String; 4]> = scenarios
        .iter()
        .map(|s| {
            [
                s.name.to_string(),
                s.assertions.len().to_string(),
                s.module_dir.display().to_string(),
                s.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    let headers = ["NAME", "ASSERTIONS", "MODULE", "DESCRIPTION"];
    let widths: Vec<usize> = (0..3)
        .map(|col| {
            rows.iter()
                .map(|row| row[col].len())
                .chain(std::iter::once(headers[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let columns = |cells: [&str; 3]| {
        format!(
            "{:<w0$}  {:>w1$}  {:<w2$}",
            cells[0],
            cells[1],
            cells[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        )
    };

    let mut buf = String::new();
    let header_line = format!(
        "{}  {}",
        columns([headers[0], headers[1], headers[2]]),
        headers[3]
    );
    let _ = writeln!(buf, "{}", color::header(&header_line));
    for row in &rows {
        let line = columns([row[0].as_str(), row[1].as_str(), row[2].as_str()]);
        if row[3].is_empty() {
            let _ = writeln!(buf, "{}", line.trim_end());
        } else {
            let _ = writeln!(buf, "{line}  {}", color::muted(&row[3]));
        }
    }
    buf
}

#[derive(Debug, Serialize)]
pub struct ScenarioSummaryJson<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub module_dir: String,
    pub assertions: Vec<String>,
}

impl<'a> From<&'a Scenario> for ScenarioSummaryJson<'a> {
    fn from(scenario: &'a Scenario) -> Self {
        Self {
            name: scenario.name.as_str(),
            description: scenario.description.as_deref(),
            module_dir: scenario.module_dir.display().to_string(),
            assertions: scenario.assertions.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShowJson<'a> {
    #[serde(flatten)]
    pub summary: ScenarioSummaryJson<'a>,
    pub vars: serde_json::Value,
}

pub fn show_json(scenario: &Scenario) -> ShowJson<'_> {
    ShowJson {
        summary: ScenarioSummaryJson::from(scenario),
        vars: scenario.params.to_json(),
    }
}
