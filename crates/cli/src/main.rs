// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! plancheck - terraform plan assertions for the Synapse module

mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use output::OutputFormat;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use commands::{list, run, show};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "plancheck",
    version,
    about = "Plan a terraform module under named scenarios and assert on the planned resources"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    /// More log output on stderr (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the selected scenarios and check their assertions
    Run(run::RunArgs),
    /// List scenarios with their assertion counts
    List(list::ListArgs),
    /// Print the variables a scenario plans with
    Show(show::ShowArgs),
}

pub(crate) fn cli_command() -> clap::Command {
    Cli::command().styles(color::styles())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain to avoid noisy duplicate output (common when
/// thiserror variants use `#[error("... {0}")]` with `#[from]`).
/// Otherwise we render the full chain so context isn't lost.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

/// Log filter: `RUST_LOG` when set, otherwise `warn` raised by `-v`.
fn log_filter(verbose: u8) -> EnvFilter {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn setup_logging(verbose: u8) {
    // Logs go to stderr so JSON on stdout stays parseable.
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(color::should_colorize_stderr())
        .with_target(false);
    let _ = tracing_subscriber::registry()
        .with(log_filter(verbose))
        .with(layer)
        .try_init();
}

async fn run() -> Result<()> {
    let cli = Cli::from_arg_matches(&cli_command().get_matches())?;
    setup_logging(cli.verbose);
    let format = cli.output;

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // No subcommand: print help and exit 0
            cli_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Run(args) => run::handle(args, format).await,
        Commands::List(args) => list::handle(args, format),
        Commands::Show(args) => show::handle(args, format),
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
