// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use std::process::Output;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Default timeout for a single terraform command (init, plan, or show).
pub const TERRAFORM_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Lines of stderr kept when a command fails.
pub const STDERR_TAIL_LINES: usize = 20;

/// Why a subprocess produced no output
#[derive(Debug, Error)]
pub enum SubprocessError {
    #[error("{description} failed to start: {source}")]
    Spawn {
        description: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{description} timed out after {}s", timeout.as_secs())]
    Timeout {
        description: String,
        timeout: Duration,
    },
}

/// Run a subprocess command with a timeout.
///
/// Wraps `Command::output()` with `tokio::time::timeout`. The child is
/// marked `kill_on_drop`, so it is killed when the timeout elapses.
/// A non-zero exit status is not an error here; callers inspect `Output`.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, SubprocessError> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(source)) => Err(SubprocessError::Spawn {
            description: description.to_string(),
            source,
        }),
        Err(_elapsed) => Err(SubprocessError::Timeout {
            description: description.to_string(),
            timeout,
        }),
    }
}

/// Last `lines` lines of a captured stream, lossily decoded and trimmed.
pub fn tail(bytes: &[u8], lines: usize) -> String {
    let text = String::from_utf8_lossy(bytes);
    let all: Vec<&str> = text.trim_end().lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
