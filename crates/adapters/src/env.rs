// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use crate::subprocess::TERRAFORM_TIMEOUT;
use std::path::PathBuf;
use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

/// Terraform binary to invoke (default: `terraform` on `PATH`).
pub fn terraform_binary() -> PathBuf {
    non_empty("PLANCHECK_TERRAFORM")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("terraform"))
}

/// Per-command timeout for terraform invocations (default: 30 minutes).
pub fn command_timeout() -> Duration {
    parse_duration_ms("PLANCHECK_TIMEOUT_MS").unwrap_or(TERRAFORM_TIMEOUT)
}

/// Shared provider plugin cache, passed through as `TF_PLUGIN_CACHE_DIR`.
pub fn plugin_cache_dir() -> Option<PathBuf> {
    non_empty("PLANCHECK_PLUGIN_CACHE_DIR").map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
