// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

/// Scenarios planned at once when nothing else is configured.
pub const FALLBACK_JOBS: usize = 4;

/// Default concurrency: `PLANCHECK_JOBS`, else [`FALLBACK_JOBS`].
///
/// Zero and unparsable values are ignored.
pub fn default_jobs() -> usize {
    std::env::var("PLANCHECK_JOBS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(FALLBACK_JOBS)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
