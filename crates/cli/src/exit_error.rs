// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process exit codes carried through `anyhow`

use std::fmt;

/// At least one scenario failed.
pub const FAILED: i32 = 1;
/// Bad flags, unreadable scenarios, or nothing to run.
pub const USAGE: i32 = 2;

/// An error that asks `main` to exit with a specific code.
///
/// An empty message exits quietly; the command already printed what the
/// user needs to see.
#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(USAGE, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}
