// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared human-readable duration formatting.

/// Format seconds as a short human-readable duration: `"5s"`, `"2m"`, `"1h30m"`.
///
/// Minutes keep their seconds when non-zero (`"2m5s"`) since plan runs
/// usually land in that range.
pub fn format_elapsed(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        let m = secs / 60;
        let s = secs % 60;
        if s > 0 {
            format!("{}m{}s", m, s)
        } else {
            format!("{}m", m)
        }
    } else {
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        if m > 0 {
            format!("{}h{}m", h, m)
        } else {
            format!("{}h", h)
        }
    }
}

/// Format milliseconds as a short human-readable duration.
///
/// Sub-second values keep millisecond precision (`"850ms"`); everything
/// else goes through [`format_elapsed`].
pub fn format_elapsed_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format_elapsed(ms / 1000)
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
