// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: pastel cyan / steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Muted / secondary text: darker grey
    pub const MUTED: u8 = 240;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Same rules as [`should_colorize`], checked against stderr (log output).
pub fn should_colorize_stderr() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stderr().is_terminal()
}

/// Clap help styles using the CLI palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    let header = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER))));
    let literal = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL))));
    let muted = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::MUTED))));
    Styles::styled()
        .header(header)
        .usage(header)
        .literal(literal)
        .placeholder(muted)
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

/// Format text with the header color (steel blue).
pub fn header(text: &str) -> String {
    if should_colorize() {
        format!("{}{}{}", fg256(codes::HEADER), text, RESET)
    } else {
        text.to_string()
    }
}

/// Format text with the muted color (darker grey).
pub fn muted(text: &str) -> String {
    if should_colorize() {
        format!("{}{}{}", fg256(codes::MUTED), text, RESET)
    } else {
        text.to_string()
    }
}

/// Apply green (ANSI 32) to text, respecting color settings.
pub fn green(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }
    format!("\x1b[32m{text}{RESET}")
}

/// Apply red (ANSI 31) to text, respecting color settings.
pub fn red(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }
    format!("\x1b[31m{text}{RESET}")
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
