// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal styling for pvconv output.
//!
//! Respects NO_COLOR and FORCE_COLOR.

use colored::{ColoredString, Colorize};

/// Set color override from the environment. Call once at startup.
pub fn init() {
    if std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    } else if std::env::var("FORCE_COLOR").is_ok() {
        colored::control::set_override(true);
    }
}

pub fn error_label() -> ColoredString {
    "error".red().bold()
}

pub fn hint_label() -> ColoredString {
    "hint".cyan()
}

pub fn error_arrow() -> ColoredString {
    "-->".blue()
}

pub fn line_number(n: u32) -> ColoredString {
    format!("{:3}", n).blue().bold()
}

pub fn pipe() -> ColoredString {
    "|".blue()
}

pub fn caret() -> ColoredString {
    "^".red().bold()
}

pub fn banner_ok(phase: &str) -> String {
    format!("{} {} {}", "===".dimmed(), format!("{} OK", phase).green().bold(), "===".dimmed())
}

pub fn banner_fail(phase: &str, count: usize) -> String {
    let msg = if count == 1 {
        format!("{} FAILED: 1 error", phase)
    } else {
        format!("{} FAILED: {} errors", phase, count)
    };
    format!("{} {} {}", "===".dimmed(), msg.red().bold(), "===".dimmed())
}

pub fn title(name: &str) -> ColoredString {
    name.bold()
}

pub fn version(v: &str) -> ColoredString {
    v.dimmed()
}

pub fn section_header(header: &str) -> ColoredString {
    header.yellow().bold()
}

pub fn command(name: &str) -> ColoredString {
    name.green()
}

pub fn arg(name: &str) -> ColoredString {
    name.cyan()
}

pub fn file_path(path: &str) -> ColoredString {
    path.underline()
}
