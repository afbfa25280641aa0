use std::fmt::Display;

use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::logging::PRINT_TARGET;

pub const TOTAL_WIDTH: usize = 64;
const KEY_WIDTH: usize = 14;

/// Writes a line to stderr through the logging layer, without a level symbol.
pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn banner(quiet: bool) {
    if quiet {
        return;
    }

    let text_content = format!("⟦ RECKON v{} ⟧", env!("CARGO_PKG_VERSION"));
    let text_width = UnicodeWidthStr::width(text_content.as_str());
    let side = "═".repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2).bright_black();
    print(&format!("{}{}{}", side, text_content.bright_green().bold(), side));
}

pub fn header(msg: &str, quiet: bool) {
    if quiet {
        return;
    }

    let formatted = format!("⟦ {} ⟧", msg.to_uppercase());
    let dash_count = TOTAL_WIDTH.saturating_sub(console::measure_text_width(&formatted));
    let left = dash_count / 2;
    let right = dash_count - left;

    print(&format!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        formatted.bright_green(),
        "─".repeat(right).bright_black()
    ));
}

pub fn aligned_line(key: &str, value: impl Display) {
    let dots = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.width()));
    print(&format!(
        "{} {}{}{} {}",
        ">".bright_black(),
        key.cyan(),
        dots.bright_black(),
        ":".bright_black(),
        value
    ));
}

/// Renders `(name, count)` pairs as `a 3, b 1`.
pub fn tally<'a>(pairs: impl IntoIterator<Item = (&'a String, &'a usize)>) -> String {
    let parts: Vec<String> = pairs
        .into_iter()
        .map(|(name, count)| format!("{} {}", name, count.to_string().green().bold()))
        .collect();
    if parts.is_empty() {
        "none".dimmed().to_string()
    } else {
        parts.join(", ")
    }
}

pub fn end_of_program(quiet: bool) {
    if quiet {
        return;
    }
    print(&"═".repeat(TOTAL_WIDTH).bright_black().to_string());
}
