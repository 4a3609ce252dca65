//! UI helpers for CLI display.

use console::style;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var("NO_COLOR").is_ok()
}

/// Styled section header.
#[must_use]
pub fn header(text: &str) -> String {
    if is_color_disabled() {
        format!("=== {text} ===")
    } else {
        style(format!("=== {text} ===")).bold().cyan().to_string()
    }
}

/// `[PASS]` or `[FAIL]` marker.
#[must_use]
pub fn status(passed: bool) -> String {
    let label = if passed { "[PASS]" } else { "[FAIL]" };
    if is_color_disabled() {
        label.to_string()
    } else if passed {
        style(label).green().bold().to_string()
    } else {
        style(label).red().bold().to_string()
    }
}

/// Print an error message.
pub fn print_error(text: &str) {
    if is_color_disabled() {
        eprintln!("[ERROR] {text}");
    } else {
        eprintln!("{} {text}", style("[ERROR]").red().bold());
    }
}
