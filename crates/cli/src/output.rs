//! Terminal output utilities
//!
//! Status lines go to stdout, except errors and warnings which go to stderr
//! so that a Gradle `doLast` capturing stdout still surfaces them.

use owo_colors::OwoColorize;
use std::fmt::Display;
use std::time::Duration;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: impl Display) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: impl Display) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: impl Display) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: impl Display) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a section title underlined to its own width
    pub fn header(title: impl Display) {
        let title = title.to_string();
        println!();
        println!("{}", title.bold());
        println!("{}", "─".repeat(title.chars().count()));
    }

    /// Print a subheader
    pub fn subheader(title: impl Display) {
        println!();
        println!("{}", title.bold().dimmed());
    }

    /// Print an aligned `key: value` line
    pub fn field(key: &str, value: impl Display) {
        println!("  {:<24} {}", format!("{}:", key).dimmed(), value);
    }
}

/// Format a build duration, e.g. `850ms`, `12.4s`, `3m 7s`
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    match millis {
        0..=999 => format!("{}ms", millis),
        1_000..=59_999 => format!("{:.1}s", duration.as_secs_f64()),
        _ => {
            let secs = duration.as_secs();
            format!("{}m {}s", secs / 60, secs % 60)
        }
    }
}

/// Format a package size in binary units, e.g. `512 B`, `48.25 MB`
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if size < 1024.0 {
            break;
        }
        size /= 1024.0;
        unit = next;
    }
    format!("{:.2} {}", size, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        assert_eq!(format_duration(Duration::from_millis(5_500)), "5.5s");
    }

    #[test]
    fn test_format_duration_mins() {
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(500), "500 B");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }
}
