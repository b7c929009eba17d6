//! Colored console output helpers.
//!
//! This module is separate from the pipeline logic so the library stays
//! usable without printing side effects. Output is human-readable and not
//! part of the contract.

use colored::Colorize;
use unicode_width::UnicodeWidthChar;

use crate::{
    scanner::UsageLocation,
    validator::{LanguageReport, ValidationReport},
};

/// Success mark for consistent output formatting
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
/// Failure mark for consistent output formatting
pub const FAILURE_MARK: &str = "\u{2717}"; // ✗
/// Warning mark for consistent output formatting
pub const WARNING_MARK: &str = "\u{26a0}"; // ⚠
/// Info mark for consistent output formatting
pub const INFO_MARK: &str = "\u{2139}"; // ℹ

const MAX_CONTEXT_WIDTH: usize = 80;

pub fn success(message: &str) {
    println!("{} {}", SUCCESS_MARK.green(), message.green());
}

pub fn error(message: &str) {
    eprintln!("{} {}", FAILURE_MARK.red(), message.red());
}

pub fn warning(message: &str) {
    println!("{} {}", WARNING_MARK.yellow(), message.yellow());
}

pub fn info(message: &str) {
    println!("{} {}", INFO_MARK.blue(), message.blue());
}

/// Section banner, e.g. `==== Analysis Results ====`.
pub fn banner(title: &str) {
    let rule = "=".repeat(60);
    println!("{}", rule.blue());
    println!("{}", title.blue());
    println!("{}", rule.blue());
    println!();
}

/// Truncate to a display-width budget, appending `...` when cut. Uses
/// Unicode display width so CJK text does not overshoot the terminal.
pub fn truncate_display(text: &str, max_width: usize) -> String {
    let mut width = 0;
    for (index, c) in text.char_indices() {
        width += c.width().unwrap_or(0);
        if width > max_width.saturating_sub(3) {
            // Room left for the ellipsis
            return format!("{}...", &text[..index]);
        }
    }
    text.to_string()
}

/// Print where a key is used in the scanned source.
pub fn print_usage_locations<'a>(
    locations: impl IntoIterator<Item = (&'a String, &'a Vec<UsageLocation>)>,
) {
    println!("\n  Used in:");
    for (file_name, file_locations) in locations {
        for location in file_locations {
            println!("    {}:{}", file_name, location.line);
            println!(
                "      {}",
                truncate_display(&location.text, MAX_CONTEXT_WIDTH).cyan()
            );
        }
    }
}

fn print_language(lang: &LanguageReport) {
    if !lang.missing_keys.is_empty() {
        warning(&format!(
            "{}: Missing keys: {}",
            lang.locale,
            lang.missing_keys.join(", ")
        ));
    }
    if !lang.extra_keys.is_empty() {
        warning(&format!(
            "{}: Extra keys: {}",
            lang.locale,
            lang.extra_keys.join(", ")
        ));
    }
    if !lang.empty_keys.is_empty() {
        warning(&format!(
            "{}: Empty values: {}",
            lang.locale,
            lang.empty_keys.join(", ")
        ));
    }
    for mismatch in &lang.placeholder_mismatches {
        let expected: Vec<&str> = mismatch.expected.iter().map(String::as_str).collect();
        let found: Vec<&str> = mismatch.found.iter().map(String::as_str).collect();
        println!(
            "{}: {}: placeholder mismatch on '{}': expected {{{}}}, found {{{}}}",
            "error".bold().red(),
            lang.locale,
            mismatch.key,
            expected.join(", "),
            found.join(", ")
        );
    }

    let mark = if lang.is_complete() {
        SUCCESS_MARK.green()
    } else {
        WARNING_MARK.yellow()
    };
    println!("  {} {}: {:.1}% complete", mark, lang.locale, lang.completion);
}

/// Print the per-language findings and the final summary distinguishing
/// errors (must-fix) from warnings (informational).
pub fn print_validation_report(report: &ValidationReport) {
    for lang in &report.languages {
        print_language(lang);
    }

    let warnings: usize = report
        .languages
        .iter()
        .map(|lang| {
            [&lang.missing_keys, &lang.extra_keys, &lang.empty_keys]
                .iter()
                .map(|list| list.len())
                .sum::<usize>()
        })
        .sum();
    let errors = report.error_count();

    println!();
    if errors == 0 && warnings == 0 {
        success("All translations are consistent");
    } else {
        println!(
            "{} {} {}, {} {}",
            if errors > 0 {
                FAILURE_MARK.red()
            } else {
                WARNING_MARK.yellow()
            },
            errors,
            if errors == 1 { "error" } else { "errors" },
            warnings,
            if warnings == 1 { "warning" } else { "warnings" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate_display_short_text_untouched() {
        assert_eq!(truncate_display("short line", 80), "short line");
    }

    #[test]
    fn test_truncate_display_long_text() {
        let long = "x".repeat(100);
        let truncated = truncate_display(&long, 80);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.len(), 77 + 3);
    }

    #[test]
    fn test_truncate_display_wide_chars() {
        // CJK characters are 2 columns wide
        let wide = "漢".repeat(50);
        let truncated = truncate_display(&wide, 80);
        assert!(truncated.ends_with("..."));
        assert!(truncated.chars().count() < 50);
    }
}
