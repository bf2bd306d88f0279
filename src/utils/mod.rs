//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

/// Truncate text to at most `max_chars` characters, for log lines
///
/// Counts characters, not bytes, so emoji-heavy posts never split mid-codepoint.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// Split a newline-separated list, trimming entries and dropping blank lines
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
