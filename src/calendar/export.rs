//! Calendar export formats

use std::fmt::Write as _;

use crate::error::Result;
use crate::models::CalendarEntry;

const SEPARATOR_WIDTH: usize = 50;

/// Pretty-printed JSON array of entries
pub fn to_json(entries: &[CalendarEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Plain-text block: `date (KIND)`, a dashed rule, then the post
pub fn to_text(entries: &[CalendarEntry]) -> String {
    let rule = "-".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();

    for entry in entries {
        let kind = entry.kind().as_str().to_uppercase();
        // Writing to a String cannot fail.
        let _ = write!(out, "{} ({kind})\n{rule}\n{}\n\n", entry.date, entry.post);
    }
    out
}
