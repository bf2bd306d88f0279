//! Festival (holiday) posts

use chrono::NaiveDate;

use super::{profile_block, DateLabel};
use crate::models::CompanyProfile;

pub const TITLE: &str = "FESTIVAL POST";

/// Fallback emoji when no keyword matches
pub const DEFAULT_EMOJI: &str = "🌟";

// Checked in order; first keyword contained in the name wins.
const EMOJI_KEYWORDS: &[(&str, &str)] = &[
    ("new year", "🎉"),
    ("christmas", "🎄"),
    ("easter", "🐰"),
    ("independence", "🇺🇸"),
    ("labour", "⚒️"),
    ("labor", "⚒️"),
    ("mother", "👩‍👧‍👦"),
    ("father", "👨‍👧‍👦"),
    ("valentine", "💝"),
    ("halloween", "🎃"),
    ("thanksgiving", "🦃"),
    ("memorial", "🇺🇸"),
    ("veterans", "🇺🇸"),
    ("martin luther king", "✊"),
    ("presidents", "🇺🇸"),
    ("columbus", "🌎"),
    ("flag", "🇺🇸"),
];

/// Emoji for a holiday name
pub fn emoji_for(holiday: &str) -> &'static str {
    let name = holiday.to_lowercase();
    EMOJI_KEYWORDS
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

/// Holiday name as a hashtag token
pub fn holiday_tag(holiday: &str) -> String {
    holiday.split_whitespace().collect()
}

pub fn prompt(date: NaiveDate, holiday: &str, profile: &CompanyProfile) -> String {
    let label = DateLabel::new(date);

    format!(
        "Create a professional LinkedIn post for {holiday} on {full} ({weekday}).

{profile}

Requirements:
- Start with the date format: {header}
- Include appropriate emojis for {holiday}
- Connect the holiday theme to business values
- Mention company services naturally
- Include the website link
- End with relevant hashtags including #{tag}
- Keep it professional but engaging
- Maximum 300 words",
        full = label.full,
        weekday = label.weekday,
        profile = profile_block(profile),
        header = label.header(TITLE),
        tag = holiday_tag(holiday),
    )
}
