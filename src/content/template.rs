//! Deterministic template posts
//!
//! Used whenever no remote model produced a post for a day. Output depends
//! only on (date, subject, profile): no clock, no randomness, no I/O.
//! Sections with nothing to say (no services, no website, no hashtags) are
//! left out rather than rendered empty.

use chrono::NaiveDate;

use super::{business, festival, DateLabel};
use crate::models::{CompanyProfile, PostSubject, PostType};

/// Render the fallback post for a day
pub fn render(date: NaiveDate, subject: &PostSubject, profile: &CompanyProfile) -> String {
    match subject {
        PostSubject::Festival { holiday } => render_festival(date, holiday, profile),
        PostSubject::Business { post_type } => render_business(date, *post_type, profile),
    }
}

pub fn render_festival(date: NaiveDate, holiday: &str, profile: &CompanyProfile) -> String {
    let label = DateLabel::new(date);
    let emoji = festival::emoji_for(holiday);

    let hashtags = std::iter::once(format!("#{}", festival::holiday_tag(holiday)))
        .chain(profile.hashtags.iter().map(|tag| format!("#{tag}")))
        .collect::<Vec<_>>()
        .join(" ");

    join_sections([
        label.header(festival::TITLE),
        format!("{emoji} Happy {holiday}! {emoji}"),
        "Celebrating this special day with gratitude and joy.".to_string(),
        format!(
            "At {}, we believe in celebrating milestones and traditions that bring us together:",
            profile.display_name()
        ),
        bullet_list("🔧", &profile.services),
        format!("May this {holiday} bring prosperity and success to all!"),
        visit_line(&profile.website),
        hashtags,
    ])
}

pub fn render_business(date: NaiveDate, post_type: PostType, profile: &CompanyProfile) -> String {
    let label = DateLabel::new(date);
    let theme = business::theme(post_type, &label);
    let company = profile.display_name();

    let opening = match post_type {
        PostType::Service => format!(
            "Highlighting our comprehensive business solutions today!\n\nAt {company}, we provide:"
        ),
        PostType::Tip => format!(
            "Today's business insight from {company}:\n\nSuccess comes from consistent effort and strategic planning."
        ),
        PostType::Motivation => format!(
            "Starting strong this {}!\n\n{company} believes in empowering businesses through:",
            label.weekday
        ),
        PostType::AiTool => format!(
            "Discovered an incredible AI tool transforming business operations!\n\nThis aligns with our solutions at {company}, helping businesses:"
        ),
    };

    join_sections([
        label.header(theme.title),
        format!("{} {opening}", theme.emoji),
        bullet_list("✨", &profile.services),
        "Ready to elevate your business? Let's connect and explore opportunities!".to_string(),
        visit_line(&profile.website),
        profile.hashtag_line(),
    ])
}

fn bullet_list(marker: &str, items: &[String]) -> String {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| format!("{marker} {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn visit_line(website: &str) -> String {
    let website = website.trim();
    if website.is_empty() {
        String::new()
    } else {
        format!("Visit: {website}")
    }
}

fn join_sections<const N: usize>(sections: [String; N]) -> String {
    sections
        .into_iter()
        .filter(|section| !section.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile() -> CompanyProfile {
        CompanyProfile::new(
            "AP&A SYSTEM LLP",
            "https://www.apasystemllp.com/services",
            vec![
                "IT Solutions for digital transformation".to_string(),
                "HR & Recruitment for building strong teams".to_string(),
            ],
            "Technology",
            vec!["Innovation".to_string(), "Growth".to_string()],
        )
    }

    #[test]
    fn test_festival_golden() {
        let post = render_festival(date(2025, 12, 25), "Christmas Day", &profile());

        let expected = "📅 December 25, 2025 (Thursday) - FESTIVAL POST

🎄 Happy Christmas Day! 🎄

Celebrating this special day with gratitude and joy.

At AP&A SYSTEM LLP, we believe in celebrating milestones and traditions that bring us together:

🔧 IT Solutions for digital transformation
🔧 HR & Recruitment for building strong teams

May this Christmas Day bring prosperity and success to all!

Visit: https://www.apasystemllp.com/services

#ChristmasDay #Innovation #Growth";

        assert_eq!(post, expected);
    }

    #[test]
    fn test_business_golden() {
        let post = render_business(date(2025, 10, 2), PostType::Tip, &profile());

        let expected = "📅 October 02, 2025 (Thursday) - BUSINESS TIP

💡 Today's business insight from AP&A SYSTEM LLP:

Success comes from consistent effort and strategic planning.

✨ IT Solutions for digital transformation
✨ HR & Recruitment for building strong teams

Ready to elevate your business? Let's connect and explore opportunities!

Visit: https://www.apasystemllp.com/services

#Innovation #Growth";

        assert_eq!(post, expected);
    }

    #[test]
    fn test_render_is_deterministic() {
        let subject = PostSubject::business(PostType::Motivation);
        let first = render(date(2025, 10, 6), &subject, &profile());
        let second = render(date(2025, 10, 6), &subject, &profile());

        assert_eq!(first, second);
        assert!(first.contains("MOTIVATION MONDAY"));
        assert!(first.contains("Starting strong this Monday!"));
    }

    #[test]
    fn test_sparse_profile_still_well_formed() {
        let sparse = CompanyProfile::default();

        for subject in [
            PostSubject::festival("Labor Day"),
            PostSubject::business(PostType::Service),
            PostSubject::business(PostType::AiTool),
        ] {
            let post = render(date(2025, 9, 1), &subject, &sparse);

            assert!(post.starts_with("📅 September 01, 2025 (Monday) - "));
            assert!(post.contains("Our Company"));
            assert!(!post.contains("\n\n\n"));
            assert!(!post.contains("Visit:"));
            assert!(!post.ends_with('\n'));
        }
    }

    #[test]
    fn test_festival_hashtag_always_present() {
        let post = render_festival(date(2025, 9, 1), "Labor Day", &CompanyProfile::default());
        assert!(post.ends_with("#LaborDay"));
        assert!(post.contains("⚒️ Happy Labor Day! ⚒️"));
    }
}
