//! Business (non-holiday) posts

use chrono::NaiveDate;

use super::{profile_block, DateLabel};
use crate::models::{CompanyProfile, PostType};

/// Presentation for one business category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub emoji: &'static str,
    pub title: &'static str,
    pub focus: &'static str,
}

/// Theme for a category; motivation posts are titled by weekday
pub fn theme(post_type: PostType, label: &DateLabel) -> Theme {
    match post_type {
        PostType::Service => Theme {
            emoji: "💼",
            title: "SERVICE SPOTLIGHT",
            focus: "highlighting company services and solutions",
        },
        PostType::Tip => Theme {
            emoji: "💡",
            title: "BUSINESS TIP",
            focus: "sharing valuable business insights and tips",
        },
        PostType::Motivation => Theme {
            emoji: "🚀",
            title: if label.is_monday() {
                "MOTIVATION MONDAY"
            } else {
                "MIDWEEK MOTIVATION"
            },
            focus: "motivational content about business growth and success",
        },
        PostType::AiTool => Theme {
            emoji: "🤖",
            title: "AI TOOL SPOTLIGHT",
            focus: "featuring AI tools and technology innovations",
        },
    }
}

pub fn prompt(date: NaiveDate, post_type: PostType, profile: &CompanyProfile) -> String {
    let label = DateLabel::new(date);
    let theme = theme(post_type, &label);

    format!(
        "Create a professional LinkedIn post for {full} ({weekday}) focused on {focus}.

{profile}

Requirements:
- Start with the date format: {header}
- Use the emoji: {emoji}
- Focus on {focus}
- Naturally incorporate company services
- Include a call-to-action
- Include the website link
- End with relevant hashtags
- Keep it professional and engaging
- Maximum 250 words",
        full = label.full,
        weekday = label.weekday,
        focus = theme.focus,
        profile = profile_block(profile),
        header = label.header(theme.title),
        emoji = theme.emoji,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motivation_title_depends_on_weekday() {
        let monday = DateLabel::new(NaiveDate::from_ymd_opt(2025, 10, 6).unwrap());
        let thursday = DateLabel::new(NaiveDate::from_ymd_opt(2025, 10, 9).unwrap());

        assert_eq!(theme(PostType::Motivation, &monday).title, "MOTIVATION MONDAY");
        assert_eq!(theme(PostType::Motivation, &thursday).title, "MIDWEEK MOTIVATION");
    }

    #[test]
    fn test_prompt_contents() {
        let profile = CompanyProfile::new(
            "Acme",
            "https://acme.test",
            vec!["Consulting".to_string(), "Audits".to_string()],
            "Finance",
            vec!["Acme".to_string()],
        );
        let date = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
        let text = prompt(date, PostType::AiTool, &profile);

        assert!(text.contains("📅 October 03, 2025 (Friday) - AI TOOL SPOTLIGHT"));
        assert!(text.contains("Use the emoji: 🤖"));
        assert!(text.contains("Services: Consulting, Audits"));
        assert!(text.contains("Hashtags to include: #Acme"));
        assert!(text.contains("Maximum 250 words"));
    }
}
