//! Post composition
//!
//! Composers turn (date, profile, subject) into either a remote prompt or,
//! in template mode, a finished post. They never decide fallback: a remote
//! failure is handed back to the caller untouched.
//!
//! - [`festival`] - holiday prompt and emoji table
//! - [`business`] - rotating category themes and prompt
//! - [`template`] - deterministic fallback posts
//! - [`hashtags`] - hashtag derivation for a company profile
//! - [`improve`] - rewrite an existing post on request

pub mod business;
pub mod festival;
pub mod hashtags;
pub mod improve;
pub mod template;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::llm::{ContentRequester, GenerationFailure, Prompt};
use crate::models::{CompanyProfile, PostSubject};

/// System prompt shared by every post request
pub const SYSTEM_PROMPT: &str = "You are a professional LinkedIn content creator. Generate engaging, \
professional LinkedIn posts that are authentic and drive engagement. Keep posts concise, use emojis \
appropriately, and include relevant hashtags.";

/// Human date label used in post headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLabel {
    /// `October 01, 2025`
    pub full: String,
    /// `Wednesday`
    pub weekday: String,
    is_monday: bool,
}

impl DateLabel {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            full: date.format("%B %d, %Y").to_string(),
            weekday: date.format("%A").to_string(),
            is_monday: date.weekday() == Weekday::Mon,
        }
    }

    pub fn is_monday(&self) -> bool {
        self.is_monday
    }

    /// `📅 October 01, 2025 (Wednesday) - TITLE`
    pub fn header(&self, title: &str) -> String {
        format!("📅 {} ({}) - {title}", self.full, self.weekday)
    }
}

/// Company block embedded in every post prompt
pub(crate) fn profile_block(profile: &CompanyProfile) -> String {
    format!(
        "Company: {}\nWebsite: {}\nServices: {}\nIndustry: {}\nHashtags to include: {}",
        profile.display_name(),
        profile.website,
        profile.services.join(", "),
        profile.industry,
        profile.hashtag_line(),
    )
}

/// Builds festival and business posts for one company
#[derive(Debug, Clone, Copy)]
pub struct PostComposer<'a> {
    profile: &'a CompanyProfile,
}

impl<'a> PostComposer<'a> {
    pub fn new(profile: &'a CompanyProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &CompanyProfile {
        self.profile
    }

    /// Remote prompt for a day
    pub fn prompt(&self, date: NaiveDate, subject: &PostSubject) -> Prompt {
        let user = match subject {
            PostSubject::Festival { holiday } => festival::prompt(date, holiday, self.profile),
            PostSubject::Business { post_type } => business::prompt(date, *post_type, self.profile),
        };
        Prompt::new(SYSTEM_PROMPT, user)
    }

    /// Ask `provider` for the post; failures propagate unchanged
    pub async fn compose(
        &self,
        requester: &dyn ContentRequester,
        provider: &str,
        date: NaiveDate,
        subject: &PostSubject,
    ) -> Result<String, GenerationFailure> {
        let prompt = self.prompt(date, subject);
        requester.request(&prompt, provider).await
    }

    /// Template mode: deterministic post with no remote call
    pub fn compose_template(&self, date: NaiveDate, subject: &PostSubject) -> String {
        template::render(date, subject, self.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_label() {
        let label = DateLabel::new(date(2025, 10, 1));
        assert_eq!(label.full, "October 01, 2025");
        assert_eq!(label.weekday, "Wednesday");
        assert!(!label.is_monday());
        assert_eq!(
            label.header("BUSINESS TIP"),
            "📅 October 01, 2025 (Wednesday) - BUSINESS TIP"
        );
        assert!(DateLabel::new(date(2025, 10, 6)).is_monday());
    }

    #[test]
    fn test_prompt_uses_system_prompt() {
        let profile = CompanyProfile::new("Acme", "https://acme.test", vec![], "Retail", vec![]);
        let composer = PostComposer::new(&profile);

        let prompt = composer.prompt(date(2025, 10, 2), &PostSubject::business(PostType::Tip));
        assert_eq!(prompt.system, SYSTEM_PROMPT);
        assert!(prompt.user.contains("Company: Acme"));
        assert!(prompt.user.contains("BUSINESS TIP"));
    }

    #[test]
    fn test_profile_block_defaults() {
        let block = profile_block(&CompanyProfile::default());
        assert!(block.starts_with("Company: Our Company\n"));
        assert!(block.contains("Services: \n"));
    }
}
