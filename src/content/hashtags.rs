//! Hashtag derivation for a company profile

use regex::Regex;
use std::sync::OnceLock;

use super::SYSTEM_PROMPT;
use crate::llm::{ContentRequester, Prompt};

/// Used when the model answered but produced no hashtags
pub const DEFAULT_HASHTAGS: &[&str] = &[
    "Business",
    "Innovation",
    "Growth",
    "Success",
    "Leadership",
    "Technology",
    "Professional",
    "Networking",
];

/// Used when the request itself failed
pub const MINIMAL_HASHTAGS: &[&str] = &["Business", "Innovation", "Growth", "Success"];

pub fn prompt(company: &str, services: &[String], industry: &str) -> Prompt {
    let industry = if industry.trim().is_empty() {
        "Business"
    } else {
        industry
    };

    let user = format!(
        "Generate 8-10 relevant professional hashtags for a LinkedIn post about:
Company: {company}
Services: {services}
Industry: {industry}

Requirements:
- Mix of industry-specific and general business hashtags
- Include company branding hashtags
- Popular LinkedIn hashtags for engagement
- Return only hashtags separated by spaces, no explanations",
        services = services.join(", "),
    );

    Prompt::new(SYSTEM_PROMPT, user)
}

/// `#word` tokens in order of first appearance, without the `#`
pub fn extract(text: &str) -> Vec<String> {
    static HASHTAG_RE: OnceLock<Regex> = OnceLock::new();

    let re = HASHTAG_RE.get_or_init(|| Regex::new(r"#(\w+)").expect("Invalid regex pattern"));

    let mut tags: Vec<String> = Vec::new();
    for capture in re.captures_iter(text) {
        let tag = &capture[1];
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Ask `provider` for hashtags, falling back to stock lists
///
/// Never fails and never touches the roster.
pub async fn derive(
    requester: &dyn ContentRequester,
    provider: &str,
    company: &str,
    services: &[String],
    industry: &str,
) -> Vec<String> {
    let prompt = prompt(company, services, industry);

    match requester.request(&prompt, provider).await {
        Ok(reply) => {
            let tags = extract(&reply);
            if tags.is_empty() {
                tracing::debug!(model = %provider, "No hashtags in reply, using defaults");
                to_owned(DEFAULT_HASHTAGS)
            } else {
                tags
            }
        }
        Err(failure) => {
            tracing::warn!(error = %failure, "Hashtag generation failed");
            to_owned(MINIMAL_HASHTAGS)
        }
    }
}

fn to_owned(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|tag| tag.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GenerationFailure;
    use async_trait::async_trait;

    struct Fixed(Result<String, GenerationFailure>);

    #[async_trait]
    impl ContentRequester for Fixed {
        async fn request(&self, _: &Prompt, _: &str) -> Result<String, GenerationFailure> {
            self.0.clone()
        }
    }

    #[test]
    fn test_extract() {
        let tags = extract("#Tech #Innovation, #AI_Tools and #Tech again");
        assert_eq!(tags, vec!["Tech", "Innovation", "AI_Tools"]);
        assert!(extract("no tags here").is_empty());
    }

    #[test]
    fn test_prompt_defaults_industry() {
        let prompt = prompt("Acme", &[], "");
        assert!(prompt.user.contains("Industry: Business"));
    }

    #[tokio::test]
    async fn test_derive_uses_reply() {
        let requester = Fixed(Ok("#Acme #CloudOps".to_string()));
        let tags = derive(&requester, "m", "Acme", &[], "Cloud").await;
        assert_eq!(tags, vec!["Acme", "CloudOps"]);
    }

    #[tokio::test]
    async fn test_derive_fallbacks() {
        let empty = Fixed(Ok("Sure! Here are some ideas.".to_string()));
        assert_eq!(derive(&empty, "m", "Acme", &[], "").await.len(), 8);

        let failing = Fixed(Err(GenerationFailure::rate_limit("m", "HTTP 429")));
        assert_eq!(
            derive(&failing, "m", "Acme", &[], "").await,
            vec!["Business", "Innovation", "Growth", "Success"]
        );
    }
}
