//! Rewrite an existing post on user request

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::SYSTEM_PROMPT;
use crate::error::{Error, Result};
use crate::llm::Prompt;

const STOCK_EXPLANATION: &str = "I've improved your post based on your request.";

/// Company details attached to an improvement request
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveRequest {
    #[serde(default)]
    pub current_post: String,
    #[serde(default)]
    pub user_request: String,
    /// `festival` or `business`
    #[serde(default)]
    pub post_type: Option<String>,
    #[serde(default)]
    pub holiday: Option<String>,
    #[serde(default)]
    pub post_type_category: Option<String>,
    #[serde(default)]
    pub company_info: Option<CompanyInfo>,
}

impl ImproveRequest {
    pub fn validate(&self) -> Result<()> {
        if self.current_post.trim().is_empty() || self.user_request.trim().is_empty() {
            return Err(Error::invalid_input(
                "currentPost and userRequest are required",
            ));
        }
        Ok(())
    }

    pub fn prompt(&self) -> Prompt {
        let info = self.company_info.clone().unwrap_or_default();
        let context = match &self.holiday {
            Some(holiday) => format!("(Holiday: {holiday})"),
            None => format!(
                "(Category: {})",
                self.post_type_category.as_deref().unwrap_or("general")
            ),
        };

        let user = format!(
            "You are a professional LinkedIn content expert. A user wants to improve their LinkedIn post.

Current Post:
\"{current}\"

Post Context:
- Type: {kind} {context}
- Company: {company}
- Industry: {industry}

User Request: \"{request}\"

Please provide:
1. A brief explanation of what you'll improve (2-3 sentences)
2. An improved version of the post that addresses their request

Keep the improved post professional, engaging, and suitable for LinkedIn. Maintain the original structure and key information while implementing the requested changes.

Format your response as:
EXPLANATION: [Your explanation here]
IMPROVED_POST: [The improved post here]",
            current = self.current_post,
            kind = self.post_type.as_deref().unwrap_or("business"),
            company = info.name.as_deref().unwrap_or("Unknown"),
            industry = info.industry.as_deref().unwrap_or("Business"),
            request = self.user_request,
        );

        Prompt::new(SYSTEM_PROMPT, user)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub explanation: String,
    pub improved_post: String,
    pub original_post: String,
}

/// Split a model reply into explanation and rewritten post
pub fn parse(reply: &str, original_post: &str) -> Improvement {
    static EXPLANATION_RE: OnceLock<Regex> = OnceLock::new();
    static IMPROVED_RE: OnceLock<Regex> = OnceLock::new();

    let explanation_re = EXPLANATION_RE.get_or_init(|| {
        Regex::new(r"(?s)EXPLANATION:\s*(.*?)\s*(?:IMPROVED_POST:|\z)").expect("Invalid regex pattern")
    });
    let improved_re = IMPROVED_RE
        .get_or_init(|| Regex::new(r"(?s)IMPROVED_POST:\s*(.*)").expect("Invalid regex pattern"));

    let explanation = explanation_re
        .captures(reply)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| STOCK_EXPLANATION.to_string());

    let improved_post = improved_re
        .captures(reply)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| reply.trim().to_string());

    Improvement {
        explanation,
        improved_post,
        original_post: original_post.to_string(),
    }
}
