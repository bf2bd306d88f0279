// Core data structures for the postcal calendar engine

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Provider tag recorded on entries produced without any remote model
pub const TEMPLATE_FALLBACK: &str = "template-fallback";

/// Company the calendar is generated for
///
/// Built once per batch and never mutated while the batch runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub website: String,
    pub services: Vec<String>,
    pub industry: String,
    /// Hashtag tokens without the leading `#`
    pub hashtags: Vec<String>,
}

impl CompanyProfile {
    pub fn new(
        name: impl Into<String>,
        website: impl Into<String>,
        services: Vec<String>,
        industry: impl Into<String>,
        hashtags: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            website: website.into(),
            services,
            industry: industry.into(),
            hashtags,
        }
    }

    /// Company name as it should appear in post text
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Our Company"
        } else {
            &self.name
        }
    }

    /// Hashtags rendered as `#Tag #Tag`
    pub fn hashtag_line(&self) -> String {
        self.hashtags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Public holiday as returned by the holiday service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
    #[serde(default, rename = "localName", skip_serializing_if = "Option::is_none")]
    pub local_name: Option<String>,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
            local_name: None,
        }
    }
}

/// Country supported by the holiday service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    #[serde(rename = "countryCode")]
    pub country_code: String,
    pub name: String,
}

/// Rotating category used for non-holiday days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Service,
    Tip,
    Motivation,
    AiTool,
}

impl PostType {
    /// Rotation order for business days
    pub const ROTATION: [PostType; 4] = [Self::Service, Self::Tip, Self::Motivation, Self::AiTool];

    /// Category for the n-th business day of a batch (0-based)
    pub fn for_business_day(index: usize) -> Self {
        Self::ROTATION[index % Self::ROTATION.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Tip => "tip",
            Self::Motivation => "motivation",
            Self::AiTool => "ai_tool",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "service" => Some(Self::Service),
            "tip" => Some(Self::Tip),
            "motivation" => Some(Self::Motivation),
            "ai_tool" | "ai-tool" | "aitool" => Some(Self::AiTool),
            _ => None,
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a single day's post is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PostSubject {
    /// The date coincides with a known holiday
    Festival { holiday: String },
    /// Regular day using the rotating category
    Business {
        #[serde(rename = "postType")]
        post_type: PostType,
    },
}

impl PostSubject {
    pub fn festival(holiday: impl Into<String>) -> Self {
        Self::Festival {
            holiday: holiday.into(),
        }
    }

    pub fn business(post_type: PostType) -> Self {
        Self::Business { post_type }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Festival { .. } => EntryKind::Festival,
            Self::Business { .. } => EntryKind::Business,
        }
    }
}

/// Kind of calendar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Festival,
    Business,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Festival => "festival",
            Self::Business => "business",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who produced a post
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostSource {
    /// A remote model, by identifier
    Provider(String),
    /// The deterministic template generator
    TemplateFallback,
}

impl PostSource {
    pub fn provider(model: impl Into<String>) -> Self {
        Self::Provider(model.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Provider(model) => model,
            Self::TemplateFallback => TEMPLATE_FALLBACK,
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Self::TemplateFallback)
    }
}

impl fmt::Display for PostSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PostSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PostSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw == TEMPLATE_FALLBACK {
            Self::TemplateFallback
        } else {
            Self::Provider(raw)
        })
    }
}

/// One finished day of the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub subject: PostSubject,
    pub post: String,
    #[serde(rename = "model")]
    pub source: PostSource,
}

impl CalendarEntry {
    pub fn kind(&self) -> EntryKind {
        self.subject.kind()
    }

    pub fn holiday(&self) -> Option<&str> {
        match &self.subject {
            PostSubject::Festival { holiday } => Some(holiday),
            PostSubject::Business { .. } => None,
        }
    }

    pub fn post_type(&self) -> Option<PostType> {
        match &self.subject {
            PostSubject::Business { post_type } => Some(*post_type),
            PostSubject::Festival { .. } => None,
        }
    }
}
