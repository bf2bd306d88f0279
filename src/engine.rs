//! Engine facade shared by the CLI and the HTTP API
//!
//! Owns the requester, the holiday resolver and the one [`ModelRoster`] of
//! this process. A batch holds the roster lock from its first day to its
//! last, so concurrent batches run one after another and never interleave
//! roster updates. Status and reset take the same lock.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::calendar::{CalendarAssembler, CalendarBatch, CalendarConfig, CalendarRequest};
use crate::config::Config;
use crate::content::hashtags;
use crate::content::improve::{self, ImproveRequest, Improvement};
use crate::error::Result;
use crate::holidays::{HolidayResolver, NagerClient};
use crate::llm::{ContentRequester, GroqClient, ModelRoster, RosterStatus};
use crate::models::{CalendarEntry, CompanyProfile, Country, Holiday};

/// Caller-supplied company details
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub name: String,
    pub website: String,
    pub services: Vec<String>,
    pub industry: String,
    /// Skips hashtag derivation when non-empty
    pub hashtags: Vec<String>,
}

pub struct Engine {
    requester: Arc<dyn ContentRequester>,
    holidays: Arc<dyn HolidayResolver>,
    roster: Mutex<ModelRoster>,
    default_country: String,
    max_days: usize,
}

impl Engine {
    pub fn new(
        requester: Arc<dyn ContentRequester>,
        holidays: Arc<dyn HolidayResolver>,
        roster: ModelRoster,
    ) -> Self {
        Self {
            requester,
            holidays,
            roster: Mutex::new(roster),
            default_country: String::from("US"),
            max_days: CalendarConfig::default().max_days,
        }
    }

    /// Production engine: Groq for posts, Nager.Date for holidays
    pub fn from_config(config: &Config) -> Result<Self> {
        let roster = ModelRoster::new(config.llm.models.iter().cloned())?;
        let requester = GroqClient::new(config.llm.clone())?;
        let holidays = NagerClient::new(config.holidays.clone())?;

        if config.llm.api_key.is_none() {
            tracing::warn!("GROQ_API_KEY is not set; every post will use the template generator");
        }

        Ok(Self::new(Arc::new(requester), Arc::new(holidays), roster)
            .with_default_country(&config.holidays.default_country)
            .with_max_days(config.calendar.max_days))
    }

    pub fn with_default_country(mut self, country_code: &str) -> Self {
        self.default_country = country_code.to_uppercase();
        self
    }

    pub fn default_country(&self) -> &str {
        &self.default_country
    }

    pub fn with_max_days(mut self, max_days: usize) -> Self {
        self.max_days = max_days;
        self
    }

    /// Fails with an input error when the range is longer than the batch limit
    pub fn check_request(&self, request: &CalendarRequest) -> Result<()> {
        request.check_span(self.max_days)
    }

    /// Turn caller input into a batch profile, deriving hashtags when none were given
    pub async fn build_profile(&self, input: ProfileInput) -> CompanyProfile {
        let explicit: Vec<String> = input
            .hashtags
            .iter()
            .map(|tag| tag.trim().trim_start_matches('#').to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        let hashtags = if explicit.is_empty() {
            let provider = self.roster.lock().await.current().to_string();
            hashtags::derive(
                self.requester.as_ref(),
                &provider,
                &input.name,
                &input.services,
                &input.industry,
            )
            .await
        } else {
            explicit
        };

        CompanyProfile::new(
            input.name,
            input.website,
            input.services,
            input.industry,
            hashtags,
        )
    }

    /// Run one batch under the roster lock
    pub async fn run_batch(&self, profile: &CompanyProfile, request: &CalendarRequest) -> CalendarBatch {
        let assembler = CalendarAssembler::new(self.requester.clone(), self.holidays.clone());
        let mut roster = self.roster.lock().await;
        assembler.run(&mut roster, profile, request).await
    }

    pub async fn generate_calendar(
        &self,
        profile: &CompanyProfile,
        request: &CalendarRequest,
    ) -> Vec<CalendarEntry> {
        self.run_batch(profile, request).await.entries
    }

    pub async fn model_status(&self) -> RosterStatus {
        self.roster.lock().await.status()
    }

    /// Clear failure counts and rewind; returns the fresh status
    pub async fn reset_model_failures(&self) -> RosterStatus {
        let mut roster = self.roster.lock().await;
        roster.reset();
        roster.status()
    }

    /// Rewrite a post with the current model; failures go to the caller
    pub async fn improve_post(&self, request: &ImproveRequest) -> Result<Improvement> {
        request.validate()?;

        let provider = self.roster.lock().await.current().to_string();
        let reply = self.requester.request(&request.prompt(), &provider).await?;

        tracing::info!(model = %provider, "Improved post");
        Ok(improve::parse(&reply, &request.current_post))
    }

    pub async fn holidays(&self, year: i32, country_code: &str) -> Vec<Holiday> {
        self.holidays.holidays(year, country_code).await
    }

    pub async fn available_countries(&self) -> Vec<Country> {
        self.holidays.available_countries().await
    }
}
