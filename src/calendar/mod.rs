//! Calendar assembly
//!
//! Walks a date range one day at a time and produces exactly one
//! [`CalendarEntry`] per day, in ascending date order.
//!
//! # Per-day protocol
//!
//! ```text
//!  RUNNING ──ok──────────────────────────────▶ entry(provider)
//!     │
//!   failure
//!     ▼
//!  SWITCHING (roster.advance) ──retry ok─────▶ entry(new provider)
//!     │
//!   failure
//!     ▼
//!  DEGRADED ────────────────────────────────▶ entry(template-fallback)
//! ```
//!
//! At most two remote attempts are made per day. Only the first failure of a
//! day advances the roster: the retry's failure is recorded in the report
//! but charged to no model, and the next day starts on the provider the
//! roster already moved to.
//!
//! Holidays are fetched once per batch, for the year of the start date.

pub mod export;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::content::PostComposer;
use crate::error::{Error, Result};
use crate::holidays::HolidayResolver;
use crate::llm::{ContentRequester, GenerationFailure, ModelRoster};
use crate::models::{CalendarEntry, CompanyProfile, PostSource, PostSubject, PostType};

/// Batch limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Longest range, in days, a single batch may cover
    pub max_days: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self { max_days: 366 }
    }
}

/// Inclusive date range plus the country used for the holiday lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub country_code: String,
}

impl CalendarRequest {
    pub fn new(start: NaiveDate, end: NaiveDate, country_code: impl Into<String>) -> Self {
        Self {
            start,
            end,
            country_code: country_code.into(),
        }
    }

    /// Every day in the range; empty when `start > end`
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |day| *day <= self.end)
    }

    pub fn day_count(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start).num_days() as usize + 1
        }
    }

    /// Reject ranges longer than `max_days`
    pub fn check_span(&self, max_days: usize) -> Result<()> {
        let days = self.day_count();
        if days > max_days {
            return Err(Error::invalid_input(format!(
                "Date range covers {days} days; at most {max_days} are allowed"
            )));
        }
        Ok(())
    }
}

/// Assembler state for the day being processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    Running,
    Switching,
    Degraded,
    Done,
}

impl fmt::Display for AssemblyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Running => "RUNNING",
            Self::Switching => "SWITCHING",
            Self::Degraded => "DEGRADED",
            Self::Done => "DONE",
        };
        f.write_str(s)
    }
}

/// What happened during one batch
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub festival_posts: usize,
    pub business_posts: usize,
    pub remote_posts: usize,
    pub template_posts: usize,
    /// Roster advances performed by this batch
    pub switches: usize,
    /// Every failure observed, in order
    pub failures: Vec<GenerationFailure>,
    /// Days that ended on the template generator
    pub degraded_dates: Vec<NaiveDate>,
}

impl BatchReport {
    fn record(&mut self, entry: &CalendarEntry) {
        match entry.subject {
            PostSubject::Festival { .. } => self.festival_posts += 1,
            PostSubject::Business { .. } => self.business_posts += 1,
        }
        if entry.source.is_template() {
            self.template_posts += 1;
            self.degraded_dates.push(entry.date);
        } else {
            self.remote_posts += 1;
        }
    }
}

/// Entries plus the report for one batch
#[derive(Debug, Clone)]
pub struct CalendarBatch {
    pub entries: Vec<CalendarEntry>,
    pub report: BatchReport,
}

/// Drives the per-day generate / switch / degrade protocol
#[derive(Clone)]
pub struct CalendarAssembler {
    requester: Arc<dyn ContentRequester>,
    holidays: Arc<dyn HolidayResolver>,
}

impl CalendarAssembler {
    pub fn new(requester: Arc<dyn ContentRequester>, holidays: Arc<dyn HolidayResolver>) -> Self {
        Self {
            requester,
            holidays,
        }
    }

    /// Generate one entry per day of `request`
    pub async fn run(
        &self,
        roster: &mut ModelRoster,
        profile: &CompanyProfile,
        request: &CalendarRequest,
    ) -> CalendarBatch {
        let batch_id = Uuid::new_v4();
        let span = tracing::info_span!("calendar_batch", batch_id = %batch_id);

        self.run_batch(batch_id, roster, profile, request)
            .instrument(span)
            .await
    }

    /// Same as [`run`](Self::run), without the report
    pub async fn generate_calendar(
        &self,
        roster: &mut ModelRoster,
        profile: &CompanyProfile,
        request: &CalendarRequest,
    ) -> Vec<CalendarEntry> {
        self.run(roster, profile, request).await.entries
    }

    async fn run_batch(
        &self,
        batch_id: Uuid,
        roster: &mut ModelRoster,
        profile: &CompanyProfile,
        request: &CalendarRequest,
    ) -> CalendarBatch {
        let _timer = crate::metrics::start_batch_timer();

        tracing::info!(
            start = %request.start,
            end = %request.end,
            country = %request.country_code,
            days = request.day_count(),
            model = %roster.current(),
            "Starting calendar batch"
        );

        let holidays = self.holiday_map(request).await;
        let composer = PostComposer::new(profile);

        let mut report = BatchReport {
            batch_id,
            ..Default::default()
        };
        let mut entries = Vec::new();
        let mut business_days = 0usize;

        for date in request.days() {
            let subject = match holidays.get(&date) {
                Some(name) => PostSubject::festival(name.clone()),
                None => {
                    let post_type = PostType::for_business_day(business_days);
                    business_days += 1;
                    PostSubject::business(post_type)
                }
            };

            let entry = self
                .generate_day(&composer, roster, date, subject, &mut report)
                .await;
            report.record(&entry);
            entries.push(entry);
        }

        tracing::info!(
            state = %AssemblyState::Done,
            total = entries.len(),
            remote = report.remote_posts,
            template = report.template_posts,
            switches = report.switches,
            "Calendar batch finished"
        );

        CalendarBatch { entries, report }
    }

    /// Single lookup for the whole batch, keyed by date
    async fn holiday_map(&self, request: &CalendarRequest) -> HashMap<NaiveDate, String> {
        let holidays = self
            .holidays
            .holidays(request.start.year(), &request.country_code)
            .await;

        let mut map = HashMap::with_capacity(holidays.len());
        for holiday in holidays {
            // Some countries list two observances on one date; keep the first.
            map.entry(holiday.date).or_insert(holiday.name);
        }
        map
    }

    async fn generate_day(
        &self,
        composer: &PostComposer<'_>,
        roster: &mut ModelRoster,
        date: NaiveDate,
        subject: PostSubject,
        report: &mut BatchReport,
    ) -> CalendarEntry {
        let requester = self.requester.as_ref();

        let provider = roster.current().to_string();
        tracing::debug!(%date, kind = %subject.kind(), model = %provider, state = %AssemblyState::Running, "Generating post");

        let first = match composer.compose(requester, &provider, date, &subject).await {
            Ok(post) => return remote_entry(date, subject, post, provider),
            Err(failure) => failure,
        };
        note_failure(report, first);

        let retry_provider = roster.advance().to_string();
        report.switches += 1;
        tracing::debug!(%date, model = %retry_provider, state = %AssemblyState::Switching, "Retrying day");

        match composer.compose(requester, &retry_provider, date, &subject).await {
            Ok(post) => remote_entry(date, subject, post, retry_provider),
            Err(second) => {
                note_failure(report, second);
                tracing::warn!(%date, state = %AssemblyState::Degraded, "Both attempts failed, using template");

                let post = composer.compose_template(date, &subject);
                crate::metrics::record_post_generated("template");
                CalendarEntry {
                    date,
                    subject,
                    post,
                    source: PostSource::TemplateFallback,
                }
            }
        }
    }
}

fn remote_entry(date: NaiveDate, subject: PostSubject, post: String, provider: String) -> CalendarEntry {
    tracing::info!(
        %date,
        model = %provider,
        preview = %crate::utils::preview(&post, 60),
        "Generated post"
    );
    crate::metrics::record_post_generated("remote");

    CalendarEntry {
        date,
        subject,
        post,
        source: PostSource::Provider(provider),
    }
}

fn note_failure(report: &mut BatchReport, failure: GenerationFailure) {
    tracing::warn!(
        provider = %failure.provider,
        kind = %failure.kind,
        detail = %failure.detail,
        "Provider attempt failed"
    );
    crate::metrics::record_provider_failure(&failure.provider, failure.kind.as_str());
    report.failures.push(failure);
}
