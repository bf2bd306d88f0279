//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use postcal::holidays::{HolidayResolver, StaticHolidays};
use postcal::llm::{ContentRequester, FailureKind, GenerationFailure, Prompt};
use postcal::models::{CompanyProfile, Country, Holiday};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn profile() -> CompanyProfile {
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

/// In-memory requester answering from per-provider queues
///
/// When a provider's queue is empty it succeeds with `Post by {provider}`,
/// or fails with `UNKNOWN_ERROR` if built with [`ScriptedRequester::failing`].
#[derive(Default)]
pub struct ScriptedRequester {
    scripts: Mutex<HashMap<String, VecDeque<Result<String, GenerationFailure>>>>,
    calls: Mutex<Vec<(String, Prompt)>>,
    always_fail: bool,
}

impl ScriptedRequester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            always_fail: true,
            ..Self::default()
        }
    }

    pub fn reply(&self, provider: &str, text: &str) -> &Self {
        self.push(provider, Ok(text.to_string()))
    }

    pub fn fail(&self, provider: &str, kind: FailureKind) -> &Self {
        self.push(
            provider,
            Err(GenerationFailure::new(provider, kind, "scripted failure")),
        )
    }

    fn push(&self, provider: &str, result: Result<String, GenerationFailure>) -> &Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(provider.to_string())
            .or_default()
            .push_back(result);
        self
    }

    /// Providers in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(provider, _)| provider.clone())
            .collect()
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, prompt)| prompt.clone())
            .collect()
    }
}

#[async_trait]
impl ContentRequester for ScriptedRequester {
    async fn request(&self, prompt: &Prompt, provider: &str) -> Result<String, GenerationFailure> {
        self.calls
            .lock()
            .unwrap()
            .push((provider.to_string(), prompt.clone()));

        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(provider)
            .and_then(VecDeque::pop_front);

        match scripted {
            Some(result) => result,
            None if self.always_fail => Err(GenerationFailure::unknown(provider, "offline")),
            None => Ok(format!("Post by {provider}")),
        }
    }
}

/// Static holidays that count how often they were asked
#[derive(Default)]
pub struct CountingHolidays {
    inner: StaticHolidays,
    lookups: AtomicUsize,
}

impl CountingHolidays {
    pub fn new(holidays: Vec<Holiday>) -> Self {
        Self {
            inner: StaticHolidays::new(holidays),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HolidayResolver for CountingHolidays {
    async fn holidays(&self, year: i32, country_code: &str) -> Vec<Holiday> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.holidays(year, country_code).await
    }

    async fn available_countries(&self) -> Vec<Country> {
        vec![Country {
            country_code: "US".to_string(),
            name: "United States".to_string(),
        }]
    }
}
