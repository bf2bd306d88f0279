//! postcal - Social post calendar generator
//!
//! Builds a day-by-day calendar of LinkedIn-style posts for a company:
//! holiday posts on public holidays, rotating business themes on every other
//! day. Posts come from a roster of remote models with one-step failover and
//! a deterministic template generator as the last resort, so a batch always
//! completes.
//!
//! # Architecture
//!
//! - [`config`] - Configuration from environment or TOML
//! - [`models`] - Core data structures and types
//! - [`llm`] - Provider requests, failure classification, model roster
//! - [`holidays`] - Public holiday lookup
//! - [`content`] - Prompts, template posts, hashtags, post improvement
//! - [`calendar`] - Per-day generate / switch / degrade state machine and exports
//! - [`engine`] - Facade owning the shared roster
//! - [`server`] - HTTP API
//! - [`metrics`] - Prometheus metrics
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use postcal::prelude::*;
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let engine = Engine::from_config(&config)?;
//!
//!     let profile = engine.build_profile(ProfileInput {
//!         name: "Acme".into(),
//!         ..Default::default()
//!     }).await;
//!
//!     let request = CalendarRequest::new(
//!         NaiveDate::from_ymd_opt(2025, 12, 22).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 12, 26).unwrap(),
//!         "US",
//!     );
//!     let entries = engine.generate_calendar(&profile, &request).await;
//!     println!("{}", postcal::calendar::export::to_text(&entries));
//!     Ok(())
//! }
//! ```

pub mod calendar;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod holidays;
pub mod llm;
pub mod metrics;
pub mod models;
pub mod server;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::calendar::{CalendarAssembler, CalendarBatch, CalendarRequest};
    pub use crate::config::Config;
    pub use crate::engine::{Engine, ProfileInput};
    pub use crate::error::{Error, ErrorCategory, PostcalErrorTrait, Result};
    pub use crate::holidays::HolidayResolver;
    pub use crate::llm::{ContentRequester, FailureKind, GenerationFailure, ModelRoster};
    pub use crate::models::{CalendarEntry, CompanyProfile, Holiday, PostSource, PostSubject, PostType};
}

// Direct re-exports for convenience
pub use models::{CalendarEntry, CompanyProfile, PostType};
