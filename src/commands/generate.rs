use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use postcal::calendar::{export, CalendarRequest};
use postcal::config::Config;
use postcal::engine::{Engine, ProfileInput};

use crate::OutputFormat;

pub struct GenerateParams {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub country: Option<String>,
    pub company: String,
    pub website: String,
    pub industry: String,
    pub services: Vec<String>,
    pub hashtags: Vec<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub async fn generate(config: &Config, params: GenerateParams) -> Result<()> {
    let engine = Engine::from_config(config).context("Failed to create engine")?;

    let country = params
        .country
        .map(|c| c.to_uppercase())
        .unwrap_or_else(|| engine.default_country().to_string());

    let request = CalendarRequest::new(params.start, params.end, country);
    engine.check_request(&request)?;

    let profile = engine
        .build_profile(ProfileInput {
            name: params.company,
            website: params.website,
            services: params.services,
            industry: params.industry,
            hashtags: params.hashtags,
        })
        .await;

    let batch = engine.run_batch(&profile, &request).await;

    let rendered = match params.format {
        OutputFormat::Json => export::to_json(&batch.entries)?,
        OutputFormat::Text => export::to_text(&batch.entries),
    };

    match &params.output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => println!("{rendered}"),
    }

    let report = &batch.report;
    eprintln!();
    eprintln!("Calendar Summary");
    eprintln!("================");
    eprintln!("  Days: {}", batch.entries.len());
    eprintln!("  Festival posts: {}", report.festival_posts);
    eprintln!("  Business posts: {}", report.business_posts);
    eprintln!("  From models: {}", report.remote_posts);
    eprintln!("  From templates: {}", report.template_posts);
    eprintln!("  Model switches: {}", report.switches);
    if let Some(path) = &params.output {
        eprintln!("  Written to: {}", path.display());
    }

    Ok(())
}
