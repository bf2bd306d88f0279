use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postcal::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "postcal",
    version,
    about = "Holiday-aware social post calendar generator with model failover",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file (environment variables are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the config value
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a post calendar for a date range
    Generate {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: chrono::NaiveDate,

        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: chrono::NaiveDate,

        /// Country code for the holiday lookup
        #[arg(long)]
        country: Option<String>,

        /// Company name
        #[arg(long, default_value = "")]
        company: String,

        /// Company website
        #[arg(long, default_value = "")]
        website: String,

        /// Industry label
        #[arg(long, default_value = "")]
        industry: String,

        /// Service description (repeatable)
        #[arg(long = "service")]
        services: Vec<String>,

        /// Hashtag without `#` (repeatable); skips hashtag generation
        #[arg(long = "hashtag")]
        hashtags: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Write the export to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List public holidays
    Holidays {
        #[arg(short, long)]
        year: i32,

        #[arg(long)]
        country: Option<String>,
    },

    /// List countries supported by the holiday service
    Countries,

    /// Show the configured model roster
    Models,

    /// Start the HTTP API server
    Serve {
        /// Bind address; overrides the config value
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    if let Err(e) = postcal::metrics::init_metrics() {
        tracing::warn!(error = %e, "Metrics initialization failed");
    }

    match cli.command {
        Commands::Generate {
            start,
            end,
            country,
            company,
            website,
            industry,
            services,
            hashtags,
            format,
            output,
        } => {
            tracing::info!(
                start = %start,
                end = %end,
                country = ?country,
                format = ?format,
                "Starting generate command"
            );
            commands::generate(
                &config,
                commands::GenerateParams {
                    start,
                    end,
                    country,
                    company,
                    website,
                    industry,
                    services,
                    hashtags,
                    format,
                    output,
                },
            )
            .await?;
        }

        Commands::Holidays { year, country } => {
            commands::holidays(&config, year, country).await?;
        }

        Commands::Countries => {
            commands::countries(&config).await?;
        }

        Commands::Models => {
            commands::models(&config)?;
        }

        Commands::Serve { bind } => {
            commands::serve(config, bind).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("postcal=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(format!("postcal={level},warn")))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
