//! Configuration management for postcal
//!
//! Configuration comes from environment variables (optionally seeded from a
//! `.env` file by the binary) or from a TOML file. The Groq API key is only
//! ever read from `GROQ_API_KEY`; it is never loaded from or written to a file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;
use url::Url;

use crate::calendar::CalendarConfig;
use crate::error::{Error, Result};
use crate::holidays::HolidayConfig;
use crate::llm::LlmConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model provider
    pub llm: LlmConfig,

    /// Holiday service
    pub holidays: HolidayConfig,

    /// Batch limits
    pub calendar: CalendarConfig,

    /// HTTP API
    pub server: ServerConfig,

    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: String,

    /// Enable CORS for API
    pub enable_cors: bool,

    /// Enable request logging
    pub enable_request_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: String::from("0.0.0.0:3000"),
            enable_cors: true,
            enable_request_logging: true,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .map_err(|_| Error::config(format!("Invalid bind address: {}", self.bind_address)))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.llm.api_key = std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty());

        if let Ok(endpoint) = std::env::var("POSTCAL_LLM_ENDPOINT") {
            config.llm.endpoint = endpoint;
        }

        if let Ok(models) = std::env::var("POSTCAL_MODELS") {
            config.llm.models = models
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(temperature) = env_parse("POSTCAL_TEMPERATURE") {
            config.llm.temperature = temperature;
        }
        if let Some(max_tokens) = env_parse("POSTCAL_MAX_TOKENS") {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(timeout) = env_parse("POSTCAL_LLM_TIMEOUT") {
            config.llm.timeout_secs = timeout;
        }
        if let Some(rpm) = env_parse("POSTCAL_REQUESTS_PER_MINUTE") {
            config.llm.requests_per_minute = Some(rpm);
        }

        if let Ok(endpoint) = std::env::var("POSTCAL_HOLIDAY_ENDPOINT") {
            config.holidays.endpoint = endpoint;
        }
        if let Ok(country) = std::env::var("POSTCAL_DEFAULT_COUNTRY") {
            config.holidays.default_country = country.to_uppercase();
        }

        if let Some(max_days) = env_parse("POSTCAL_MAX_DAYS") {
            config.calendar.max_days = max_days;
        }

        if let Ok(bind) = std::env::var("POSTCAL_BIND_ADDRESS") {
            config.server.bind_address = bind;
        }

        if let Ok(level) = std::env::var("POSTCAL_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("POSTCAL_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file; the API key still comes from the environment
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::with_source(format!("Failed to read config file: {}", path.display()), e)
        })?;

        let mut config: Self = toml::from_str(&content)?;
        config.llm.api_key = std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty());

        Ok(config)
    }

    /// File when given, environment otherwise; always validated
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.llm.models.is_empty() {
            return Err(Error::config("model roster must not be empty"));
        }

        let mut seen = HashSet::new();
        for model in &self.llm.models {
            if !seen.insert(model) {
                return Err(Error::config(format!("duplicate model in roster: {model}")));
            }
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(Error::config("temperature must be between 0.0 and 2.0"));
        }

        if self.llm.max_tokens == 0 {
            return Err(Error::config("max_tokens must be greater than 0"));
        }

        if self.llm.timeout_secs == 0 || self.holidays.timeout_secs == 0 {
            return Err(Error::config("timeouts must be greater than 0"));
        }

        if self.llm.requests_per_minute == Some(0) {
            return Err(Error::config("requests_per_minute must be greater than 0"));
        }

        if self.calendar.max_days == 0 {
            return Err(Error::config("calendar.max_days must be greater than 0"));
        }

        for (name, endpoint) in [
            ("llm.endpoint", &self.llm.endpoint),
            ("holidays.endpoint", &self.holidays.endpoint),
        ] {
            Url::parse(endpoint)
                .map_err(|e| Error::config(format!("{name} is not a valid URL: {e}")))?;
        }

        self.server.socket_addr()?;

        Ok(())
    }
}
