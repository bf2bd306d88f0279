//! Unified error handling for the postcal crate
//!
//! This module provides a unified error type that consolidates the
//! domain-specific errors into a single `Error` enum, while keeping the
//! domain errors usable on their own.
//!
//! # Architecture
//!
//! - [`PostcalErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! Provider failures ([`GenerationFailure`]) are absorbed by the calendar
//! assembler and only surface here from single-shot operations such as
//! hashtag derivation or post improvement.

use std::io;
use thiserror::Error;

pub use crate::llm::{GenerationFailure, RosterError};

/// Common trait for all postcal error types
pub trait PostcalErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout)
    Network,
    /// LLM provider errors
    Llm,
    /// Invalid caller input (dates, missing fields)
    Input,
    /// Configuration and validation errors
    Config,
    /// Serialization errors
    Parsing,
    /// I/O errors
    Storage,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Llm => "llm",
            Self::Input => "input",
            Self::Config => "config",
            Self::Parsing => "parsing",
            Self::Storage => "storage",
            Self::Other => "other",
        }
    }
}

impl PostcalErrorTrait for GenerationFailure {
    fn is_recoverable(&self) -> bool {
        true
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Llm
    }
}

/// Unified error type for the postcal crate
#[derive(Error, Debug)]
pub enum Error {
    /// A single provider exchange failed
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationFailure),

    /// Invalid model roster
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML config parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PostcalErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Generation(e) => e.is_recoverable(),
            Self::Roster(_) => false,
            Self::InvalidInput(_) => false,
            Self::Io(_) => true,
            Self::Json(_) => false,
            Self::Toml(_) => false,
            Self::Http(_) => true,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Generation(_) => ErrorCategory::Llm,
            Self::Roster(_) | Self::Config(_) | Self::Toml(_) => ErrorCategory::Config,
            Self::InvalidInput(_) => ErrorCategory::Input,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Parsing,
            Self::Http(_) => ErrorCategory::Network,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an input validation error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T, E = Error> = std::result::Result<T, E>;
