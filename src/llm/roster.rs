//! Ordered model roster with failure bookkeeping
//!
//! Round-robin, not best-first: a failing model is skipped by moving the
//! cursor past it, and the cursor wraps back to it once every other model has
//! had its turn.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use super::DEFAULT_MODELS;

/// Errors raised while building a roster
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("model roster must contain at least one model")]
    Empty,

    #[error("model '{0}' appears more than once in the roster")]
    Duplicate(String),
}

/// Read-only snapshot of a roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterStatus {
    pub current_model: String,
    pub current_index: usize,
    pub total_models: usize,
    /// Only models that have failed at least once
    pub failures: BTreeMap<String, u32>,
    pub available_models: Vec<String>,
}

/// Model list + cursor + failure counts
#[derive(Debug, Clone)]
pub struct ModelRoster {
    models: Vec<String>,
    cursor: usize,
    failures: HashMap<String, u32>,
}

impl ModelRoster {
    /// Build a roster from an ordered, non-empty, duplicate-free model list
    pub fn new<I, S>(models: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let models: Vec<String> = models.into_iter().map(Into::into).collect();
        if models.is_empty() {
            return Err(RosterError::Empty);
        }

        let mut seen = HashSet::new();
        for model in &models {
            if !seen.insert(model.as_str()) {
                return Err(RosterError::Duplicate(model.clone()));
            }
        }

        Ok(Self {
            models,
            cursor: 0,
            failures: HashMap::new(),
        })
    }

    /// Roster over [`DEFAULT_MODELS`]
    pub fn with_defaults() -> Self {
        Self {
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            cursor: 0,
            failures: HashMap::new(),
        }
    }

    /// Model at the cursor
    pub fn current(&self) -> &str {
        &self.models[self.cursor]
    }

    /// Charge a failure to the current model and move to the next one
    pub fn advance(&mut self) -> &str {
        let failed = self.models[self.cursor].clone();
        *self.failures.entry(failed.clone()).or_insert(0) += 1;

        self.cursor = (self.cursor + 1) % self.models.len();
        let next = &self.models[self.cursor];

        tracing::info!(from = %failed, to = %next, "Switching model");
        crate::metrics::record_roster_switch();

        next
    }

    pub fn status(&self) -> RosterStatus {
        RosterStatus {
            current_model: self.current().to_string(),
            current_index: self.cursor,
            total_models: self.models.len(),
            failures: self
                .failures
                .iter()
                .map(|(model, count)| (model.clone(), *count))
                .collect(),
            available_models: self.models.clone(),
        }
    }

    /// Clear every failure count and rewind to the first model
    pub fn reset(&mut self) {
        self.failures.clear();
        self.cursor = 0;
        tracing::info!(model = %self.current(), "Reset model failures");
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn failures_for(&self, model: &str) -> u32 {
        self.failures.get(model).copied().unwrap_or(0)
    }
}

impl Default for ModelRoster {
    fn default() -> Self {
        Self::with_defaults()
    }
}
