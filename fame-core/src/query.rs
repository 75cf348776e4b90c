//! The name being analyzed

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the domain layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Name cannot be empty. Please try again.")]
    EmptyQuery,
}

/// A trimmed, non-empty name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Trim raw input and reject it if nothing is left
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of whitespace-separated tokens
    pub fn token_count(&self) -> usize {
        self.0.split_whitespace().count()
    }

    /// Single-token names longer than three characters ("Madonna", "Pele")
    pub fn is_mononym(&self) -> bool {
        self.token_count() == 1 && self.0.chars().count() > 3
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
