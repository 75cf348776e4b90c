//! Biographical snippets

use serde::{Deserialize, Serialize};

/// Shortest allowed fact length, whatever the terminal width
pub const MIN_FACT_LEN: usize = 150;

/// Longest allowed fact length
pub const MAX_FACT_LEN: usize = 300;

/// Suffix appended to truncated facts
pub const ELLIPSIS: &str = "...";

/// How a fact was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactKind {
    Found,
    NotFound,
    Failed,
}

/// A text snippet with the page it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub text: String,
    pub source: Option<String>,
    pub kind: FactKind,
}

impl Fact {
    pub fn found(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: Some(source.into()),
            kind: FactKind::Found,
        }
    }

    pub fn not_found(name: &str) -> Self {
        Self {
            text: format!("No specific facts found for {}.", name),
            source: None,
            kind: FactKind::NotFound,
        }
    }

    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self {
            text: format!("Error retrieving facts: {}", reason),
            source: None,
            kind: FactKind::Failed,
        }
    }

    pub fn is_found(&self) -> bool {
        self.kind == FactKind::Found
    }
}

/// Fact length for a terminal `width` columns wide: twice the width, kept in [150, 300]
pub fn fact_max_len(width: usize) -> usize {
    width.saturating_mul(2).clamp(MIN_FACT_LEN, MAX_FACT_LEN)
}

/// Keep the first `max_len` characters and mark the cut with an ellipsis
pub fn truncate_fact(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}
