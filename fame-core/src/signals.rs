//! Popularity signals gathered from search engines
//!
//! Each engine yields an [`EngineResult`]; the weighted results add up to an
//! aggregate [`Signal`]. A signal is either measured from real pages or
//! estimated by the random fallback when every engine came back empty.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Query;

/// Bounds of the random base drawn when no engine produced anything
pub const FALLBACK_BASE_MIN: u64 = 5_000;
pub const FALLBACK_BASE_MAX: u64 = 100_000;

/// Aggregate popularity signal for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum Signal {
    /// Summed from engine results
    Measured(u64),
    /// Synthesized because every engine reported zero
    Estimated(u64),
}

impl Signal {
    pub fn value(&self) -> u64 {
        match self {
            Signal::Measured(v) | Signal::Estimated(v) => *v,
        }
    }

    pub fn is_estimated(&self) -> bool {
        matches!(self, Signal::Estimated(_))
    }

    /// Turn a raw engine total into a signal, estimating one if it is zero
    pub fn resolve<R: Rng + ?Sized>(total: u64, query: &Query, rng: &mut R) -> Self {
        if total > 0 {
            return Signal::Measured(total);
        }

        let base = rng.gen_range(FALLBACK_BASE_MIN..=FALLBACK_BASE_MAX);
        let multiplier = query.token_count() as f64 * 0.5 + 1.0;
        Signal::Estimated((base as f64 * multiplier) as u64)
    }
}

/// Why an engine contributed what it did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum EngineOutcome {
    /// Page fetched and parsed
    Counted,
    /// Engine answered with a non-success status
    HttpStatus(u16),
    /// Request failed before a response arrived
    Failed(String),
}

/// One engine's contribution to the aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineResult {
    /// Engine identifier
    pub engine: String,
    /// Weighted popularity proxy
    pub value: u64,
    pub outcome: EngineOutcome,
}

impl EngineResult {
    pub fn counted(engine: impl Into<String>, value: u64) -> Self {
        Self {
            engine: engine.into(),
            value,
            outcome: EngineOutcome::Counted,
        }
    }

    pub fn http_status(engine: impl Into<String>, status: u16) -> Self {
        Self {
            engine: engine.into(),
            value: 0,
            outcome: EngineOutcome::HttpStatus(status),
        }
    }

    pub fn failed(engine: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            value: 0,
            outcome: EngineOutcome::Failed(reason.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self.outcome, EngineOutcome::Counted)
    }
}

/// Ordered per-engine breakdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineBreakdown(Vec<EngineResult>);

impl EngineBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: EngineResult) {
        self.0.push(result);
    }

    /// Sum of all engine values
    pub fn total(&self) -> u64 {
        self.0.iter().map(|r| r.value).fold(0u64, u64::saturating_add)
    }

    pub fn get(&self, engine: &str) -> Option<&EngineResult> {
        self.0.iter().find(|r| r.engine == engine)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EngineResult> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn failures(&self) -> usize {
        self.0.iter().filter(|r| r.is_failure()).count()
    }
}

impl FromIterator<EngineResult> for EngineBreakdown {
    fn from_iter<I: IntoIterator<Item = EngineResult>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EngineBreakdown {
    type Item = &'a EngineResult;
    type IntoIter = std::slice::Iter<'a, EngineResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_nonzero_total_is_measured() {
        let q = Query::parse("Ada Lovelace").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(Signal::resolve(42_000, &q, &mut rng), Signal::Measured(42_000));
    }

    #[test]
    fn test_zero_total_is_estimated_within_bounds() {
        let q = Query::parse("Ada King Lovelace").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        // three tokens: multiplier 2.5
        for _ in 0..500 {
            let signal = Signal::resolve(0, &q, &mut rng);
            assert!(signal.is_estimated());
            assert!(signal.value() >= 12_500);
            assert!(signal.value() <= 250_000);
        }
    }

    #[test]
    fn test_breakdown_total_and_failures() {
        let breakdown: EngineBreakdown = vec![
            EngineResult::counted("ask", 3_000),
            EngineResult::http_status("aol", 503),
            EngineResult::counted("bing", 1_250_000),
            EngineResult::failed("ecosia", "timed out"),
        ]
        .into_iter()
        .collect();

        assert_eq!(breakdown.total(), 1_253_000);
        assert_eq!(breakdown.failures(), 2);
        assert_eq!(breakdown.get("aol").map(|r| r.value), Some(0));
    }

    #[test]
    fn test_signal_serializes_tagged() {
        let json = serde_json::to_string(&Signal::Estimated(10)).unwrap();
        assert_eq!(json, r#"{"source":"estimated","value":10}"#);
    }
}
