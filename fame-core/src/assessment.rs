//! Complete result of one analysis run

use serde::{Deserialize, Serialize};

use crate::{EngineBreakdown, Fact, FameScore, Query, Signal};

/// Everything the report shows about a name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub query: Query,
    pub signal: Signal,
    pub engines: EngineBreakdown,
    pub fame: FameScore,
    pub fact: Fact,
}

impl Assessment {
    /// Score the signal and bundle it with the rest of the run
    pub fn new(query: Query, signal: Signal, engines: EngineBreakdown, fact: Fact) -> Self {
        let fame = FameScore::compute(signal, &query);
        Self {
            query,
            signal,
            engines,
            fame,
            fact,
        }
    }

    /// True when the score rests on an estimated signal
    pub fn low_confidence(&self) -> bool {
        self.signal.is_estimated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineResult, FameCategory};

    #[test]
    fn test_assessment_scores_signal() {
        let engines: EngineBreakdown = vec![
            EngineResult::counted("ask", 0),
            EngineResult::counted("bing", 1_000_000),
        ]
        .into_iter()
        .collect();
        let assessment = Assessment::new(
            Query::parse("Jane Doe").unwrap(),
            Signal::Measured(engines.total()),
            engines,
            Fact::not_found("Jane Doe"),
        );

        assert_eq!(assessment.fame.category, FameCategory::Celebrity);
        assert!(!assessment.low_confidence());
    }

    #[test]
    fn test_assessment_json_shape() {
        let assessment = Assessment::new(
            Query::parse("Zendaya").unwrap(),
            Signal::Estimated(10_000),
            EngineBreakdown::new(),
            Fact::found("Zendaya is an actress.", "https://en.wikipedia.org/wiki/Zendaya"),
        );

        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["query"], "Zendaya");
        assert_eq!(json["signal"]["source"], "estimated");
        assert_eq!(json["fame"]["category"], "NOTABLE");
        assert_eq!(json["fact"]["kind"], "found");
    }

    #[test]
    fn test_json_category_matches_report_label() {
        for category in FameCategory::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, category.label());
        }
    }
}
