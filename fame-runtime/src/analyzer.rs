//! Analysis pipeline
//!
//! Runs one analysis end to end:
//! - Query every engine in order and sum the weighted results
//! - Estimate a signal when every engine came back empty
//! - Score and band the signal
//! - Look up a fact about the name

use rand::Rng;
use tracing::{info, warn};

use fame_core::{default_engines, Assessment, EngineResult, Query, SearchEngine, Signal};
use fame_net::{collect_signals, retrieve_fact, FactConfig, HttpConfig, HttpFetcher, PageFetcher};

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// HTTP client settings
    pub http: HttpConfig,
    /// Engines to probe, in order
    pub engines: Vec<SearchEngine>,
    /// Fact sources and length policy
    pub facts: FactConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            engines: default_engines(),
            facts: FactConfig::default(),
        }
    }
}

/// Progress notifications emitted while an analysis runs
#[derive(Debug, Clone, Copy)]
pub enum AnalysisEvent<'a> {
    /// About to query `total` engines
    SearchStarted { total: usize },
    /// Engine `index` of `total` finished
    EngineFinished {
        index: usize,
        total: usize,
        result: &'a EngineResult,
    },
    /// Every engine came back empty; the signal was estimated
    SignalEstimated { value: u64 },
    /// Looking up a fact
    FactLookup,
}

/// Runs analyses against a page fetcher
pub struct Analyzer<F = HttpFetcher> {
    fetcher: F,
    engines: Vec<SearchEngine>,
    facts: FactConfig,
}

impl Analyzer<HttpFetcher> {
    /// Create an analyzer backed by a real HTTP client
    pub fn new(config: AnalyzerConfig) -> Result<Self, anyhow::Error> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Ok(Self::with_fetcher(fetcher, config))
    }
}

impl<F: PageFetcher> Analyzer<F> {
    /// Create an analyzer over any fetcher
    pub fn with_fetcher(fetcher: F, config: AnalyzerConfig) -> Self {
        Self {
            fetcher,
            engines: config.engines,
            facts: config.facts,
        }
    }

    pub fn engines(&self) -> &[SearchEngine] {
        &self.engines
    }

    /// Run the whole pipeline for a query
    pub async fn analyze<R, O>(&self, query: &Query, rng: &mut R, mut observer: O) -> Assessment
    where
        R: Rng + ?Sized,
        O: FnMut(AnalysisEvent<'_>),
    {
        let total = self.engines.len();
        info!("Analyzing {} across {} engines", query, total);
        observer(AnalysisEvent::SearchStarted { total });

        let engines = collect_signals(&self.fetcher, &self.engines, query.as_str(), |index, result| {
            observer(AnalysisEvent::EngineFinished {
                index,
                total,
                result,
            })
        })
        .await;

        let signal = Signal::resolve(engines.total(), query, rng);
        if let Signal::Estimated(value) = signal {
            warn!("No engine produced a signal for {}; estimated {}", query, value);
            observer(AnalysisEvent::SignalEstimated { value });
        }

        observer(AnalysisEvent::FactLookup);
        let fact = retrieve_fact(&self.fetcher, query.as_str(), &self.facts).await;

        let assessment = Assessment::new(query.clone(), signal, engines, fact);
        info!(
            "{} scored {:.1} ({})",
            query,
            assessment.fame.score,
            assessment.fame.category.label()
        );
        assessment
    }
}
