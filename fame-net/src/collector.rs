//! Search engine signal collector
//!
//! Queries each engine in turn, extracts its popularity proxy and records a
//! zero for any engine that fails. One engine failing never stops the others.

use tracing::{debug, info, warn};

use fame_core::{EngineBreakdown, EngineResult, SearchEngine};

use crate::{Extractor, PageFetcher};

/// Probe a single engine: fetch `url`, extract, weight
pub async fn probe_engine<F>(
    fetcher: &F,
    name: &str,
    url: &str,
    weight: u64,
    extractor: &dyn Extractor,
    query: &str,
) -> EngineResult
where
    F: PageFetcher + ?Sized,
{
    debug!("Probing {} with query: {}", name, query);

    let page = match fetcher.fetch(url).await {
        Ok(page) => page,
        Err(e) => {
            warn!("Error with {}: {}", name, e);
            return EngineResult::failed(name, e.to_string());
        }
    };

    if !page.is_success() {
        warn!("Engine {} returned status: {}", name, page.status);
        return EngineResult::http_status(name, page.status);
    }

    match extractor.extract(&page.body, query) {
        Ok(extraction) => {
            let value = extraction.weighted(weight);
            debug!("Engine {} extracted {:?} -> {}", name, extraction, value);
            EngineResult::counted(name, value)
        }
        Err(e) => {
            warn!("Failed to parse {} results: {}", name, e);
            EngineResult::failed(name, e.to_string())
        }
    }
}

/// Query every engine in order, one at a time.
///
/// `on_result` is called after each engine finishes, with the engine's index
/// and result, so callers can report progress.
pub async fn collect_signals<F>(
    fetcher: &F,
    engines: &[SearchEngine],
    query: &str,
    mut on_result: impl FnMut(usize, &EngineResult),
) -> EngineBreakdown
where
    F: PageFetcher + ?Sized,
{
    let mut breakdown = EngineBreakdown::new();

    for (idx, engine) in engines.iter().enumerate() {
        let url = engine.build_url(query);
        let result = probe_engine(fetcher, &engine.name, &url, engine.weight, &engine.rule, query).await;

        on_result(idx, &result);
        breakdown.push(result);
    }

    info!(
        "Collected {} engines, total {} ({} failed)",
        breakdown.len(),
        breakdown.total(),
        breakdown.failures()
    );

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Extraction, FetchedPage, NetError};
    use async_trait::async_trait;
    use fame_core::{default_engines, EngineOutcome};
    use std::collections::HashMap;

    /// Serves canned pages by URL prefix; anything unknown fails
    struct StubFetcher {
        pages: HashMap<&'static str, (u16, String)>,
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, NetError> {
            self.pages
                .iter()
                .find(|(prefix, _)| url.starts_with(*prefix))
                .map(|(_, (status, body))| FetchedPage {
                    status: *status,
                    body: body.clone(),
                })
                .ok_or_else(|| NetError::InvalidUrl(url.to_string()))
        }
    }

    fn healthy_pages() -> HashMap<&'static str, (u16, String)> {
        HashMap::from([
            (
                "https://www.ask.com/",
                (200, r#"<a href="/1">Jane Doe</a><a href="/2">jane doe bio</a>"#.to_string()),
            ),
            (
                "https://search.aol.com/",
                (200, r#"<a href="/1">Jane Doe news</a>"#.to_string()),
            ),
            (
                "https://www.bing.com/",
                (200, r#"<li class="b_algo">1</li><li class="b_algo">2</li>"#.to_string()),
            ),
            (
                "https://www.ecosia.org/",
                (200, r#"<div class="result"></div>"#.to_string()),
            ),
        ])
    }

    #[tokio::test]
    async fn test_collect_sums_weighted_counts() {
        let fetcher = StubFetcher {
            pages: healthy_pages(),
        };

        let mut seen = Vec::new();
        let breakdown = collect_signals(&fetcher, &default_engines(), "Jane Doe", |idx, r| {
            seen.push((idx, r.engine.clone()))
        })
        .await;

        // ask 2*1000, aol 1*2000, bing 2*8000, ecosia 1*5000
        assert_eq!(breakdown.total(), 2_000 + 2_000 + 16_000 + 5_000);
        assert_eq!(breakdown.failures(), 0);
        assert_eq!(
            seen,
            vec![
                (0, "ask".to_string()),
                (1, "aol".to_string()),
                (2, "bing".to_string()),
                (3, "ecosia".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_non_success_engine_is_isolated() {
        let mut pages = healthy_pages();
        pages.insert("https://search.aol.com/", (503, "busy".to_string()));
        let fetcher = StubFetcher { pages };

        let breakdown = collect_signals(&fetcher, &default_engines(), "Jane Doe", |_, _| {}).await;

        let aol = breakdown.get("aol").unwrap();
        assert_eq!(aol.value, 0);
        assert_eq!(aol.outcome, EngineOutcome::HttpStatus(503));
        assert_eq!(breakdown.get("ask").unwrap().value, 2_000);
        assert_eq!(breakdown.get("bing").unwrap().value, 16_000);
        assert_eq!(breakdown.get("ecosia").unwrap().value, 5_000);
        assert_eq!(breakdown.total(), 23_000);
    }

    #[tokio::test]
    async fn test_network_error_is_isolated() {
        let mut pages = healthy_pages();
        pages.remove("https://www.ask.com/");
        let fetcher = StubFetcher { pages };

        let breakdown = collect_signals(&fetcher, &default_engines(), "Jane Doe", |_, _| {}).await;

        assert!(matches!(
            breakdown.get("ask").unwrap().outcome,
            EngineOutcome::Failed(_)
        ));
        assert_eq!(breakdown.total(), 23_000);
        assert_eq!(breakdown.len(), 4);
    }

    #[tokio::test]
    async fn test_probe_with_custom_extractor() {
        struct Fixed(u64);

        impl Extractor for Fixed {
            fn extract(&self, _html: &str, _query: &str) -> Result<Extraction, NetError> {
                Ok(Extraction::Structural(self.0))
            }
        }

        let fetcher = StubFetcher {
            pages: healthy_pages(),
        };
        let result = probe_engine(
            &fetcher,
            "custom",
            "https://www.ecosia.org/search?q=x",
            7,
            &Fixed(3),
            "x",
        )
        .await;

        assert_eq!(result, EngineResult::counted("custom", 21));
    }
}
