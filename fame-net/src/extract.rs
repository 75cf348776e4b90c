//! Per-engine result extraction
//!
//! Every engine turns a result page into a raw [`Extraction`] through the
//! [`Extractor`] trait. Built-in engines describe their markup with a
//! [`ExtractionRule`]; tests and new engines can supply their own extractor.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use fame_core::ExtractionRule;

use crate::NetError;

/// First digit group of a results annotation, thousands separated by commas
static COUNT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:,\d+)*)").unwrap());

/// What an extractor found on a result page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Count of structural cues; scaled by the engine weight
    Structural(u64),
    /// Result count the engine printed itself; taken as-is
    Annotated(u64),
}

impl Extraction {
    /// Contribution of this extraction for an engine with `weight`
    pub fn weighted(&self, weight: u64) -> u64 {
        match self {
            Extraction::Structural(count) => count.saturating_mul(weight),
            Extraction::Annotated(count) => *count,
        }
    }
}

/// Derives a popularity proxy from an engine's result page
pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str, query: &str) -> Result<Extraction, NetError>;
}

impl Extractor for ExtractionRule {
    fn extract(&self, html: &str, query: &str) -> Result<Extraction, NetError> {
        let document = Html::parse_document(html);

        match self {
            ExtractionRule::LinkMentions => {
                Ok(Extraction::Structural(count_link_mentions(&document, query)))
            }
            ExtractionRule::Containers { selector } => {
                Ok(Extraction::Structural(count_matches(&document, selector)?))
            }
            ExtractionRule::AnnotatedContainers {
                selector,
                annotation,
            } => {
                if let Some(count) = annotated_count(&document, annotation)? {
                    return Ok(Extraction::Annotated(count));
                }
                Ok(Extraction::Structural(count_matches(&document, selector)?))
            }
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector, NetError> {
    Selector::parse(selector).map_err(|e| NetError::Selector(format!("{selector}: {e:?}")))
}

/// Anchors with an href whose visible text contains the query, ignoring case
fn count_link_mentions(document: &Html, query: &str) -> u64 {
    let link_selector = Selector::parse("a[href]").unwrap();
    let needle = query.to_lowercase();

    document
        .select(&link_selector)
        .filter(|link| {
            link.text()
                .collect::<String>()
                .to_lowercase()
                .contains(&needle)
        })
        .count() as u64
}

fn count_matches(document: &Html, selector: &str) -> Result<u64, NetError> {
    let selector = parse_selector(selector)?;
    Ok(document.select(&selector).count() as u64)
}

/// Number printed in the first element matching `annotation`, if any parses
fn annotated_count(document: &Html, annotation: &str) -> Result<Option<u64>, NetError> {
    let selector = parse_selector(annotation)?;

    Ok(document
        .select(&selector)
        .next()
        .and_then(|el| parse_result_count(&el.text().collect::<String>())))
}

/// Parse the first comma-grouped number in text like "About 1,234,000 results"
pub fn parse_result_count(text: &str) -> Option<u64> {
    COUNT_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fame_core::engine_by_name;

    fn rule(name: &str) -> &'static ExtractionRule {
        &engine_by_name(name).unwrap().rule
    }

    #[test]
    fn test_link_mentions() {
        let html = r#"
            <html><body>
                <a href="/a">Ada Lovelace - Wikipedia</a>
                <a href="/b">ADA LOVELACE biography</a>
                <a>Ada Lovelace without href</a>
                <a href="/c">Charles Babbage</a>
            </body></html>
        "#;

        let extraction = rule("ask").extract(html, "ada lovelace").unwrap();
        assert_eq!(extraction, Extraction::Structural(2));
        assert_eq!(extraction.weighted(1000), 2000);
    }

    #[test]
    fn test_containers() {
        let html = r#"
            <div class="result">one</div>
            <div class="result extra">two</div>
            <div class="results">not counted</div>
        "#;

        let extraction = rule("ecosia").extract(html, "anything").unwrap();
        assert_eq!(extraction, Extraction::Structural(2));
    }

    #[test]
    fn test_annotation_takes_precedence() {
        let html = r#"
            <span class="sb_count">About 12,300,000 results</span>
            <ol>
                <li class="b_algo">r1</li>
                <li class="b_algo">r2</li>
            </ol>
        "#;

        let extraction = rule("bing").extract(html, "Jane Doe").unwrap();
        assert_eq!(extraction, Extraction::Annotated(12_300_000));
        assert_eq!(extraction.weighted(8000), 12_300_000);
    }

    #[test]
    fn test_annotation_without_digits_falls_back() {
        let html = r#"
            <span class="sb_count">No results</span>
            <li class="b_algo">r1</li>
            <li class="b_algo">r2</li>
            <li class="b_algo">r3</li>
        "#;

        let extraction = rule("bing").extract(html, "Jane Doe").unwrap();
        assert_eq!(extraction, Extraction::Structural(3));
        assert_eq!(extraction.weighted(8000), 24_000);
    }

    #[test]
    fn test_parse_result_count() {
        assert_eq!(parse_result_count("About 1,234 results"), Some(1234));
        assert_eq!(parse_result_count("42"), Some(42));
        assert_eq!(parse_result_count("none"), None);
        assert_eq!(parse_result_count("99,999,999,999,999,999,999,999"), None);
    }

    #[test]
    fn test_invalid_selector() {
        let rule = ExtractionRule::Containers {
            selector: "div[".into(),
        };
        assert!(matches!(rule.extract("<p></p>", "x"), Err(NetError::Selector(_))));
    }
}
