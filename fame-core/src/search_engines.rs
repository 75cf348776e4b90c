//! Search engine registry
//!
//! The fixed set of surface-web engines probed for popularity signals, with
//! their URL templates, weighting multipliers and extraction rules.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// How an engine's result page is turned into a raw count.
///
/// The rule is plain data; the HTML work lives in `fame-net`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionRule {
    /// Count `<a href>` anchors whose visible text mentions the query
    LinkMentions,
    /// Count elements matching a CSS selector
    Containers { selector: Cow<'static, str> },
    /// Count containers, but prefer a "N results" annotation when one parses
    AnnotatedContainers {
        selector: Cow<'static, str>,
        annotation: Cow<'static, str>,
    },
}

/// A search engine probed for result volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEngine {
    /// Fixed engine identifier
    pub name: Cow<'static, str>,
    /// URL template with {query} placeholder
    pub url_template: Cow<'static, str>,
    /// Multiplier applied to the structural count
    pub weight: u64,
    /// Extraction rule for this engine's markup
    pub rule: ExtractionRule,
}

impl SearchEngine {
    /// Build search URL for a query
    pub fn build_url(&self, query: &str) -> String {
        self.url_template
            .replace("{query}", &urlencoding::encode(query))
    }

    /// Point this engine at a different URL template, keeping its rule and weight
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = Cow::Owned(template.into());
        self
    }
}

/// Weighting multipliers, hand-tuned per engine
pub const ASK_WEIGHT: u64 = 1000;
pub const AOL_WEIGHT: u64 = 2000;
pub const BING_WEIGHT: u64 = 8000;
pub const ECOSIA_WEIGHT: u64 = 5000;

/// Default engines, in query order
pub static DEFAULT_SEARCH_ENGINES: &[SearchEngine] = &[
    SearchEngine {
        name: Cow::Borrowed("ask"),
        url_template: Cow::Borrowed("https://www.ask.com/web?q={query}"),
        weight: ASK_WEIGHT,
        rule: ExtractionRule::LinkMentions,
    },
    SearchEngine {
        name: Cow::Borrowed("aol"),
        url_template: Cow::Borrowed("https://search.aol.com/aol/search?q={query}"),
        weight: AOL_WEIGHT,
        rule: ExtractionRule::LinkMentions,
    },
    SearchEngine {
        name: Cow::Borrowed("bing"),
        url_template: Cow::Borrowed("https://www.bing.com/search?q={query}"),
        weight: BING_WEIGHT,
        rule: ExtractionRule::AnnotatedContainers {
            selector: Cow::Borrowed("li.b_algo"),
            annotation: Cow::Borrowed("span.sb_count"),
        },
    },
    SearchEngine {
        name: Cow::Borrowed("ecosia"),
        url_template: Cow::Borrowed("https://www.ecosia.org/search?q={query}"),
        weight: ECOSIA_WEIGHT,
        rule: ExtractionRule::Containers {
            selector: Cow::Borrowed("div.result"),
        },
    },
];

/// Owned copy of the default engine list
pub fn default_engines() -> Vec<SearchEngine> {
    DEFAULT_SEARCH_ENGINES.to_vec()
}

/// Look up a default engine by name
pub fn engine_by_name(name: &str) -> Option<&'static SearchEngine> {
    DEFAULT_SEARCH_ENGINES.iter().find(|e| e.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let engine = &DEFAULT_SEARCH_ENGINES[0];
        let url = engine.build_url("Taylor Swift");
        assert_eq!(url, "https://www.ask.com/web?q=Taylor%20Swift");
    }

    #[test]
    fn test_build_url_escapes_reserved() {
        let bing = engine_by_name("bing").unwrap();
        let url = bing.build_url("AT&T");
        assert!(url.ends_with("?q=AT%26T"));
    }

    #[test]
    fn test_engine_order_and_weights() {
        let names: Vec<_> = DEFAULT_SEARCH_ENGINES.iter().map(|e| &*e.name).collect();
        assert_eq!(names, ["ask", "aol", "bing", "ecosia"]);

        let weights: Vec<_> = DEFAULT_SEARCH_ENGINES.iter().map(|e| e.weight).collect();
        assert_eq!(weights, [1000, 2000, 8000, 5000]);
    }

    #[test]
    fn test_with_template() {
        let engine = engine_by_name("ecosia")
            .unwrap()
            .clone()
            .with_template("http://127.0.0.1:9999/ecosia?q={query}");
        assert_eq!(engine.build_url("x y"), "http://127.0.0.1:9999/ecosia?q=x%20y");
        assert_eq!(engine.weight, ECOSIA_WEIGHT);
    }
}
