//! Fact retriever
//!
//! Pulls a descriptive paragraph about a person from an encyclopedia article,
//! falling back to a "<name> facts" web search. Never fails: problems turn
//! into a placeholder fact.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use fame_core::{fact_max_len, truncate_fact, Fact};

use crate::PageFetcher;

/// Bracketed numeric citation markers such as `[12]`
static CITATION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\d+\]").unwrap());

/// Minimum length of an article paragraph worth quoting
const MIN_ARTICLE_PARAGRAPH: usize = 100;

/// Minimum length of a search snippet worth quoting
const MIN_SEARCH_SNIPPET: usize = 50;

/// Where facts come from and how long they may be
#[derive(Debug, Clone)]
pub struct FactConfig {
    /// Maximum fact length in characters before the ellipsis
    pub max_len: usize,
    /// Article base; the name is appended as a path segment
    pub encyclopedia_base: String,
    /// Search endpoint for the fallback query
    pub fallback_search_base: String,
}

impl Default for FactConfig {
    fn default() -> Self {
        Self {
            max_len: fact_max_len(80),
            encyclopedia_base: "https://en.wikipedia.org/wiki".to_string(),
            fallback_search_base: "https://www.bing.com/search".to_string(),
        }
    }
}

impl FactConfig {
    /// Size facts for a terminal `width` columns wide
    pub fn for_width(width: usize) -> Self {
        Self {
            max_len: fact_max_len(width),
            ..Self::default()
        }
    }

    pub fn article_url(&self, name: &str) -> String {
        format!(
            "{}/{}",
            self.encyclopedia_base.trim_end_matches('/'),
            urlencoding::encode(&name.replace(' ', "_"))
        )
    }

    pub fn fallback_url(&self, name: &str) -> String {
        format!("{}?q={}+facts", self.fallback_search_base, urlencoding::encode(name))
    }
}

/// Find a fact about `name`, trying the encyclopedia first
pub async fn retrieve_fact<F>(fetcher: &F, name: &str, config: &FactConfig) -> Fact
where
    F: PageFetcher + ?Sized,
{
    let article_url = config.article_url(name);

    match fetcher.fetch(&article_url).await {
        Ok(page) if page.is_success() => {
            if let Some(paragraph) = first_article_paragraph(&page.body) {
                info!("Found article paragraph for {}", name);
                return Fact::found(truncate_fact(&paragraph, config.max_len), article_url);
            }
            debug!("No qualifying paragraph at {}", article_url);
        }
        Ok(page) => debug!("Article {} returned status: {}", article_url, page.status),
        Err(e) => warn!("Article fetch for {} failed: {}", name, e),
    }

    let search_url = config.fallback_url(name);

    match fetcher.fetch(&search_url).await {
        Ok(page) if page.is_success() => {
            if let Some(snippet) = first_search_snippet(&page.body, name) {
                info!("Found search snippet for {}", name);
                return Fact::found(truncate_fact(&snippet, config.max_len), search_url);
            }
            Fact::not_found(name)
        }
        Ok(page) => {
            debug!("Fallback search returned status: {}", page.status);
            Fact::not_found(name)
        }
        Err(e) => {
            warn!("Fallback search for {} failed: {}", name, e);
            Fact::failed(e)
        }
    }
}

/// First article paragraph longer than 100 characters, cleaned of citations
fn first_article_paragraph(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let paragraph_selector = Selector::parse("div.mw-parser-output > p").unwrap();

    document
        .select(&paragraph_selector)
        .map(|p| p.text().collect::<String>())
        .find(|text| text.trim().chars().count() > MIN_ARTICLE_PARAGRAPH)
        .map(|text| normalize_whitespace(&CITATION_REGEX.replace_all(&text, "")))
}

/// First paragraph mentioning `name` (any case) longer than 50 characters
fn first_search_snippet(html: &str, name: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let paragraph_selector = Selector::parse("p").unwrap();
    let needle = name.to_lowercase();

    document
        .select(&paragraph_selector)
        .map(|p| p.text().collect::<String>())
        .find(|text| text.to_lowercase().contains(&needle) && text.chars().count() > MIN_SEARCH_SNIPPET)
}

/// Normalize whitespace in text
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
