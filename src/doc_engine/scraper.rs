//! Javadoc type index retrieval
//!
//! Two strategies are tried per library: the structured `type-search-index.js`
//! document emitted by modern javadoc, then a scrape of the legacy
//! `allclasses-frame.html` listing. A handful of libraries bypass both via a
//! built-in catalog.

use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::doc_engine::cache::Cache;
use crate::doc_engine::catalog;
use crate::doc_engine::fetcher::HttpTransport;
use crate::doc_engine::types::{FetchError, FetchOutcome, FetchResult, TypeElement};

/// Assignment token preceding the JSON array in `type-search-index.js`
pub const SEARCH_INDEX_PREFIX: &str = "typeSearchIndex = ";
const SEARCH_INDEX_SUFFIX: &str = ";updateSearchResults();";

pub const SEARCH_INDEX_FILE: &str = "type-search-index.js";
pub const ALL_CLASSES_FILE: &str = "allclasses-frame.html";

static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("static selector"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector"));

/// Build the URL of a javadoc document below `base_url`.
///
/// javadoc.io serves an HTML frame under `/doc/`; the raw files live under
/// `/static/`.
pub fn document_url(base_url: &str, file: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let base = if base.contains("://javadoc.io/doc/") {
        base.replacen("://javadoc.io/doc/", "://javadoc.io/static/", 1)
    } else {
        base.to_string()
    };
    format!("{base}/{file}")
}

/// Parse a `type-search-index.js` body into type elements.
///
/// Entries without a package (such as the synthetic "All Classes" link) are
/// dropped.
pub fn parse_type_search_index(url: &str, body: &str) -> FetchResult<Vec<TypeElement>> {
    let malformed = |reason: String| FetchError::MalformedSearchIndex {
        url: url.to_string(),
        reason,
        body: body.to_string(),
    };

    let json = body
        .trim_start()
        .strip_prefix(SEARCH_INDEX_PREFIX)
        .ok_or_else(|| malformed(format!("missing `{}` prefix", SEARCH_INDEX_PREFIX.trim())))?
        .trim_end();
    let json = json.strip_suffix(SEARCH_INDEX_SUFFIX).unwrap_or(json);
    let json = json.trim_end().trim_end_matches(';');

    let elements: Vec<TypeElement> =
        serde_json::from_str(json).map_err(|e| malformed(e.to_string()))?;

    Ok(elements
        .into_iter()
        .filter(|element| !element.package.is_empty())
        .collect())
}

/// Scrape an `allclasses-frame.html` listing into type elements.
///
/// Each `<li><a href="pkg/path/Class.html">Class</a></li>` entry yields one
/// element. Links are resolved against `page_url` and must point below the
/// page's own directory.
pub fn parse_all_classes(page_url: &str, html: &str) -> FetchResult<Vec<TypeElement>> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: page_url.to_string(),
        reason,
    };
    let page = Url::parse(page_url).map_err(|e| invalid(e.to_string()))?;
    let page_dir = page.join(".").map_err(|e| invalid(e.to_string()))?;

    let document = Html::parse_document(html);
    let mut elements = Vec::new();

    for item in document.select(&LIST_ITEM) {
        for anchor in item.select(&ANCHOR) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let label = anchor.text().collect::<String>().trim().to_string();
            if label.is_empty() {
                continue;
            }

            let Ok(mut target) = page.join(href) else {
                debug!("Skipping unparseable href: {}", href);
                continue;
            };
            target.set_fragment(None);
            target.set_query(None);

            let Some(relative) = target.as_str().strip_prefix(page_dir.as_str()) else {
                debug!("Skipping link outside the javadoc tree: {}", target);
                continue;
            };
            let relative = relative.strip_suffix(".html").unwrap_or(relative);

            let Some((package_path, _)) = relative.rsplit_once('/') else {
                continue;
            };
            elements.push(TypeElement::new(package_path.replace('/', "."), label));
        }
    }

    Ok(elements)
}

/// Retrieves the type listing of one javadoc site through the [`Cache`]
pub struct JavadocScraper<'a> {
    cache: &'a Cache,
    transport: &'a dyn HttpTransport,
}

impl<'a> JavadocScraper<'a> {
    pub fn new(cache: &'a Cache, transport: &'a dyn HttpTransport) -> Self {
        Self { cache, transport }
    }

    /// Primary strategy: the structured search index document
    #[instrument(skip(self))]
    pub async fn fetch_type_search_index(&self, base_url: &str) -> FetchResult<FetchOutcome> {
        let url = document_url(base_url, SEARCH_INDEX_FILE);
        let body = match self.cache.get_or_fetch(&url, self.transport).await {
            Ok(body) => body,
            Err(e @ FetchError::BadStatus { .. }) => return Ok(FetchOutcome::Failed(e)),
            Err(e) => return Err(e),
        };

        match parse_type_search_index(&url, &body) {
            Ok(elements) => Ok(FetchOutcome::Success(elements)),
            Err(e) => {
                let excerpt: String = body.chars().take(200).collect();
                warn!("{} (body starts with: {:?})", e, excerpt);
                Ok(FetchOutcome::Failed(e))
            }
        }
    }

    /// Fallback strategy: scrape the all-classes HTML listing
    #[instrument(skip(self))]
    pub async fn fetch_all_classes(&self, base_url: &str) -> FetchResult<FetchOutcome> {
        let url = document_url(base_url, ALL_CLASSES_FILE);
        let html = match self.cache.get_or_fetch(&url, self.transport).await {
            Ok(html) => html,
            Err(e @ FetchError::BadStatus { .. }) => return Ok(FetchOutcome::Failed(e)),
            Err(e) => return Err(e),
        };

        let elements = parse_all_classes(&url, &html)?;
        if elements.is_empty() {
            warn!("No classes found in {}", url);
        }
        Ok(FetchOutcome::Success(elements))
    }

    /// Type elements for the javadoc site at `base_url`.
    ///
    /// Built-in catalogs win; otherwise the search index is tried and, when
    /// it fails, the all-classes listing. Only when both fail is an
    /// [`FetchError::Exhausted`] error returned.
    pub async fn fetch_elements(&self, base_url: &str) -> FetchResult<Vec<TypeElement>> {
        if let Some(builtin) = catalog::builtin_for(base_url) {
            info!(
                "Using built-in catalog for {} ({} types)",
                base_url,
                builtin.labels.len()
            );
            return Ok(builtin.elements());
        }

        let primary = match self.fetch_type_search_index(base_url).await? {
            FetchOutcome::Success(elements) => {
                info!(
                    "Loaded {} types from search index of {}",
                    elements.len(),
                    base_url
                );
                return Ok(elements);
            }
            FetchOutcome::Failed(e) => e,
        };

        warn!("{}; falling back to all-classes listing", primary);
        match self.fetch_all_classes(base_url).await? {
            FetchOutcome::Success(elements) => {
                info!(
                    "Scraped {} types from all-classes listing of {}",
                    elements.len(),
                    base_url
                );
                Ok(elements)
            }
            FetchOutcome::Failed(fallback) => Err(FetchError::Exhausted {
                base_url: base_url.to_string(),
                primary: Box::new(primary),
                fallback: Box::new(fallback),
            }),
        }
    }
}
