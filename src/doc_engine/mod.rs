//! Doc Engine - javadoc index harvesting
//!
//! This module gathers type names from a locally rendered javadoc site and
//! from the javadoc sites of external libraries, and composes them into a
//! [`NameIndex`].

use std::path::Path;
use tracing::{info, warn};

use crate::index_core::{LocationPolicy, NameIndex, NameIndexBuilder};

pub mod cache;
pub mod catalog;
pub mod config;
pub mod fetcher;
pub mod local;
pub mod scraper;
pub mod types;

use crate::doc_engine::cache::Cache;
use crate::doc_engine::config::JavadocConfig;
use crate::doc_engine::fetcher::HttpTransport;
use crate::doc_engine::scraper::JavadocScraper;
use crate::doc_engine::types::{FetchResult, TypeElement};

/// Composes the site scanner and the remote fetcher into a [`NameIndex`]
pub struct IndexBuilder<'a> {
    cache: &'a Cache,
    transport: &'a dyn HttpTransport,
    always_external: Vec<String>,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(cache: &'a Cache, transport: &'a dyn HttpTransport) -> Self {
        Self {
            cache,
            transport,
            always_external: Vec::new(),
        }
    }

    /// Packages that keep their external location prefix even when known
    pub fn always_external(mut self, packages: Vec<String>) -> Self {
        self.always_external = packages;
        self
    }

    /// Build the index: the local site first, then every configured library
    /// in document order.
    ///
    /// A library for which every strategy fails aborts the build.
    pub async fn build(
        &self,
        site_root: Option<&Path>,
        config: &JavadocConfig,
    ) -> FetchResult<NameIndex> {
        let mut builder = NameIndexBuilder::new();

        if let Some(root) = site_root {
            local::scan_site(root, &mut builder)?;
        }

        let policy = LocationPolicy::new(
            config.known_packages.clone(),
            self.always_external.clone(),
        );
        let scraper = JavadocScraper::new(self.cache, self.transport);

        for library in &config.libraries {
            if library.has_unresolved_placeholder() {
                warn!(
                    "Javadoc site {} still has an unresolved placeholder: {}",
                    library.placeholder, library.url
                );
            }
            info!("Indexing {} ({})", library.placeholder, library.url);
            let elements = scraper.fetch_elements(&library.url).await?;
            register_elements(&mut builder, &policy, &library.location_prefix(), &elements);
        }

        let index = builder.build();
        let stats = self.cache.statistics();
        info!(
            "Name index ready: {} keys, {} ambiguous (cache hits: {}, misses: {})",
            index.len(),
            index.ambiguous_count(),
            stats.hits,
            stats.misses
        );
        Ok(index)
    }
}

/// Register remote elements, resolving each location through `policy`
pub fn register_elements(
    builder: &mut NameIndexBuilder,
    policy: &LocationPolicy,
    location_prefix: &str,
    elements: &[TypeElement],
) {
    for element in elements {
        let class_name = element.class_name();
        let location = policy.resolve(location_prefix, &element.package, &class_name);
        builder.register_type(&element.package, &class_name, &location);
    }
}
