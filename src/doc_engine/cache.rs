//! Cache module for storing raw fetched bodies keyed by their source URL

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, info};

use crate::doc_engine::fetcher::HttpTransport;
use crate::doc_engine::types::{FetchError, FetchResult};

/// Prefix written in place of a body when the remote answered with a non-200 status
pub const ERROR_MARKER: &str = "!!fetch-error!! status=";

/// Flat on-disk cache of fetched bodies.
///
/// Once a URL has been resolved, successfully or with a bad status, it is
/// never fetched again: failures are persisted as an error marker and
/// re-raised on later lookups.
#[derive(Debug)]
pub struct Cache {
    cache_dir: PathBuf,
    stats: Mutex<CacheStatistics>,
}

/// Cache hit/miss counters for the current run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatistics {
    pub hits: u64,
    pub misses: u64,
}

impl Cache {
    /// Create a new cache rooted at `cache_dir`, creating the directory if needed
    pub fn new(cache_dir: impl AsRef<Path>) -> FetchResult<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(&cache_dir)?;
        Ok(Self {
            cache_dir,
            stats: Mutex::new(CacheStatistics::default()),
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache key for a URL: `:`, `/` and `.` replaced by `_`
    pub fn key_for(url: &str) -> String {
        url.replace([':', '/', '.'], "_")
    }

    pub fn path_for(&self, url: &str) -> PathBuf {
        self.cache_dir.join(Self::key_for(url))
    }

    /// Return the cached body for `url`, fetching and persisting it on a miss.
    ///
    /// A non-200 response is returned as [`FetchError::BadStatus`], both on
    /// the original fetch and on every later cache hit.
    pub async fn get_or_fetch(
        &self,
        url: &str,
        transport: &dyn HttpTransport,
    ) -> FetchResult<String> {
        let path = self.path_for(url);

        if path.exists() {
            self.record(true);
            let stored = fs::read_to_string(&path)?;
            debug!("Cache hit for: {}", url);
            return match parse_marker(&stored) {
                Some(status) => Err(FetchError::BadStatus {
                    url: url.to_string(),
                    status,
                }),
                None => Ok(stored),
            };
        }

        self.record(false);
        info!("Fetching {}", url);
        let response = transport.get(url).await?;

        if response.status == 200 {
            fs::write(&path, &response.body)?;
            debug!("Stored {} bytes for: {}", response.body.len(), url);
            Ok(response.body)
        } else {
            fs::write(&path, format!("{ERROR_MARKER}{}", response.status))?;
            debug!("Stored error marker ({}) for: {}", response.status, url);
            Err(FetchError::BadStatus {
                url: url.to_string(),
                status: response.status,
            })
        }
    }

    /// Snapshot of the hit/miss counters
    pub fn statistics(&self) -> CacheStatistics {
        self.stats.lock().map(|s| *s).unwrap_or_default()
    }

    fn record(&self, hit: bool) {
        if let Ok(mut stats) = self.stats.lock() {
            if hit {
                stats.hits += 1;
            } else {
                stats.misses += 1;
            }
        }
    }
}

fn parse_marker(stored: &str) -> Option<u16> {
    stored
        .strip_prefix(ERROR_MARKER)
        .and_then(|status| status.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_sanitizes_url() {
        assert_eq!(
            Cache::key_for("https://docs.spring.io/a/type-search-index.js"),
            "https___docs_spring_io_a_type-search-index_js"
        );
    }

    #[test]
    fn test_parse_marker() {
        assert_eq!(parse_marker("!!fetch-error!! status=404"), Some(404));
        assert_eq!(parse_marker("typeSearchIndex = []"), None);
    }
}
