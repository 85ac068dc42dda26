use async_trait::async_trait;
use javadoc_migrate::doc_engine::cache::{Cache, CacheStatistics, ERROR_MARKER};
use javadoc_migrate::doc_engine::fetcher::HttpTransport;
use javadoc_migrate::doc_engine::types::{FetchError, FetchResult, HttpResponse};
use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::tempdir;

/// Serves canned responses and records every requested URL
#[derive(Default)]
struct FakeTransport {
    responses: HashMap<String, HttpResponse>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    fn with(mut self, url: &str, response: HttpResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str) -> FetchResult<HttpResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(self
            .responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| HttpResponse::status(404)))
    }
}

/// Fails every request at the transport level
struct OfflineTransport;

#[async_trait]
impl HttpTransport for OfflineTransport {
    async fn get(&self, url: &str) -> FetchResult<HttpResponse> {
        Err(FetchError::Network {
            url: url.to_string(),
            message: "connection refused".to_string(),
        })
    }
}

const URL: &str = "https://docs.example.org/api/type-search-index.js";

#[test]
fn test_cache_creation() {
    let temp_dir = tempdir().unwrap();
    let nested = temp_dir.path().join("a").join("b");
    let cache = Cache::new(&nested).unwrap();
    assert!(nested.is_dir());
    assert_eq!(cache.cache_dir(), nested.as_path());
}

#[tokio::test]
async fn test_body_is_fetched_once() {
    let temp_dir = tempdir().unwrap();
    let cache = Cache::new(temp_dir.path()).unwrap();
    let transport = FakeTransport::default().with(URL, HttpResponse::ok("typeSearchIndex = []"));

    let first = cache.get_or_fetch(URL, &transport).await.unwrap();
    let second = cache.get_or_fetch(URL, &transport).await.unwrap();

    assert_eq!(first, "typeSearchIndex = []");
    assert_eq!(second, first);
    assert_eq!(transport.request_count(), 1);
    assert_eq!(cache.statistics(), CacheStatistics { hits: 1, misses: 1 });
}

#[tokio::test]
async fn test_body_stored_under_sanitized_key() {
    let temp_dir = tempdir().unwrap();
    let cache = Cache::new(temp_dir.path()).unwrap();
    let transport = FakeTransport::default().with(URL, HttpResponse::ok("body"));

    cache.get_or_fetch(URL, &transport).await.unwrap();

    let stored = temp_dir
        .path()
        .join("https___docs_example_org_api_type-search-index_js");
    assert_eq!(std::fs::read_to_string(stored).unwrap(), "body");
}

#[tokio::test]
async fn test_bad_status_is_persisted_and_replayed() {
    let temp_dir = tempdir().unwrap();
    let cache = Cache::new(temp_dir.path()).unwrap();
    let transport = FakeTransport::default().with(URL, HttpResponse::status(410));

    let first = cache.get_or_fetch(URL, &transport).await.unwrap_err();
    assert_eq!(first.status_code(), Some(410));

    let stored = std::fs::read_to_string(cache.path_for(URL)).unwrap();
    assert_eq!(stored, format!("{ERROR_MARKER}410"));

    let second = cache.get_or_fetch(URL, &transport).await.unwrap_err();
    match second {
        FetchError::BadStatus { url, status } => {
            assert_eq!(url, URL);
            assert_eq!(status, 410);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_cache_survives_new_instance() {
    let temp_dir = tempdir().unwrap();
    let transport = FakeTransport::default().with(URL, HttpResponse::ok("persisted"));

    Cache::new(temp_dir.path())
        .unwrap()
        .get_or_fetch(URL, &transport)
        .await
        .unwrap();

    let reopened = Cache::new(temp_dir.path()).unwrap();
    let body = reopened.get_or_fetch(URL, &OfflineTransport).await.unwrap();
    assert_eq!(body, "persisted");
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_network_errors_are_not_cached() {
    let temp_dir = tempdir().unwrap();
    let cache = Cache::new(temp_dir.path()).unwrap();

    let err = cache.get_or_fetch(URL, &OfflineTransport).await.unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }));
    assert!(!cache.path_for(URL).exists());
}
