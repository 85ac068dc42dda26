//! Type definitions for the javadoc index engine

use serde::{Deserialize, Serialize};

/// One resolvable type or annotation harvested from a javadoc site.
///
/// Field names follow the `type-search-index.js` wire format: `p` is the
/// package and `l` the label. Labels of nested types use dot notation
/// (`Outer.Inner`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeElement {
    #[serde(rename = "p", default)]
    pub package: String,
    #[serde(rename = "l")]
    pub label: String,
}

impl TypeElement {
    pub fn new(package: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            label: label.into(),
        }
    }

    /// Label with nested-type dots converted to `$` (`Outer$Inner`).
    pub fn class_name(&self) -> String {
        self.label.replace('.', "$")
    }
}

/// Raw HTTP response as seen by the cache layer
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

/// Result of a single index strategy attempt.
///
/// `Failed` is recoverable: the caller decides whether to try the next
/// strategy or give up.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(Vec<TypeElement>),
    Failed(FetchError),
}

/// Error types for fetching and caching remote javadoc indexes
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    BadStatus { url: String, status: u16 },

    #[error("Malformed search index at {url}: {reason}")]
    MalformedSearchIndex {
        url: String,
        reason: String,
        body: String,
    },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("No usable type index for {base_url} (search index: {primary}; all-classes listing: {fallback})")]
    Exhausted {
        base_url: String,
        primary: Box<FetchError>,
        fallback: Box<FetchError>,
    },

    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Status code of a `BadStatus` error, if that is what this is
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::BadStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for the index engine
pub type FetchResult<T> = Result<T, FetchError>;
