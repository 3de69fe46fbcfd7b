pub mod registry;

use std::future::Future;
use std::pin::Pin;

/// A ranked count shown next to a suggestion (e.g. downloads)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: String,
    pub value: u64,
}

/// A package suggestion returned by a source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestion {
    /// Display name (e.g. "serde")
    pub name: String,
    pub description: String,
    /// Latest version label
    pub version: String,
    /// Key handed to the navigator on selection (e.g. package slug)
    pub key: String,
    pub metrics: Vec<Metric>,
}

impl Suggestion {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_metric(mut self, label: impl Into<String>, value: u64) -> Self {
        self.metrics.push(Metric {
            label: label.into(),
            value,
        });
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("registry responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

pub type FetchFuture = Pin<Box<dyn Future<Output = Result<Vec<Suggestion>, FetchError>> + Send>>;

/// Fetches ranked suggestions for a query (extensibility point)
pub trait SuggestionSource: Send + Sync {
    /// Name of this source, for logging
    fn name(&self) -> &str;

    /// Fetch suggestions for `query`, in the order they should be shown
    fn fetch(&self, query: &str) -> FetchFuture;
}
