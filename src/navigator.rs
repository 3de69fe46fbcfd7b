/// Failure to hand a destination to the host
#[derive(Debug, thiserror::Error)]
pub enum NavigateError {
    #[error("failed to open {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where a finished search goes
pub trait Navigator: Send + Sync {
    /// Open the package identified by a suggestion's navigation key
    fn select(&self, key: &str) -> Result<(), NavigateError>;

    /// Open the search results page for a free-text query
    fn search(&self, query: &str) -> Result<(), NavigateError>;
}

/// Opens registry pages in the system browser
pub struct BrowserNavigator {
    base_url: String,
}

impl BrowserNavigator {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn package_url(&self, key: &str) -> String {
        format!("{}/packages/{}", self.base_url, urlencoding::encode(key))
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/packages/search?query={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    fn open(&self, url: String) -> Result<(), NavigateError> {
        tracing::info!("Opening {}", url);
        open::that_detached(&url).map_err(|source| NavigateError::Open { url, source })
    }
}

impl Navigator for BrowserNavigator {
    fn select(&self, key: &str) -> Result<(), NavigateError> {
        self.open(self.package_url(key))
    }

    fn search(&self, query: &str) -> Result<(), NavigateError> {
        self.open(self.search_url(query))
    }
}
