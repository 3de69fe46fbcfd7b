use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::config::RegistryConfig;
use crate::source::{FetchError, FetchFuture, Metric, Suggestion, SuggestionSource};

/// Autocomplete endpoint relative to the registry base URL
const SEARCH_PATH: &str = "/search_package";

#[derive(Serialize)]
struct SearchRequest<'a> {
    search_query: &'a str,
}

/// Source backed by the registry's package autocomplete API
pub struct RegistrySource {
    client: reqwest::Client,
    endpoint: String,
}

impl RegistrySource {
    pub fn new(config: &RegistryConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client: {}, using defaults", e);
                reqwest::Client::new()
            });
        Self {
            client,
            endpoint: format!("{}{}", config.base_url.trim_end_matches('/'), SEARCH_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SuggestionSource for RegistrySource {
    fn name(&self) -> &str {
        "registry"
    }

    fn fetch(&self, query: &str) -> FetchFuture {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let query = query.to_string();
        Box::pin(async move {
            let response = client
                .post(&endpoint)
                .json(&SearchRequest {
                    search_query: &query,
                })
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status));
            }

            let body = response.bytes().await?;
            let suggestions = parse_suggestions(&body)?;
            tracing::debug!("Registry returned {} suggestions for '{}'", suggestions.len(), query);
            Ok(suggestions)
        })
    }
}

/// Decode a search response body. Rows are either `[name, description, version]`
/// tuples or objects; fields that are missing or of the wrong type become empty.
pub fn parse_suggestions(body: &[u8]) -> Result<Vec<Suggestion>, FetchError> {
    let rows: Vec<Value> = serde_json::from_slice(body)?;
    Ok(rows.iter().map(suggestion_from_value).collect())
}

fn suggestion_from_value(row: &Value) -> Suggestion {
    match row {
        Value::Array(fields) => {
            let name = field_text(fields.first());
            Suggestion {
                key: name.clone(),
                name,
                description: field_text(fields.get(1)),
                version: field_text(fields.get(2)),
                metrics: Vec::new(),
            }
        }
        Value::Object(fields) => {
            let name = field_text(fields.get("name"));
            let key = match field_text(fields.get("slug")) {
                slug if slug.is_empty() => name.clone(),
                slug => slug,
            };
            let metrics = [("downloads", "total_downloads_count"), ("stars", "stars_count")]
                .into_iter()
                .filter_map(|(label, field)| {
                    let value = fields.get(field)?.as_u64()?;
                    Some(Metric {
                        label: label.to_string(),
                        value,
                    })
                })
                .collect();
            Suggestion {
                name,
                description: field_text(fields.get("description")),
                version: field_text(fields.get("version")),
                key,
                metrics,
            }
        }
        _ => Suggestion::default(),
    }
}

/// Plain text for a JSON field; anything that isn't a string or number is empty
fn field_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
