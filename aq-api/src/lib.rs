//! Thin HTTP client over the external interpolation/query backend.
//!
//! Both endpoints take the whole query as one URL-encoded JSON path segment:
//! `GET <root>/heatmap/<encoded>` and `GET <root>/linegraph/<encoded>`.
//! There is deliberately no retry, timeout or caching here; every failure
//! propagates to the caller, which clears the form's busy state and surfaces
//! a generic message. On wasm32 `reqwest` rides the browser's fetch API, so
//! the same client works in the app and in native tests.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use aq_core::{GraphQuery, HeatmapQuery, HeatmapResponse, LineGraphResponse};

/// API root used when `AQ_API_ROOT` is not set at build time.
const DEFAULT_API_ROOT: &str = "http://127.0.0.1:5000";

/// Gateway failure, propagated untouched to the submitting form.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to encode query: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("request failed: {0}")]
    Request(reqwest::Error),
    #[error("backend returned status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(reqwest::Error),
}

/// Where the backend lives. The root is compiled in: it comes from the
/// `AQ_API_ROOT` environment variable at build time, falling back to the
/// local development server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn from_env() -> Self {
        Self::new(option_env!("AQ_API_ROOT").unwrap_or(DEFAULT_API_ROOT))
    }
}

/// HTTP client wrapper, one instance per dispatched request is fine: the
/// underlying `reqwest::Client` is cheap on wasm32.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config, http: reqwest::Client::new() }
    }

    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    /// Spatially interpolated samples per time bucket for a heatmap query.
    pub async fn fetch_heatmap(&self, query: &HeatmapQuery) -> Result<HeatmapResponse, ApiError> {
        self.get_json("heatmap", query).await
    }

    /// Per-indicator time-series for a line-graph query.
    pub async fn fetch_line_graph(&self, query: &GraphQuery) -> Result<LineGraphResponse, ApiError> {
        self.get_json("linegraph", query).await
    }

    async fn get_json<Q, R>(&self, endpoint: &str, query: &Q) -> Result<R, ApiError>
    where
        Q: Serialize,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_string(query)?;
        let url = endpoint_url(&self.config.base_url, endpoint, &payload);
        log::debug!("GET {url}");

        let response = self.http.get(&url).send().await.map_err(ApiError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        response.json::<R>().await.map_err(ApiError::Decode)
    }
}

/// Builds `<root>/<endpoint>/<url-encoded payload>`. The payload is a single
/// path segment, so everything outside the unreserved set is percent-encoded.
fn endpoint_url(base_url: &str, endpoint: &str, payload_json: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        endpoint,
        urlencoding::encode(payload_json)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_core::{GraphInterval, GraphQueryBuilder};

    #[test]
    fn test_endpoint_url_shape() {
        let url = endpoint_url("http://127.0.0.1:5000", "heatmap", r#"{"a":1}"#);
        assert_eq!(url, "http://127.0.0.1:5000/heatmap/%7B%22a%22%3A1%7D");
    }

    #[test]
    fn test_trailing_slash_is_tolerated() {
        let url = endpoint_url("http://api.example.org/", "linegraph", "{}");
        assert_eq!(url, "http://api.example.org/linegraph/%7B%7D");
    }

    #[test]
    fn test_graph_query_round_trips_through_the_url() {
        let mut builder = GraphQueryBuilder::new();
        builder.toggle_indicator("MP2.5", true);
        builder.interval(GraphInterval::Monthly);
        builder.set_month("6");
        let query = builder.build().unwrap();

        let payload = serde_json::to_string(&query).unwrap();
        let url = endpoint_url(DEFAULT_API_ROOT, "linegraph", &payload);
        let encoded = url.rsplit('/').next().unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        let parsed: aq_core::GraphQuery = serde_json::from_str(&decoded).unwrap();
        assert_eq!(parsed, query);
    }
}
