//! Transit REST API HTTP client.
//!
//! Turns an endpoint path plus a flat parameter mapping into a single GET,
//! then classifies the outcome:
//!
//! - no response at all -> [`TransitError::Network`]
//! - non-2xx status -> [`TransitError::Transport`]
//! - 2xx with `{error: true, msg}` -> [`TransitError::Upstream`]
//! - anything else is decoded and handed back unchanged

use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::core::config::UpstreamConfig;

use super::error::TransitError;
use super::models::UpstreamErrorBody;
use super::query::QueryParams;
use super::validators::is_dot_segment;

/// Client for the upstream transit API.
///
/// Holds no per-request state: clone it freely and share it between
/// concurrent tool calls. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TransitClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TransitClient {
    /// Create a client for the configured upstream.
    pub fn new(config: &UpstreamConfig) -> Result<Self, TransitError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| TransitError::InvalidBaseUrl(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(TransitError::InvalidBaseUrl(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransitError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// Build the full request URL.
    ///
    /// Each path segment is percent-encoded on its own, so an identifier
    /// containing `/` or spaces stays a single segment. Dot segments are
    /// refused: the URL parser would drop them and hit another endpoint.
    pub fn endpoint_url(&self, segments: &[&str], query: &QueryParams) -> Result<Url, TransitError> {
        if let Some(dot) = segments.iter().find(|s| is_dot_segment(s)) {
            return Err(TransitError::InvalidPathSegment(dot.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransitError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        let query_string = query
            .to_query_string()
            .map_err(|e| TransitError::InvalidQuery(e.to_string()))?;
        if !query_string.is_empty() {
            url.set_query(Some(&query_string));
        }

        Ok(url)
    }

    /// Perform a GET and decode the JSON body as `T`.
    #[instrument(skip_all, fields(path = %segments.join("/")))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &QueryParams,
    ) -> Result<T, TransitError> {
        let url = self.endpoint_url(segments, query)?;
        debug!("GET {}", url);

        let response = self.http.get(url).send().await.map_err(|e| {
            warn!("Request failed before a response: {}", e);
            TransitError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| UpstreamErrorBody::detect(&body));
            warn!("Upstream returned HTTP {}", status.as_u16());
            return Err(TransitError::Transport {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TransitError::Decode(e.to_string()))?;

        if let Some(msg) = UpstreamErrorBody::detect(&body) {
            warn!("Upstream reported an error: {}", msg);
            return Err(TransitError::Upstream(msg));
        }

        serde_json::from_value(body).map_err(|e| TransitError::Decode(e.to_string()))
    }
}
