//! HTTP transport to opentransportdata.swiss.
//!
//! Posts a request document and hands back the raw response text. No
//! retries: any failure is returned to the caller as-is.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use super::decode::decode_body;
use super::error::UpstreamError;
use super::schema::Schema;

/// Default base URL of the open data API.
pub const DEFAULT_BASE_URL: &str = "https://api.opentransportdata.swiss";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Sends a request document upstream and returns the response body.
pub trait Transport: Send + Sync {
    /// Post `body` and return the decoded response text.
    fn post(&self, body: String) -> impl Future<Output = Result<String, UpstreamError>> + Send;

    /// Schema of the documents this transport talks.
    fn schema(&self) -> Schema;
}

/// Configuration for the upstream client.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// API key, sent verbatim in the `Authorization` header
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Protocol version to talk
    pub schema: Schema,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            schema: Schema::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the protocol version.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the stop event endpoint.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
    schema: Schema,
}

impl UpstreamClient {
    /// Create a new client with the given configuration.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();

        let api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| UpstreamError::InvalidApiKey)?;
        headers.insert(AUTHORIZATION, api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/xml"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let url = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.schema.endpoint()
        );

        Ok(Self {
            http,
            url,
            schema: config.schema,
        })
    }

    /// Full URL requests are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for UpstreamClient {
    async fn post(&self, body: String) -> Result<String, UpstreamError> {
        debug!(url = %self.url, bytes = body.len(), "posting stop event request");

        let response = self.http.post(&self.url).body(body).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(UpstreamError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(UpstreamError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        let text = decode_body(content_type.as_deref(), &bytes);
        debug!(bytes = text.len(), "received stop event response");
        Ok(text)
    }

    fn schema(&self) -> Schema {
        self.schema
    }
}
