//! Product search API access.
//!
//! [`ProductSource`] is the seam between the pipeline and the network. The
//! builder treats any [`FetchError`] as "no products for this niche".

use std::time::Duration;

use reqwest::{StatusCode, blocking::Client};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use nichepage_core::{CoreError, config::ApiConfig};

/// Product fetch errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure, including timeouts.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned status {status}")]
    Status {
        /// HTTP status code.
        status: StatusCode,
    },

    /// The response body was not valid JSON.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Something that can produce a raw search payload for a niche.
pub trait ProductSource {
    /// Fetch the raw payload for `niche`.
    fn fetch(&self, niche: &str) -> Result<Value>;
}

/// Blocking client for a RapidAPI-hosted product search endpoint.
#[derive(Debug)]
pub struct RapidApiClient {
    client: Client,
    endpoint: String,
    host: String,
    api_key: String,
    country: String,
    page: u32,
}

impl RapidApiClient {
    /// Create a client from the API configuration.
    ///
    /// A missing or blank API key is a configuration error.
    pub fn new(api: &ApiConfig) -> std::result::Result<Self, CoreError> {
        let api_key = api
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                CoreError::config("missing API key (set RAPIDAPI_KEY or api.api_key)")
            })?
            .to_string();

        let client = build_client(api.timeout())
            .map_err(|e| CoreError::config_with_source("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            endpoint: api.endpoint(),
            host: api.host.clone(),
            api_key,
            country: api.country.clone(),
            page: api.page,
        })
    }

    /// The search endpoint this client queries.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ProductSource for RapidApiClient {
    fn fetch(&self, niche: &str) -> Result<Value> {
        debug!(endpoint = %self.endpoint, niche, "querying product search");

        let page = self.page.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host)
            .query(&[
                ("keyword", niche),
                ("country", self.country.as_str()),
                ("page", page.as_str()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let body = response.text()?;
        info!(niche, bytes = body.len(), "fetched search results");
        parse_payload(&body)
    }
}

fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("nichepage/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Decode a response body into a raw payload.
pub fn parse_payload(body: &str) -> Result<Value> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload() {
        let value = parse_payload(r#"{"docs": [{"title": "Mat"}]}"#).unwrap();
        assert_eq!(value["docs"][0]["title"], "Mat");
    }

    #[test]
    fn test_parse_payload_rejects_garbage() {
        let err = parse_payload("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, FetchError::Json(_)));
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_client_requires_api_key() {
        let api = ApiConfig::default();
        let err = RapidApiClient::new(&api).unwrap_err();
        assert!(matches!(err, CoreError::Config { source: None, .. }));
        assert!(err.to_string().contains("missing API key"));

        let api = ApiConfig {
            api_key: Some("  ".to_string()),
            ..ApiConfig::default()
        };
        assert!(RapidApiClient::new(&api).is_err());
    }

    #[test]
    fn test_client_endpoint() {
        let api = ApiConfig {
            api_key: Some("secret".to_string()),
            ..ApiConfig::default()
        };
        let client = RapidApiClient::new(&api).unwrap();
        assert_eq!(client.endpoint(), "https://amazon24.p.rapidapi.com/api/product");
    }

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            status: StatusCode::TOO_MANY_REQUESTS,
        };
        assert_eq!(err.to_string(), "API returned status 429 Too Many Requests");
    }
}
