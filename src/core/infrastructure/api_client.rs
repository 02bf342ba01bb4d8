//! Internal HTTP client that speaks XML to the oVirt REST API.

use crate::{
    ApiConnection, ApiErrorKind, OsnapError, OsnapResult, RateLimitConfig, ValidationError,
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{
    Client, Method,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::{Serialize, de::DeserializeOwned};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const XML_CONTENT_TYPE: &str = "application/xml";

/// Internal HTTP client that authenticates every request and translates
/// between XML payloads and domain types.
///
/// Every request carries HTTP basic auth with the configured credentials.
/// Non-success statuses are turned into [`OsnapError::Api`] with an
/// [`ApiErrorKind`] so callers never have to look at status lines.
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    connection: Arc<ApiConnection>,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Errors
    /// Returns `OsnapError::Connection` if the HTTP client cannot be built and
    /// `OsnapError::Validation` if the rate limit has a zero component.
    pub fn new(
        connection: ApiConnection,
        rate_limit: Option<RateLimitConfig>,
    ) -> OsnapResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(connection.accept_invalid_certs())
            .build()
            .map_err(|e| OsnapError::Connection(e.to_string()))?;

        let rate_limiter = rate_limit.map(build_rate_limiter).transpose()?;

        Ok(Self {
            http_client,
            connection: Arc::new(connection),
            rate_limiter,
        })
    }

    /// Returns a reference to the underlying connection details.
    pub fn connection(&self) -> &ApiConnection {
        &self.connection
    }

    /// Performs an authenticated GET request and decodes the XML response.
    pub async fn get<T>(&self, path: &str) -> OsnapResult<T>
    where
        T: DeserializeOwned,
    {
        self.get_with_query(path, &[]).await
    }

    /// Performs an authenticated GET request with query parameters.
    pub async fn get_with_query<T>(&self, path: &str, query: &[(&str, &str)]) -> OsnapResult<T>
    where
        T: DeserializeOwned,
    {
        let mut url = self.connection.url().endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        let body = self.execute_request(Method::GET, url, None).await?;
        decode(&body)
    }

    /// Performs an authenticated POST request with an XML body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> OsnapResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.connection.url().endpoint(path)?;
        let payload = encode(body)?;
        let response = self.execute_request(Method::POST, url, Some(payload)).await?;
        decode(&response)
    }

    /// Performs an authenticated DELETE request. The response body is ignored.
    pub async fn delete(&self, path: &str) -> OsnapResult<()> {
        let url = self.connection.url().endpoint(path)?;
        self.execute_request(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Core request execution method. Applies rate limiting, sends the
    /// request and classifies the response status.
    async fn execute_request(
        &self,
        method: Method,
        url: Url,
        body: Option<String>,
    ) -> OsnapResult<String> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        debug!(method = %method, url = %url, "Sending request");

        let mut req_builder = self
            .http_client
            .request(method, url)
            .basic_auth(
                self.connection.username().as_str(),
                Some(self.connection.password().as_str()),
            )
            .header(ACCEPT, XML_CONTENT_TYPE);

        if let Some(body) = body {
            debug!(body = %body, "Request body");
            req_builder = req_builder.header(CONTENT_TYPE, XML_CONTENT_TYPE).body(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| OsnapError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| OsnapError::Connection(format!("Failed to read response: {}", e)))?;
        debug!(status = %status, body = %text, "Received response");

        if !status.is_success() {
            return Err(OsnapError::Api {
                kind: ApiErrorKind::from_status(status.as_u16()),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(text)
    }
}

fn build_rate_limiter(rl: RateLimitConfig) -> OsnapResult<Arc<DefaultDirectRateLimiter>> {
    let per_second = NonZeroU32::new(rl.requests_per_second).ok_or_else(|| {
        ValidationError::ConstraintViolation("requests_per_second must be at least 1".to_string())
    })?;
    let burst = NonZeroU32::new(rl.burst_size).ok_or_else(|| {
        ValidationError::ConstraintViolation("burst_size must be at least 1".to_string())
    })?;
    let quota = Quota::per_second(per_second).allow_burst(burst);
    Ok(Arc::new(DefaultDirectRateLimiter::direct(quota)))
}

fn encode<B: Serialize>(body: &B) -> OsnapResult<String> {
    quick_xml::se::to_string(body)
        .map_err(|e| OsnapError::Xml(format!("Failed to encode request: {}", e)))
}

fn decode<T: DeserializeOwned>(body: &str) -> OsnapResult<T> {
    quick_xml::de::from_str(body)
        .map_err(|e| OsnapError::Xml(format!("Failed to parse response: {}", e)))
}
