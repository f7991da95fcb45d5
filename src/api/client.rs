//
//  atlassian-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for Atlassian APIs
//!
//! This module provides the transport shared by the Jira, Bitbucket and
//! Confluence clients. It owns the base URL, the HTTP session, the
//! credentials and the per-request timeout, and decodes response bodies into
//! [`Record`]s.
//!
//! ## Features
//!
//! - Basic or Bearer authentication header injection
//! - JSON request bodies and lenient JSON response decoding
//! - Status code mapping to [`ApiError`]
//! - Per-request timeout (60 seconds unless configured)
//! - `tracing` events recorded under a caller-supplied span

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use tracing::{debug, error, Instrument, Span};
use url::Url;

use super::common::{ApiError, Page, PageQuery, PageSource, Paginator, Payload, Record};
use crate::auth::AuthCredential;
use crate::config::{HostConfig, DEFAULT_TIMEOUT_SECS};
use crate::logging;

/// Builds the headers sent with every request.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// The HTTP transport for one Atlassian instance.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use std::time::Duration;
/// use atlassian_api::api::AtlassianClient;
/// use atlassian_api::auth::AuthCredential;
///
/// let client = AtlassianClient::new("https://jira.company.com/")?
///     .with_auth(AuthCredential::basic("your_username", "your_password"))
///     .with_timeout(Duration::from_secs(30));
/// assert_eq!(client.base_url(), "https://jira.company.com");
/// # Ok::<(), atlassian_api::api::ApiError>(())
/// ```
///
/// # Notes
///
/// - Requests are sent one at a time by the methods of this crate
/// - The client is cheap to clone; clones share the connection pool
#[derive(Debug, Clone)]
pub struct AtlassianClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URL without trailing slash
    base_url: String,
    /// Optional authentication credentials
    auth: Option<AuthCredential>,
    /// Timeout applied to each request
    timeout: Duration,
    /// Span the client's events are recorded under
    span: Span,
}

impl AtlassianClient {
    /// Creates a client for the instance at `url`.
    ///
    /// Leading and trailing slashes are stripped from `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `url` is not an absolute URL, or
    /// [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn new(url: &str) -> Result<Self, ApiError> {
        let base_url = url.trim_matches('/').to_string();
        Url::parse(&base_url)?;

        let http = Client::builder()
            .user_agent(format!("atlassian-api/{}", crate::VERSION))
            .default_headers(default_headers())
            .build()?;

        Ok(Self {
            http,
            span: logging::client_span(&base_url),
            base_url,
            auth: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Creates a client from a host configuration section.
    ///
    /// The configured timeout and credential are applied.
    pub fn from_host_config(config: &HostConfig) -> Result<Self, ApiError> {
        let mut client = Self::new(&config.url)?.with_timeout(Duration::from_secs(config.timeout));
        client.auth = config.credential();
        Ok(client)
    }

    /// Sets the authentication credentials for this client.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the timeout applied to each request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the HTTP session, e.g. to share a connection pool or proxy setup.
    ///
    /// Default headers configured on `http` are kept as they are; the JSON
    /// content headers are not added to a caller-supplied session.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Records this client's events under `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns the base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the configured credentials, if any.
    pub fn auth(&self) -> Option<&AuthCredential> {
        self.auth.as_ref()
    }

    /// Returns the span this client records under.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Joins `path` onto the base URL; an empty path yields the base URL.
    pub fn url_for(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Sends a request and returns the raw response, whatever its status.
    ///
    /// # Parameters
    ///
    /// * `method` - HTTP verb
    /// * `path` - API path appended to the base URL
    /// * `query` - Query string pairs
    /// * `body` - Optional JSON body
    ///
    /// # Errors
    ///
    /// Only transport failures (connection, timeout) are errors here.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Response, ApiError> {
        let url = self.url_for(path);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .timeout(self.timeout);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }

        let response = request.send().instrument(self.span.clone()).await?;
        let status = response.status();
        self.span.in_scope(|| {
            debug!(
                "HTTP: {} {} -> {} {}",
                method,
                url,
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )
        });

        Ok(response)
    }

    /// Sends a request and returns the body of a successful response.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<String, ApiError> {
        let response = self.request(method, path, query, body).await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &text));
        }

        Ok(text)
    }

    /// Makes an HTTP GET request.
    ///
    /// # Returns
    ///
    /// - [`Payload::Empty`] when the response has no body
    /// - [`Payload::Json`] when the body is JSON
    /// - [`Payload::Text`] when the body is anything else
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures and non-2xx statuses.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use atlassian_api::api::AtlassianClient;
    ///
    /// # async fn example() -> Result<(), atlassian_api::api::ApiError> {
    /// let client = AtlassianClient::new("https://jira.company.com")?;
    /// let issue = client.get("/rest/api/2/issue/TEST-1", &[]).await?.into_record_or_empty();
    /// println!("{:?}", issue.pointer("/fields/summary"));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Payload, ApiError> {
        let text = self.execute(Method::GET, path, query, None).await?;

        if text.trim().is_empty() {
            return Ok(Payload::Empty);
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(Payload::Json(Record::from(value))),
            Err(e) => {
                self.span
                    .in_scope(|| error!("GET {} returned a non-JSON body: {}", path, e));
                Ok(Payload::Text(text))
            }
        }
    }

    /// Makes an HTTP POST request with a JSON body.
    ///
    /// Returns `None` when the response body is empty or not JSON.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Option<Record>, ApiError> {
        let text = self.execute(Method::POST, path, &[], Some(body)).await?;
        Ok(self.decode_optional(&text))
    }

    /// Makes an HTTP PUT request with a JSON body.
    ///
    /// Returns `None` when the response body is empty or not JSON.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Option<Record>, ApiError> {
        let text = self.execute(Method::PUT, path, &[], Some(body)).await?;
        Ok(self.decode_optional(&text))
    }

    /// Makes an HTTP DELETE request, optionally with a JSON body.
    ///
    /// Returns `None` when the response body is empty or not JSON, which is
    /// the usual answer to a DELETE.
    pub async fn delete(&self, path: &str, body: Option<&Value>) -> Result<Option<Record>, ApiError> {
        let text = self.execute(Method::DELETE, path, &[], body).await?;
        Ok(self.decode_optional(&text))
    }

    /// Fetches every record of a paginated endpoint.
    ///
    /// See [`Paginator::fetch_all`] for the paging rules.
    pub async fn fetch_all(&self, path: &str, query: PageQuery) -> Result<Vec<Record>, ApiError> {
        Paginator::new(self)
            .with_span(self.span.clone())
            .fetch_all(path, query)
            .await
    }

    fn decode_optional(&self, text: &str) -> Option<Record> {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Some(Record::from(value)),
            Err(_) => {
                self.span
                    .in_scope(|| debug!("Received response with no content."));
                None
            }
        }
    }
}

#[async_trait]
impl PageSource for AtlassianClient {
    async fn fetch_page(&self, path: &str, query: &PageQuery) -> Result<Page, ApiError> {
        let payload = self.get(path, &query.to_pairs()).await?;
        Ok(Page::from_payload(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        let client = AtlassianClient::new("https://example.com/").unwrap();
        assert_eq!(client.base_url(), "https://example.com");
        assert_eq!(client.timeout(), Duration::from_secs(60));
        assert!(client.auth().is_none());
    }

    #[test]
    fn test_url_for() {
        let client = AtlassianClient::new("https://example.com").unwrap();
        assert_eq!(client.url_for("/api/test"), "https://example.com/api/test");
        assert_eq!(client.url_for(""), "https://example.com");
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            AtlassianClient::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_from_host_config() {
        let config = HostConfig {
            token: Some("test_token".into()),
            timeout: 30,
            ..HostConfig::new("https://example.com/")
        };
        let client = AtlassianClient::from_host_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://example.com");
        assert_eq!(client.timeout(), Duration::from_secs(30));
        assert_eq!(client.auth(), Some(&AuthCredential::bearer("test_token")));
    }
}
