//
//  atlassian-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for Jira, Bitbucket and Confluence
//!
//! This module provides the types shared by every product client: the error
//! type, the decoded response body, the field-addressable [`Record`] and the
//! pagination machinery.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`Payload`] - Decoded body of a GET request
//! - [`Record`] - JSON value with safe field lookup
//! - Pagination types (re-exported from the `pagination` submodule)
//!
//! # Example
//!
//! ```rust
//! use atlassian_api::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::AuthFailed(reason)) => println!("Check your credentials: {}", reason),
//!         Err(ApiError::NotFound(resource)) => println!("Resource not found: {}", resource),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use thiserror::Error;

mod pagination;
mod record;

pub use pagination::*;
pub use record::*;

/// Unified error type for all Atlassian API operations.
///
/// Every non-2xx response is mapped to one of the status variants below; the
/// message is taken from the Atlassian error body when one is present and
/// falls back to the standard reason phrase for the code.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `BadRequest` | Invalid request parameters | 400 |
/// | `AuthFailed` | Missing, invalid or expired credentials | 401 |
/// | `Forbidden` | Insufficient permissions | 403 |
/// | `NotFound` | Requested resource does not exist | 404 |
/// | `RateLimited` | Too many requests | 429 |
/// | `ServerError` | Internal server error | 5xx |
/// | `Status` | Any other unsuccessful status | other |
/// | `Network` | Connectivity, timeout or body read failure | N/A |
/// | `InvalidUrl` | The configured base URL cannot be parsed | N/A |
/// | `InvalidArgument` | A wrapper was called with unusable input | N/A |
///
/// # Example
///
/// ```rust
/// use atlassian_api::api::common::ApiError;
///
/// let error = ApiError::from_response(404, "");
/// assert_eq!(error.code(), Some(404));
/// assert_eq!(error.to_string(), "Resource not found: Not Found");
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request was malformed or contained invalid parameters.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Authentication failed due to missing, invalid or expired credentials.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Access to the resource is forbidden.
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// An internal server error occurred on the Atlassian server.
    #[error("Server error [{code}]: {message}")]
    ServerError {
        /// The 5xx status code
        code: u16,
        /// Error message from the server or the reason phrase
        message: String,
    },

    /// Any other unsuccessful HTTP status.
    #[error("Error [{code}] : {message}")]
    Status {
        /// The HTTP status code
        code: u16,
        /// Error message from the server or the reason phrase
        message: String,
    },

    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, timeouts, DNS resolution errors,
    /// and failures reading the response body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The base URL given to the client is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A wrapper method was called with arguments it cannot turn into a request.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    /// Builds the error for an unsuccessful HTTP response.
    ///
    /// # Parameters
    ///
    /// * `code` - The HTTP status code
    /// * `body` - The raw response body (may be empty)
    pub fn from_response(code: u16, body: &str) -> Self {
        let message =
            extract_error_message(body).unwrap_or_else(|| status_message(code).to_string());

        match code {
            400 => Self::BadRequest(message),
            401 => Self::AuthFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimited,
            500..=599 => Self::ServerError { code, message },
            _ => Self::Status { code, message },
        }
    }

    /// Returns the HTTP status code behind this error, if there is one.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::RateLimited => Some(429),
            Self::ServerError { code, .. } | Self::Status { code, .. } => Some(*code),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) | Self::InvalidArgument(_) => None,
        }
    }
}

/// Extracts a human readable message from an Atlassian error body.
///
/// Jira, Bitbucket Server and Confluence use different shapes:
///
/// ```json
/// {"errors": [{"message": "Repository does not exist."}]}
/// {"errorMessages": ["Issue does not exist or you do not have permission to see it."], "errors": {}}
/// {"message": "No content found with id: 42", "statusCode": 404}
/// ```
///
/// Returns `None` when the body is empty, not JSON, or carries no message.
fn extract_error_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;

    // Bitbucket Server: {"errors": [{"message": "..."}]}
    if let Some(message) = json
        .get("errors")
        .and_then(|e| e.as_array())
        .and_then(|arr| arr.first())
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }

    // Jira: {"errorMessages": ["..."]}
    if let Some(message) = json
        .get("errorMessages")
        .and_then(|e| e.as_array())
        .and_then(|arr| arr.first())
        .and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }

    // Confluence and others: {"message": "..."}
    json.get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

/// Returns the standard reason phrase for an HTTP status code.
///
/// Codes outside the table map to `"Unknown Error"`.
///
/// # Example
///
/// ```rust
/// use atlassian_api::api::common::status_message;
///
/// assert_eq!(status_message(404), "Not Found");
/// assert_eq!(status_message(999), "Unknown Error");
/// ```
pub fn status_message(code: u16) -> &'static str {
    match code {
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        307 => "Temporary Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Time-out",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Request Entity Too Large",
        414 => "Request-URI Too Large",
        415 => "Unsupported Media Type",
        416 => "Requested range not satisfiable",
        417 => "Expectation Failed",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Time-out",
        505 => "HTTP Version not supported",
        _ => "Unknown Error",
    }
}

/// Decoded body of a GET request.
///
/// GET responses are decoded leniently: an empty body is not an error, and a
/// body that is not JSON is handed back as text.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The server returned no body.
    Empty,
    /// The body parsed as JSON.
    Json(Record),
    /// The body was not valid JSON.
    Text(String),
}

impl Payload {
    /// Returns the JSON record, if the body was JSON.
    pub fn into_record(self) -> Option<Record> {
        match self {
            Self::Json(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the JSON record, or an empty object for empty and text bodies.
    pub fn into_record_or_empty(self) -> Record {
        self.into_record().unwrap_or_else(Record::empty)
    }
}
