//
//  atlassian-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Jira, Bitbucket Server and Confluence accept two kinds of credentials:
//!
//! - **Basic Authentication**: username and password (or API token used as
//!   the password on Atlassian Cloud).
//! - **Bearer Token**: a Personal Access Token on Server/Data Center.
//!
//! ## Example
//!
//! ```rust
//! use atlassian_api::auth::AuthCredential;
//!
//! let basic = AuthCredential::basic("user", "pass");
//! assert_eq!(basic.authorization_header(), "Basic dXNlcjpwYXNz");
//!
//! let pat = AuthCredential::bearer("NjM0NTY3ODkw");
//! assert_eq!(pat.authorization_header(), "Bearer NjM0NTY3ODkw");
//! ```

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

/// Credentials attached to every request a client sends.
///
/// # Variants
///
/// - `Basic`: HTTP Basic authentication with username and password.
/// - `Bearer`: Personal Access Token sent as a bearer token.
///
/// # Notes
///
/// - The `Debug` output never contains the password or token.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// Basic HTTP authentication with username and password.
    Basic {
        /// The username for authentication.
        username: String,
        /// The password (or API token) for authentication.
        password: String,
    },
    /// Personal Access Token authentication.
    Bearer {
        /// The personal access token string.
        token: String,
    },
}

impl AuthCredential {
    /// Creates a Basic credential.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a Bearer credential.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Returns the value of the `Authorization` header for this credential.
    pub fn authorization_header(&self) -> String {
        match self {
            Self::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{}:{}", username, password));
                format!("Basic {}", encoded)
            }
            Self::Bearer { token } => format!("Bearer {}", token),
        }
    }

    /// Applies the authentication credential to an HTTP request.
    ///
    /// # Parameters
    ///
    /// - `request`: The [`RequestBuilder`] to add the `Authorization` header to.
    ///
    /// # Returns
    ///
    /// Returns the modified [`RequestBuilder`].
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.authorization_header())
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header() {
        let credential = AuthCredential::basic("testuser", "testpass");
        assert_eq!(
            credential.authorization_header(),
            format!("Basic {}", STANDARD.encode("testuser:testpass"))
        );
    }

    #[test]
    fn test_bearer_header() {
        let credential = AuthCredential::bearer("my_token");
        assert_eq!(credential.authorization_header(), "Bearer my_token");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let basic = format!("{:?}", AuthCredential::basic("user", "hunter2"));
        assert!(basic.contains("user"));
        assert!(!basic.contains("hunter2"));

        let bearer = format!("{:?}", AuthCredential::bearer("secret-token"));
        assert!(!bearer.contains("secret-token"));
    }
}
