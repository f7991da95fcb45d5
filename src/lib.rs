//
//  atlassian-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Atlassian API Library
//!
//! A thin client for the REST APIs of Jira, Bitbucket Server/Data Center and
//! Confluence.
//!
//! ## Overview
//!
//! Each product client wraps one [`api::AtlassianClient`], which owns the
//! base URL, credentials, timeout and HTTP session. Every method performs
//! one HTTP call (or, for listings, one call per result page) and returns
//! the decoded JSON as a [`api::Record`].
//!
//! ## Features
//!
//! - **Jira**: issues, comments, links, transitions, JQL search, dev status
//! - **Bitbucket Server/DC**: repositories, branches, commits, pull requests
//! - **Confluence**: content create/read/update/delete and history
//! - **Pagination**: `start`/`limit` listings walked to the end or to a cap
//! - **Authentication**: HTTP Basic or Personal Access Token (Bearer)
//!
//! ## Module Structure
//!
//! - [`api`]: Transport, shared types and the product clients
//! - [`auth`]: Credentials
//! - [`config`]: Optional TOML configuration file
//! - [`logging`]: Helpers for building a `tracing` subscriber
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use atlassian_api::api::{AtlassianClient, Bitbucket};
//! use atlassian_api::auth::AuthCredential;
//!
//! # async fn example() -> Result<(), atlassian_api::api::ApiError> {
//! let bitbucket = Bitbucket::new(
//!     AtlassianClient::new("https://bitbucket.company.com")?
//!         .with_auth(AuthCredential::basic("your_username", "your_password")),
//! );
//!
//! for repo in bitbucket.get_project_repo("PROJ", 0, Some(50)).await? {
//!     println!("{:?}", repo.str("slug"));
//! }
//! # Ok(())
//! # }
//! ```

/// API client implementations for the Atlassian products.
///
/// The clients handle authentication, request building, pagination, and
/// error handling.
pub mod api;

/// Authentication credentials.
pub mod auth;

/// Configuration file management.
///
/// The configuration is stored in platform-specific locations:
/// - Linux: `~/.config/atlassian-api/config.toml`
/// - macOS: `~/Library/Application Support/atlassian-api/config.toml`
/// - Windows: `%APPDATA%\atlassian-api\config\config.toml`
pub mod config;

/// `tracing` subscriber helpers.
pub mod logging;

pub use api::{ApiError, AtlassianClient, Bitbucket, Confluence, Jira, Record};
pub use auth::AuthCredential;
pub use config::{Config, HostConfig};

/// Crate version, sent in the `User-Agent` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
