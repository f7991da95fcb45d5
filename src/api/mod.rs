//
//  atlassian-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! HTTP clients for the Atlassian REST APIs.
//!
//! ## Supported Products
//!
//! - **Jira**: REST API v2 (`/rest/api/2`)
//! - **Bitbucket Server/Data Center**: REST API 1.0 (`/rest/api/latest`, `/rest/api/1.0`)
//! - **Confluence**: content API (`/rest/api/content`)
//!
//! ## Architecture
//!
//! - [`client`]: Transport with authentication, timeout and body decoding
//! - [`common`]: Shared types (errors, records, pagination)
//! - [`jira`], [`bitbucket`], [`confluence`]: One method per REST operation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atlassian_api::api::{AtlassianClient, Bitbucket, Jira};
//! use atlassian_api::auth::AuthCredential;
//!
//! # async fn example() -> Result<(), atlassian_api::api::ApiError> {
//! let jira = Jira::new(
//!     AtlassianClient::new("https://jira.company.com")?
//!         .with_auth(AuthCredential::basic("your_username", "your_password")),
//! );
//! let issue = jira.issue("TEST-1").await?;
//!
//! let bitbucket = Bitbucket::new(
//!     AtlassianClient::new("https://bitbucket.company.com")?
//!         .with_auth(AuthCredential::bearer("your_token")),
//! );
//! let branches = bitbucket.get_repo_branch_names("PROJ", "repo").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`] on failure; non-2xx statuses map to
//! the matching variant (`AuthFailed`, `Forbidden`, `NotFound`, ...).

/// Core HTTP transport shared by the product clients.
pub mod client;

/// Common types shared by all products.
pub mod common;

/// Jira REST API v2 operations.
pub mod jira;

/// Bitbucket Server/Data Center operations.
pub mod bitbucket;

/// Confluence content operations.
pub mod confluence;

pub use bitbucket::Bitbucket;
pub use client::AtlassianClient;
pub use common::{ApiError, Payload, Record};
pub use confluence::Confluence;
pub use jira::Jira;
