//
//  atlassian-api
//  api/bitbucket/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server/Data Center API
//!
//! Wrappers for the Bitbucket Server REST API. Listing operations walk every
//! page through [`AtlassianClient::fetch_all`] and accept the usual
//! `start`/`limit` pair: `start` is the offset of the first record (0 for the
//! beginning) and `limit` caps the total number of records wanted.
//!
//! ## Module Organization
//!
//! - [`repositories`] - Repository listing and details
//! - [`branches`] - Branches, merged-branch detection and commits
//! - [`pullrequests`] - Pull request listing, lookups and edits
//!
//! ## API Differences from Cloud
//!
//! - Uses project keys and repository slugs in paths:
//!   `/rest/api/latest/projects/{projectKey}/repos/{repoSlug}`
//! - Pages with `start`/`limit` and `isLastPage`/`nextPageStart`
//! - Branch creation and deletion live in the separate `branch-utils` API
//!
//! ## Example
//!
//! ```rust,no_run
//! use atlassian_api::api::{AtlassianClient, Bitbucket};
//! use atlassian_api::api::bitbucket::PullRequestState;
//!
//! # async fn example() -> Result<(), atlassian_api::api::ApiError> {
//! let bitbucket = Bitbucket::new(AtlassianClient::new("https://bitbucket.company.com")?);
//! let open = bitbucket
//!     .get_pull_request("PROJ", "repo", PullRequestState::Open, 0, Some(25))
//!     .await?;
//! println!("{} open pull requests", open.len());
//! # Ok(())
//! # }
//! ```

pub mod branches;
pub mod pullrequests;
pub mod repositories;

pub use pullrequests::PullRequestState;

use super::client::AtlassianClient;
use super::common::ApiError;
use crate::config::HostConfig;

/// Base path of the core REST API, latest version.
pub const API_BASE: &str = "/rest/api/latest";

/// Base path of the core REST API, pinned to 1.0.
pub const API_V1_BASE: &str = "/rest/api/1.0";

/// Client for a Bitbucket Server/Data Center instance.
#[derive(Debug, Clone)]
pub struct Bitbucket {
    client: AtlassianClient,
}

impl Bitbucket {
    /// Wraps an already configured transport.
    pub fn new(client: AtlassianClient) -> Self {
        Self { client }
    }

    /// Builds the client from a configuration section.
    pub fn from_host_config(config: &HostConfig) -> Result<Self, ApiError> {
        Ok(Self::new(AtlassianClient::from_host_config(config)?))
    }

    /// Returns the underlying transport.
    pub fn client(&self) -> &AtlassianClient {
        &self.client
    }

    fn repo_path(base: &str, project_key: &str, repo_slug: &str) -> String {
        format!("{}/projects/{}/repos/{}", base, project_key, repo_slug)
    }
}
