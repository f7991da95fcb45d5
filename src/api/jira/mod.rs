//
//  atlassian-api
//  api/jira/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Jira REST API v2
//!
//! Thin wrappers over the Jira Server REST API. Each method builds one path
//! and body, performs one request and returns the decoded JSON.
//!
//! Reference: <https://docs.atlassian.com/software/jira/docs/api/REST/7.6.1/>
//!
//! ## Module Organization
//!
//! - [`issues`] - Issue reads and edits (fields, labels, comments, links)
//! - [`search`] - JQL search across result pages
//!
//! ## Example
//!
//! ```rust,no_run
//! use atlassian_api::api::{AtlassianClient, Jira};
//!
//! # async fn example() -> Result<(), atlassian_api::api::ApiError> {
//! let jira = Jira::new(AtlassianClient::new("https://jira.company.com")?);
//! let transitions = jira.get_transitions("TEST-1").await?;
//! for transition in transitions.records("transitions").unwrap_or_default() {
//!     println!("{:?} {:?}", transition.str("id"), transition.str("name"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod issues;
pub mod search;

pub use issues::{CustomFieldValue, NewSubTask, NewTask};

use super::client::AtlassianClient;
use super::common::{ApiError, Record};
use crate::config::HostConfig;

/// Base path of the Jira REST API.
pub const API_BASE: &str = "/rest/api/2";

/// Application type used by [`Jira::get_dev_status`].
pub const DEFAULT_DEV_STATUS_APPLICATION: &str = "stash";

/// Data type used by [`Jira::get_dev_status`].
pub const DEFAULT_DEV_STATUS_DATA_TYPE: &str = "repository";

/// Client for a Jira instance.
#[derive(Debug, Clone)]
pub struct Jira {
    client: AtlassianClient,
}

impl Jira {
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

    /// Lists the transitions available on an issue for the current user.
    pub async fn get_transitions(&self, issue_key: &str) -> Result<Record, ApiError> {
        let path = format!("{}/issue/{}/transitions", API_BASE, issue_key);
        Ok(self.client.get(&path, &[]).await?.into_record_or_empty())
    }

    /// Gets the components of a project.
    pub async fn get_project_components(&self, project_id: &str) -> Result<Record, ApiError> {
        let path = format!("{}/project/{}/components", API_BASE, project_id);
        Ok(self.client.get(&path, &[]).await?.into_record_or_empty())
    }

    /// Gets a user by username.
    pub async fn user(&self, username: &str) -> Result<Record, ApiError> {
        let path = format!("{}/user", API_BASE);
        let query = [("username".to_string(), username.to_string())];
        Ok(self.client.get(&path, &query).await?.into_record_or_empty())
    }

    /// Gets the development status (linked repositories) of an issue.
    ///
    /// Uses the `stash` application type and the `repository` data type.
    pub async fn get_dev_status(&self, issue_id: &str) -> Result<Record, ApiError> {
        self.get_dev_status_for(
            issue_id,
            DEFAULT_DEV_STATUS_APPLICATION,
            DEFAULT_DEV_STATUS_DATA_TYPE,
        )
        .await
    }

    /// Gets development status information of a given application and data type.
    ///
    /// # Parameters
    ///
    /// * `issue_id` - Numeric issue id (not the key)
    /// * `app_type` - e.g. `stash`, `github`
    /// * `data_type` - e.g. `repository`, `pullrequest`, `branch`
    pub async fn get_dev_status_for(
        &self,
        issue_id: &str,
        app_type: &str,
        data_type: &str,
    ) -> Result<Record, ApiError> {
        let query = [
            ("issueId".to_string(), issue_id.to_string()),
            ("applicationType".to_string(), app_type.to_string()),
            ("dataType".to_string(), data_type.to_string()),
        ];
        Ok(self
            .client
            .get("/rest/dev-status/1.0/issue/detail", &query)
            .await?
            .into_record_or_empty())
    }
}
