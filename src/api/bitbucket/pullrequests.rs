//
//  atlassian-api
//  api/bitbucket/pullrequests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server/DC Pull Request API
//!
//! ## API Endpoints
//!
//! ```text
//! GET /rest/api/latest/projects/{projectKey}/repos/{repoSlug}/pull-requests?state={state}
//! PUT /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/pull-requests/{id}
//! PUT /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/pull-requests/{id}/blocker-comments/{commentId}
//! ```
//!
//! ## Pull Request States
//!
//! - `OPEN` - Pull request is open for review
//! - `MERGED` - Pull request has been merged
//! - `DECLINED` - Pull request was declined
//! - `ALL` - Any of the above (listing filter only)

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use tracing::warn;

use super::{Bitbucket, API_BASE, API_V1_BASE};
use crate::api::common::{ApiError, PageQuery, Record};

/// Matches a Jira issue key such as `PROJ-123`.
static JIRA_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]+-[0-9]+").expect("valid Jira key pattern"));

/// Pull request state filter for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullRequestState {
    #[default]
    All,
    Open,
    Merged,
    Declined,
}

impl PullRequestState {
    /// Returns the value Bitbucket expects in the `state` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
            Self::Declined => "DECLINED",
        }
    }
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracts the first Jira issue key from a branch name.
pub fn jira_key_in(branch_name: &str) -> Option<&str> {
    JIRA_KEY_PATTERN.find(branch_name).map(|m| m.as_str())
}

impl Bitbucket {
    /// Lists the pull requests of a repository in the given state.
    pub async fn get_pull_request(
        &self,
        project_key: &str,
        repo_slug: &str,
        state: PullRequestState,
        start: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Record>, ApiError> {
        let path = format!(
            "{}/pull-requests",
            Self::repo_path(API_BASE, project_key, repo_slug)
        );
        let query = PageQuery::window(start, limit).param("state", state.as_str());
        self.client.fetch_all(&path, query).await
    }

    /// Finds pull request `pr_id` among all pull requests of the repository.
    async fn find_pull_request(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
    ) -> Result<Option<Record>, ApiError> {
        let prs = self
            .get_pull_request(project_key, repo_slug, PullRequestState::All, 0, None)
            .await?;
        Ok(prs.into_iter().find(|pr| pr.i64("id") == Some(pr_id)))
    }

    /// Returns the source branch (`fromRef.displayId`) of pull request `pr_id`.
    ///
    /// `None` if no pull request has that id.
    pub async fn get_pull_request_source_branch_name(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
    ) -> Result<Option<String>, ApiError> {
        let pr = self.find_pull_request(project_key, repo_slug, pr_id).await?;
        Ok(pr.and_then(|pr| {
            pr.pointer("/fromRef/displayId")
                .and_then(Value::as_str)
                .map(str::to_string)
        }))
    }

    /// Returns the destination branch (`toRef.displayId`) of pull request `pr_id`.
    pub async fn get_pull_request_destination_branch_name(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
    ) -> Result<Option<String>, ApiError> {
        let pr = self.find_pull_request(project_key, repo_slug, pr_id).await?;
        Ok(pr.and_then(|pr| {
            pr.pointer("/toRef/displayId")
                .and_then(Value::as_str)
                .map(str::to_string)
        }))
    }

    /// Returns the Jira key embedded in the source branch name of pull request `pr_id`.
    pub async fn get_pull_request_relate_jira_key(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
    ) -> Result<Option<String>, ApiError> {
        let Some(branch) = self
            .get_pull_request_source_branch_name(project_key, repo_slug, pr_id)
            .await?
        else {
            return Ok(None);
        };

        let key = jira_key_in(&branch).map(str::to_string);
        if key.is_none() {
            self.client
                .span()
                .in_scope(|| warn!("No Jira key in branch name {}", branch));
        }
        Ok(key)
    }

    async fn update_pull_request(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
        body: &Value,
    ) -> Result<Option<Record>, ApiError> {
        let path = format!(
            "{}/pull-requests/{}",
            Self::repo_path(API_V1_BASE, project_key, repo_slug),
            pr_id
        );
        self.client.put(&path, body).await
    }

    /// Replaces the description of a pull request.
    pub async fn update_pull_request_description(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
        description: &str,
    ) -> Result<Option<Record>, ApiError> {
        self.update_pull_request(project_key, repo_slug, pr_id, &json!({ "description": description }))
            .await
    }

    /// Replaces the title of a pull request.
    pub async fn update_pull_request_title(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
        title: &str,
    ) -> Result<Option<Record>, ApiError> {
        self.update_pull_request(project_key, repo_slug, pr_id, &json!({ "title": title }))
            .await
    }

    /// Replaces the reviewer list of a pull request.
    pub async fn update_pull_request_reviewers(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
        reviewers: &[&str],
    ) -> Result<Option<Record>, ApiError> {
        self.update_pull_request(project_key, repo_slug, pr_id, &json!({ "reviewers": reviewers }))
            .await
    }

    /// Retargets a pull request onto `branch_name`.
    pub async fn update_pull_request_destination(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
        branch_name: &str,
    ) -> Result<Option<Record>, ApiError> {
        let body = json!({ "destination": { "branch": { "name": branch_name } } });
        self.update_pull_request(project_key, repo_slug, pr_id, &body)
            .await
    }

    async fn update_blocker_comment(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
        comment_id: i64,
        body: &Value,
    ) -> Result<Option<Record>, ApiError> {
        let path = format!(
            "{}/pull-requests/{}/blocker-comments/{}",
            Self::repo_path(API_V1_BASE, project_key, repo_slug),
            pr_id,
            comment_id
        );
        self.client.put(&path, body).await
    }

    /// Marks a blocker comment (task) as resolved.
    pub async fn resolve_blocker_comment(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
        comment_id: i64,
    ) -> Result<Option<Record>, ApiError> {
        self.update_blocker_comment(project_key, repo_slug, pr_id, comment_id, &json!({ "state": "RESOLVED" }))
            .await
    }

    /// Reopens a resolved blocker comment.
    pub async fn reopen_blocker_comment(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
        comment_id: i64,
    ) -> Result<Option<Record>, ApiError> {
        self.update_blocker_comment(project_key, repo_slug, pr_id, comment_id, &json!({ "state": "OPEN" }))
            .await
    }

    /// Downgrades a task to a normal comment.
    pub async fn convert_task_to_comment(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
        comment_id: i64,
    ) -> Result<Option<Record>, ApiError> {
        self.update_blocker_comment(project_key, repo_slug, pr_id, comment_id, &json!({ "severity": "NORMAL" }))
            .await
    }

    /// Upgrades a comment to a blocking task.
    pub async fn convert_comment_to_task(
        &self,
        project_key: &str,
        repo_slug: &str,
        pr_id: i64,
        comment_id: i64,
    ) -> Result<Option<Record>, ApiError> {
        self.update_blocker_comment(project_key, repo_slug, pr_id, comment_id, &json!({ "severity": "BLOCKER" }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_strings() {
        assert_eq!(PullRequestState::default().as_str(), "ALL");
        assert_eq!(PullRequestState::Open.to_string(), "OPEN");
        assert_eq!(PullRequestState::Merged.as_str(), "MERGED");
        assert_eq!(PullRequestState::Declined.as_str(), "DECLINED");
    }

    #[test]
    fn test_jira_key_in() {
        assert_eq!(jira_key_in("feature/ABC-123-login"), Some("ABC-123"));
        assert_eq!(jira_key_in("bugfix/XY-1_and_XY-2"), Some("XY-1"));
        assert_eq!(jira_key_in("main"), None);
        assert_eq!(jira_key_in("feature/abc-123"), None);
    }
}
