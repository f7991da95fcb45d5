//
//  atlassian-api
//  api/bitbucket/branches.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server/DC Branch and Commit API
//!
//! ```text
//! GET    /rest/api/latest/projects/{projectKey}/repos/{repoSlug}/branches
//! GET    /rest/api/latest/projects/{projectKey}/repos/{repoSlug}/commits?until={branch}
//! POST   /rest/branch-utils/1.0/projects/{projectKey}/repos/{repoSlug}/branches
//! DELETE /rest/branch-utils/latest/projects/{projectKey}/repos/{repoSlug}/branches
//! ```

use serde_json::{json, Value};

use super::{Bitbucket, API_BASE};
use crate::api::common::{ApiError, PageQuery, Record};

/// Branch the merged-branch check compares against.
pub const MERGE_BASE: &str = "refs/heads/master";

/// Metadata key prefix under which Bitbucket reports a branch's pull requests.
const OUTGOING_PR_METADATA: &str = "outgoing-pull-request-metadata";

/// Returns `true` if a branch's metadata reports a merged outgoing pull request.
fn has_merged_pull_request(branch: &Record) -> bool {
    let Some(metadata) = branch.get("metadata").and_then(Value::as_object) else {
        return false;
    };
    metadata.iter().any(|(key, value)| {
        key.contains(OUTGOING_PR_METADATA)
            && value
                .pointer("/pullRequest/state")
                .and_then(Value::as_str)
                == Some("MERGED")
    })
}

impl Bitbucket {
    /// Lists the branches of a repository.
    pub async fn get_repo_branch(
        &self,
        project_key: &str,
        repo_slug: &str,
        start: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Record>, ApiError> {
        let path = format!("{}/branches", Self::repo_path(API_BASE, project_key, repo_slug));
        self.client
            .fetch_all(&path, PageQuery::window(start, limit))
            .await
    }

    /// Lists the display names of all branches of a repository.
    pub async fn get_repo_branch_names(
        &self,
        project_key: &str,
        repo_slug: &str,
    ) -> Result<Vec<String>, ApiError> {
        let branches = self.get_repo_branch(project_key, repo_slug, 0, None).await?;
        Ok(branches
            .iter()
            .filter_map(|branch| branch.str("displayId").map(str::to_string))
            .collect())
    }

    /// Returns the latest commit hash of the branch named `branch_name`.
    pub async fn get_branch_latest_commit(
        &self,
        project_key: &str,
        repo_slug: &str,
        branch_name: &str,
    ) -> Result<Option<String>, ApiError> {
        let branches = self.get_repo_branch(project_key, repo_slug, 0, None).await?;
        Ok(branches
            .iter()
            .find(|branch| branch.str("displayId") == Some(branch_name))
            .and_then(|branch| branch.str("latestCommit").map(str::to_string)))
    }

    /// Creates a branch from `start_point` (a branch name or commit hash).
    pub async fn create_branch(
        &self,
        project_key: &str,
        repo_slug: &str,
        branch_name: &str,
        start_point: &str,
    ) -> Result<Option<Record>, ApiError> {
        let path = format!(
            "/rest/branch-utils/1.0/projects/{}/repos/{}/branches",
            project_key, repo_slug
        );
        let body = json!({ "name": branch_name, "startPoint": start_point });
        self.client.post(&path, &body).await
    }

    /// Deletes a branch, optionally guarded by its expected head `end_point`.
    pub async fn delete_branch(
        &self,
        project_key: &str,
        repo_slug: &str,
        branch_name: &str,
        end_point: Option<&str>,
    ) -> Result<Option<Record>, ApiError> {
        let path = format!(
            "/rest/branch-utils/latest/projects/{}/repos/{}/branches",
            project_key, repo_slug
        );
        let body = json!({ "name": branch_name, "endPoint": end_point });
        self.client.delete(&path, Some(&body)).await
    }

    /// Lists branches whose outgoing pull request into master has been merged.
    ///
    /// Branch details are requested against [`MERGE_BASE`]; each branch name
    /// appears once, in server order.
    pub async fn get_merged_branch(
        &self,
        project_key: &str,
        repo_slug: &str,
        start: u64,
        limit: Option<u64>,
    ) -> Result<Vec<String>, ApiError> {
        let path = format!("{}/branches", Self::repo_path(API_BASE, project_key, repo_slug));
        let query = PageQuery::window(start, limit)
            .param("base", MERGE_BASE)
            .param("details", "true");
        let branches = self.client.fetch_all(&path, query).await?;

        let mut merged: Vec<String> = Vec::new();
        for branch in branches.iter().filter(|b| has_merged_pull_request(b)) {
            if let Some(name) = branch.str("displayId") {
                if !merged.iter().any(|m| m == name) {
                    merged.push(name.to_string());
                }
            }
        }
        Ok(merged)
    }

    /// Lists the commits reachable from `branch_name`.
    pub async fn get_branch_commits(
        &self,
        project_key: &str,
        repo_slug: &str,
        branch_name: &str,
        start: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Record>, ApiError> {
        let path = format!("{}/commits", Self::repo_path(API_BASE, project_key, repo_slug));
        let query = PageQuery::window(start, limit).param("until", branch_name);
        self.client.fetch_all(&path, query).await
    }

    /// Lists the committer of each commit on `branch_name`.
    pub async fn get_branch_committer_info(
        &self,
        project_key: &str,
        repo_slug: &str,
        branch_name: &str,
        start: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Record>, ApiError> {
        let commits = self
            .get_branch_commits(project_key, repo_slug, branch_name, start, limit)
            .await?;
        Ok(commits
            .iter()
            .filter_map(|commit| commit.record("committer"))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_merged_pull_request() {
        let merged = Record::from(json!({
            "displayId": "feature/a",
            "metadata": {
                "com.atlassian.bitbucket.server.bitbucket-ref-metadata:outgoing-pull-request-metadata": {
                    "pullRequest": {"id": 3, "state": "MERGED"}
                }
            }
        }));
        let open = Record::from(json!({
            "displayId": "feature/b",
            "metadata": {
                "com.atlassian.bitbucket.server.bitbucket-ref-metadata:outgoing-pull-request-metadata": {
                    "pullRequest": {"id": 4, "state": "OPEN"}
                }
            }
        }));
        let bare = Record::from(json!({"displayId": "feature/c"}));
        let odd = Record::from(json!({"displayId": "feature/d", "metadata": "none"}));

        assert!(has_merged_pull_request(&merged));
        assert!(!has_merged_pull_request(&open));
        assert!(!has_merged_pull_request(&bare));
        assert!(!has_merged_pull_request(&odd));
    }
}
