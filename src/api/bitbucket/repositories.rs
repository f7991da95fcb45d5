//
//  atlassian-api
//  api/bitbucket/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server/DC Repository API
//!
//! ```text
//! GET /rest/api/latest/projects/{projectKey}/repos
//! GET /rest/api/latest/projects/{projectKey}/repos/{repoSlug}
//! ```

use super::{Bitbucket, API_BASE};
use crate::api::common::{ApiError, PageQuery, Record};

impl Bitbucket {
    /// Lists the repositories of a project.
    ///
    /// # Parameters
    ///
    /// * `project_key` - Project key, e.g. `PROJ`
    /// * `start` - Offset of the first repository (0 for the beginning)
    /// * `limit` - Cap on the number of repositories; `None` for all
    pub async fn get_project_repo(
        &self,
        project_key: &str,
        start: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Record>, ApiError> {
        let path = format!("{}/projects/{}/repos", API_BASE, project_key);
        self.client
            .fetch_all(&path, PageQuery::window(start, limit))
            .await
    }

    /// Lists the names of all repositories of a project.
    pub async fn get_project_repo_name(&self, project_key: &str) -> Result<Vec<String>, ApiError> {
        let repos = self.get_project_repo(project_key, 0, None).await?;
        Ok(repos
            .iter()
            .filter_map(|repo| repo.str("name").map(str::to_string))
            .collect())
    }

    /// Gets a single repository; `None` when the server sends no JSON body.
    pub async fn get_repo_info(
        &self,
        project_key: &str,
        repo_slug: &str,
    ) -> Result<Option<Record>, ApiError> {
        let path = Self::repo_path(API_BASE, project_key, repo_slug);
        Ok(self.client.get(&path, &[]).await?.into_record())
    }
}
