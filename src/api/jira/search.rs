//
//  atlassian-api
//  api/jira/search.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Jira JQL Search
//!
//! `POST /rest/api/2/search` pages with `startAt`/`maxResults` and reports
//! the overall `total`, unlike the `isLastPage` cursor scheme used by
//! Bitbucket. The loop here therefore counts pages down from `total`
//! instead of going through [`Paginator`](crate::api::common::Paginator).

use serde_json::{json, Value};
use tracing::{debug, Instrument};

use super::{Jira, API_BASE};
use crate::api::common::{ApiError, Record};

/// Fields requested for every issue returned by a search.
pub const SEARCH_FIELDS: [&str; 4] = ["summary", "status", "issuetype", "fixVersions"];

/// Page size used when the caller has no preference.
pub const DEFAULT_MAX_RESULTS: i64 = 1000;

fn search_body(jql: &str, start_at: i64, max_results: i64) -> Value {
    json!({
        "jql": jql,
        "startAt": start_at,
        "maxResults": max_results,
        "fields": SEARCH_FIELDS,
    })
}

impl Jira {
    /// Returns every issue matching `jql`.
    ///
    /// The first response's `total` and `maxResults` decide how many further
    /// pages are requested. A response without `total` yields no issues.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use atlassian_api::api::Jira;
    /// # async fn example(jira: Jira) -> Result<(), atlassian_api::api::ApiError> {
    /// let issues = jira.search_issue_with_jql("project = TEST AND status = Open", 100).await?;
    /// for issue in issues {
    ///     println!("{:?}", issue.str("key"));
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_issue_with_jql(
        &self,
        jql: &str,
        max_result: i64,
    ) -> Result<Vec<Record>, ApiError> {
        let span = self.client.span().clone();
        self.search_pages(jql, max_result).instrument(span).await
    }

    async fn search_pages(&self, jql: &str, max_result: i64) -> Result<Vec<Record>, ApiError> {
        let path = format!("{}/search", API_BASE);
        let mut start_at = 0;

        let response = self
            .client
            .post(&path, &search_body(jql, start_at, max_result))
            .await?
            .unwrap_or_else(Record::empty);
        let Some(mut total) = response.i64("total") else {
            debug!("search returned no total for {}", jql);
            return Ok(Vec::new());
        };
        let max_results = response.i64("maxResults").unwrap_or(max_result);
        let mut issues = response.records("issues").unwrap_or_default();

        // A zero page size would never advance.
        while max_results > 0 && total > max_results {
            start_at += max_results;
            let response = self
                .client
                .post(&path, &search_body(jql, start_at, max_result))
                .await?
                .unwrap_or_else(Record::empty);
            total -= max_results;
            issues.extend(response.records("issues").unwrap_or_default());
        }

        debug!("search collected {} issues", issues.len());
        Ok(issues)
    }
}
