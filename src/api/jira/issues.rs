//
//  atlassian-api
//  api/jira/issues.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Jira Issue Operations
//!
//! Reading, creating and editing issues, plus comments, links, watchers and
//! workflow transitions.
//!
//! ## API Endpoints
//!
//! ```text
//! GET/PUT        /rest/api/2/issue/{issueKey}
//! POST           /rest/api/2/issue
//! POST/DELETE    /rest/api/2/issue/{issueKey}/comment[/{id}]
//! PUT            /rest/api/2/issue/{issueKey}/assignee
//! POST           /rest/api/2/issue/{issueKey}/watchers
//! POST           /rest/api/2/issue/{issueKey}/transitions
//! POST/DELETE    /rest/api/2/issueLink[/{linkId}]
//! ```

use serde_json::{json, Map, Value};

use super::{Jira, API_BASE};
use crate::api::common::{ApiError, Record};

/// Custom field holding the task owner in [`NewTask`].
const OWNER_FIELD: &str = "customfield_11386";

/// Custom field holding the work category in [`NewSubTask`].
const CATEGORY_FIELD: &str = "customfield_13430";

/// Custom field holding the team in [`NewSubTask`].
const TEAM_FIELD: &str = "customfield_11360";

/// Priority id sent with new tasks and sub-tasks ("3 - Medium").
const DEFAULT_PRIORITY_ID: &str = "4";

/// Fields of a task created with [`Jira::create_task`].
///
/// `issue_type` defaults to `10`. Every other field is sent as JSON `null`
/// when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    /// Project key, e.g. `TEST`.
    pub project_key: Option<String>,
    /// Issue summary.
    pub summary: Option<String>,
    /// Assignee username.
    pub assignee: Option<String>,
    /// Owner username.
    pub owner: Option<String>,
    /// Labels to set.
    pub labels: Option<Vec<String>>,
    /// Components to set, as given.
    pub components: Option<Value>,
    /// Issue type id.
    pub issue_type: u64,
}

impl Default for NewTask {
    fn default() -> Self {
        Self {
            project_key: None,
            summary: None,
            assignee: None,
            owner: None,
            labels: None,
            components: None,
            issue_type: 10,
        }
    }
}

/// Fields of a sub-task created with [`Jira::create_sub_task`].
///
/// `issue_type` defaults to `20`. The team field is left out of the request
/// when `team` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubTask {
    /// Project key, e.g. `TEST`.
    pub project_key: Option<String>,
    /// Key of the parent issue.
    pub parent_issue_key: Option<String>,
    /// Issue summary.
    pub summary: Option<String>,
    /// Fix version name.
    pub fix_version: Option<String>,
    /// Assignee username.
    pub assignee: Option<String>,
    /// Issue description.
    pub description: Option<String>,
    /// Labels to set.
    pub labels: Option<Vec<String>>,
    /// Team name.
    pub team: Option<String>,
    /// Issue type id.
    pub issue_type: u64,
}

impl Default for NewSubTask {
    fn default() -> Self {
        Self {
            project_key: None,
            parent_issue_key: None,
            summary: None,
            fix_version: None,
            assignee: None,
            description: None,
            labels: None,
            team: None,
            issue_type: 20,
        }
    }
}

/// New value of a custom field, see [`Jira::update_custom_field`].
#[derive(Debug, Clone, PartialEq)]
pub enum CustomFieldValue {
    /// Sent as `{"fields": {field: value}}`, e.g. a free text field.
    Value(Value),
    /// Sent as `{"fields": {field: {key: value}}}`, e.g. `{"name": "jdoe"}` for a user picker.
    Keyed {
        /// Key inside the field object.
        key: String,
        /// Value stored under `key`.
        value: Value,
    },
}

/// Builds an `{"update": {field: ops}}` body, or `{}` when there is nothing to do.
fn update_body(field: &str, ops: Vec<Value>) -> Value {
    if ops.is_empty() {
        return Value::Object(Map::new());
    }
    json!({ "update": { field: ops } })
}

impl Jira {
    fn issue_path(issue_key: &str) -> String {
        format!("{}/issue/{}", API_BASE, issue_key)
    }

    /// Gets an issue with all its fields.
    pub async fn issue(&self, issue_key: &str) -> Result<Record, ApiError> {
        let path = Self::issue_path(issue_key);
        Ok(self.client.get(&path, &[]).await?.into_record_or_empty())
    }

    /// Gets an issue's changelog, with only the summary field.
    pub async fn issue_changelog(&self, issue_key: &str) -> Result<Record, ApiError> {
        let path = Self::issue_path(issue_key);
        let query = [
            ("expand".to_string(), "changelog".to_string()),
            ("fields".to_string(), "summary".to_string()),
        ];
        Ok(self.client.get(&path, &query).await?.into_record_or_empty())
    }

    /// Adds and removes labels in one edit.
    ///
    /// Removals are sent before additions. With nothing to add or remove an
    /// empty body is sent.
    pub async fn update_issue_label(
        &self,
        issue_key: &str,
        add_labels: &[&str],
        remove_labels: &[&str],
    ) -> Result<Option<Record>, ApiError> {
        let ops = remove_labels
            .iter()
            .map(|label| json!({ "remove": label }))
            .chain(add_labels.iter().map(|label| json!({ "add": label })))
            .collect();
        self.client
            .put(&Self::issue_path(issue_key), &update_body("labels", ops))
            .await
    }

    /// Adds and removes components in one edit.
    ///
    /// Additions are sent before removals.
    pub async fn update_issue_component(
        &self,
        issue_key: &str,
        add_components: &[&str],
        remove_components: &[&str],
    ) -> Result<Option<Record>, ApiError> {
        let ops = add_components
            .iter()
            .map(|name| json!({ "add": { "name": name } }))
            .chain(
                remove_components
                    .iter()
                    .map(|name| json!({ "remove": { "name": name } })),
            )
            .collect();
        self.client
            .put(&Self::issue_path(issue_key), &update_body("components", ops))
            .await
    }

    /// Replaces the issue description.
    pub async fn update_issue_description(
        &self,
        issue_key: &str,
        description: &str,
    ) -> Result<Option<Record>, ApiError> {
        let body = json!({ "fields": { "description": description } });
        self.client.put(&Self::issue_path(issue_key), &body).await
    }

    /// Adds and/or removes a named value on a multi-value field.
    ///
    /// The `update` entry for the field is sent even when both are `None`.
    pub async fn update_field(
        &self,
        issue_key: &str,
        field_name: &str,
        add: Option<&str>,
        remove: Option<&str>,
    ) -> Result<Option<Record>, ApiError> {
        let mut ops = Vec::new();
        if let Some(add) = add {
            ops.push(json!({ "add": { "name": add } }));
        }
        if let Some(remove) = remove {
            ops.push(json!({ "remove": { "name": remove } }));
        }
        let body = json!({ "update": { field_name: ops } });
        self.client.put(&Self::issue_path(issue_key), &body).await
    }

    /// Sets a custom field.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use atlassian_api::api::jira::CustomFieldValue;
    /// # use atlassian_api::api::{AtlassianClient, Jira};
    /// use serde_json::json;
    ///
    /// # async fn example(jira: Jira) -> Result<(), atlassian_api::api::ApiError> {
    /// jira.update_custom_field("TEST-1", "customfield_10985", CustomFieldValue::Value(json!("Fixed")))
    ///     .await?;
    /// jira.update_custom_field(
    ///     "TEST-1",
    ///     "customfield_11386",
    ///     CustomFieldValue::Keyed { key: "name".into(), value: json!("jdoe") },
    /// )
    /// .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update_custom_field(
        &self,
        issue_key: &str,
        field_id: &str,
        value: CustomFieldValue,
    ) -> Result<Option<Record>, ApiError> {
        let field_value = match value {
            CustomFieldValue::Value(value) => value,
            CustomFieldValue::Keyed { key, value } => json!({ key: value }),
        };
        let body = json!({ "fields": { field_id: field_value } });
        self.client.put(&Self::issue_path(issue_key), &body).await
    }

    /// Adds a comment to an issue.
    pub async fn add_issue_comment(&self, issue_key: &str, content: &str) -> Result<Record, ApiError> {
        let path = format!("{}/comment", Self::issue_path(issue_key));
        let body = json!({ "body": content });
        Ok(self
            .client
            .post(&path, &body)
            .await?
            .unwrap_or_else(Record::empty))
    }

    /// Deletes a comment from an issue.
    pub async fn delete_issue_comment(
        &self,
        issue_key: &str,
        comment_id: &str,
    ) -> Result<Option<Record>, ApiError> {
        let path = format!("{}/comment/{}", Self::issue_path(issue_key), comment_id);
        self.client.delete(&path, None).await
    }

    /// Links two issues, e.g. `link_issue_as("Blocks", "TEST-1", "TEST-2")`.
    pub async fn link_issue_as(
        &self,
        type_name: &str,
        inward_issue: &str,
        outward_issue: &str,
    ) -> Result<Option<Record>, ApiError> {
        let path = format!("{}/issueLink", API_BASE);
        let body = json!({
            "type": { "name": type_name },
            "inwardIssue": { "key": inward_issue },
            "outwardIssue": { "key": outward_issue },
        });
        self.client.post(&path, &body).await
    }

    /// Deletes an issue link.
    pub async fn delete_issue_link(&self, link_id: &str) -> Result<Record, ApiError> {
        let path = format!("{}/issueLink/{}", API_BASE, link_id);
        Ok(self
            .client
            .delete(&path, None)
            .await?
            .unwrap_or_else(Record::empty))
    }

    /// Creates an issue or sub-task from raw `fields` (and optional `update`) JSON.
    ///
    /// `fields` must carry at least `project`, `summary` and `issuetype`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use atlassian_api::api::Jira;
    /// use serde_json::json;
    ///
    /// # async fn example(jira: Jira) -> Result<(), atlassian_api::api::ApiError> {
    /// let fields = json!({
    ///     "summary": "Into The Night",
    ///     "project": {"key": "APA"},
    ///     "issuetype": {"name": "Story"}
    /// });
    /// let update = json!({
    ///     "issuelinks": [{"add": {"type": {"name": "Child-Issue"}, "inwardIssue": {"key": "ISSUE-KEY"}}}]
    /// });
    /// jira.create_issue(fields, Some(update)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_issue(
        &self,
        fields: Value,
        update: Option<Value>,
    ) -> Result<Option<Record>, ApiError> {
        let path = format!("{}/issue", API_BASE);
        let mut body = json!({ "fields": fields });
        if let Some(update) = update {
            body["update"] = update;
        }
        self.client.post(&path, &body).await
    }

    /// Creates a task with the fixed task field layout.
    pub async fn create_task(&self, task: &NewTask) -> Result<Option<Record>, ApiError> {
        let path = format!("{}/issue", API_BASE);
        let body = json!({
            "fields": {
                "project": { "key": task.project_key },
                "summary": task.summary,
                "issuetype": { "id": task.issue_type },
                "assignee": { "key": task.assignee, "name": task.assignee },
                OWNER_FIELD: { "key": task.owner, "name": task.owner },
                "priority": { "id": DEFAULT_PRIORITY_ID },
                "labels": task.labels,
                "components": task.components,
            }
        });
        self.client.post(&path, &body).await
    }

    /// Creates a sub-task with the fixed sub-task field layout.
    pub async fn create_sub_task(&self, sub_task: &NewSubTask) -> Result<Option<Record>, ApiError> {
        let path = format!("{}/issue", API_BASE);
        let mut body = json!({
            "fields": {
                "project": { "key": sub_task.project_key },
                "parent": { "key": sub_task.parent_issue_key },
                "summary": sub_task.summary,
                "issuetype": { "id": sub_task.issue_type },
                "assignee": { "key": sub_task.assignee, "name": sub_task.assignee },
                "priority": { "id": DEFAULT_PRIORITY_ID },
                "description": sub_task.description,
                "labels": sub_task.labels,
                CATEGORY_FIELD: { "value": "Testing / Debugging" },
                "fixVersions": [{ "name": sub_task.fix_version }],
            }
        });
        if let Some(team) = &sub_task.team {
            body["fields"][TEAM_FIELD] = json!({ "value": team });
        }
        self.client.post(&path, &body).await
    }

    /// Assigns an issue; `None` lets Jira pick the default assignee.
    pub async fn assign_issue(
        &self,
        issue_key: &str,
        assignee: Option<&str>,
    ) -> Result<Record, ApiError> {
        let path = format!("{}/assignee", Self::issue_path(issue_key));
        let body = match assignee {
            Some(name) => json!({ "name": name }),
            None => json!({ "name": -1 }),
        };
        Ok(self
            .client
            .put(&path, &body)
            .await?
            .unwrap_or_else(Record::empty))
    }

    /// Adds a user to the issue's watchers.
    pub async fn add_issue_watcher(
        &self,
        issue_key: &str,
        watcher: &str,
    ) -> Result<Option<Record>, ApiError> {
        let path = format!("{}/watchers", Self::issue_path(issue_key));
        self.client.post(&path, &json!(watcher)).await
    }

    /// Performs a workflow transition.
    ///
    /// Transition ids differ between projects; list them with
    /// [`get_transitions`](Jira::get_transitions).
    pub async fn issue_transition(
        &self,
        issue_key: &str,
        transition_id: &str,
    ) -> Result<Option<Record>, ApiError> {
        let path = format!("{}/transitions", Self::issue_path(issue_key));
        let body = json!({ "transition": { "id": transition_id } });
        self.client.post(&path, &body).await
    }
}
