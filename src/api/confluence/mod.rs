//
//  atlassian-api
//  api/confluence/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Confluence Content API
//!
//! ```text
//! GET    /rest/api/content
//! POST   /rest/api/content
//! GET    /rest/api/content/{id}
//! PUT    /rest/api/content/{id}
//! DELETE /rest/api/content/{id}
//! GET    /rest/api/content/{id}/history
//! ```
//!
//! Page bodies are sent in the `storage` representation. Every operation
//! returns an empty record when the server answers without a JSON body.

use serde_json::{json, Value};

use super::client::AtlassianClient;
use super::common::{ApiError, Record};
use crate::config::HostConfig;

/// Base path of the content API.
pub const CONTENT_PATH: &str = "/rest/api/content";

/// Content type used unless another one is requested.
pub const DEFAULT_CONTENT_TYPE: &str = "page";

/// Version number sent by [`Confluence::update_content`].
pub const DEFAULT_UPDATE_VERSION: u64 = 2;

/// A page (or other content) to create.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContent {
    /// Page title.
    pub title: String,
    /// Key of the space the page lives in.
    pub space_key: String,
    /// Body in storage representation
    pub body: String,
    /// Parent page id
    pub ancestor_id: Option<String>,
    /// Content type, `page` unless overridden.
    pub content_type: String,
}

impl NewContent {
    /// A page titled `title` in space `space_key`.
    pub fn new(
        title: impl Into<String>,
        space_key: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            space_key: space_key.into(),
            body: body.into(),
            ancestor_id: None,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    /// Places the content under page `ancestor_id`.
    pub fn with_ancestor(mut self, ancestor_id: impl Into<String>) -> Self {
        self.ancestor_id = Some(ancestor_id.into());
        self
    }

    /// Overrides the content type (`page`, `blogpost`, ...).
    pub fn with_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    fn to_body(&self) -> Value {
        let mut body = json!({
            "type": self.content_type,
            "title": self.title,
            "space": { "key": self.space_key },
            "body": storage(&self.body),
        });
        if let Some(ancestor) = &self.ancestor_id {
            body["ancestors"] = json!([{ "id": ancestor }]);
        }
        body
    }
}

fn storage(value: &str) -> Value {
    json!({ "storage": { "value": value, "representation": "storage" } })
}

/// Client for a Confluence Server/Data Center instance.
#[derive(Debug, Clone)]
pub struct Confluence {
    client: AtlassianClient,
}

impl Confluence {
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

    /// Lists content visible to the caller (first server page only).
    pub async fn get_content(&self) -> Result<Record, ApiError> {
        Ok(self.client.get(CONTENT_PATH, &[]).await?.into_record_or_empty())
    }

    /// Creates a page.
    pub async fn create_content(&self, content: &NewContent) -> Result<Record, ApiError> {
        Ok(self
            .client
            .post(CONTENT_PATH, &content.to_body())
            .await?
            .unwrap_or_else(Record::empty))
    }

    /// Replaces the title and body of a page, sending version number 2.
    pub async fn update_content(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        content_type: &str,
    ) -> Result<Record, ApiError> {
        self.update_content_version(page_id, title, body, content_type, DEFAULT_UPDATE_VERSION)
            .await
    }

    /// Replaces the title and body of a page with an explicit version number.
    ///
    /// Confluence rejects the update unless `version` is one above the
    /// page's current version.
    pub async fn update_content_version(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        content_type: &str,
        version: u64,
    ) -> Result<Record, ApiError> {
        let path = format!("{}/{}", CONTENT_PATH, page_id);
        let body = json!({
            "version": { "number": version },
            "title": title,
            "type": content_type,
            "body": storage(body),
        });
        Ok(self
            .client
            .put(&path, &body)
            .await?
            .unwrap_or_else(Record::empty))
    }

    /// Deletes a page.
    pub async fn delete_content(&self, page_id: &str) -> Result<Record, ApiError> {
        let path = format!("{}/{}", CONTENT_PATH, page_id);
        Ok(self
            .client
            .delete(&path, None)
            .await?
            .unwrap_or_else(Record::empty))
    }

    /// Gets a single page by id.
    pub async fn get_content_by_id(&self, page_id: &str) -> Result<Record, ApiError> {
        let path = format!("{}/{}", CONTENT_PATH, page_id);
        Ok(self.client.get(&path, &[]).await?.into_record_or_empty())
    }

    /// Gets the history (creator, versions) of a page.
    pub async fn get_content_history(&self, page_id: &str) -> Result<Record, ApiError> {
        let path = format!("{}/{}/history", CONTENT_PATH, page_id);
        Ok(self.client.get(&path, &[]).await?.into_record_or_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_content_body() {
        let body = NewContent::new("Release notes", "DOC", "<p>hi</p>").to_body();
        assert_eq!(body["type"], "page");
        assert_eq!(body["space"]["key"], "DOC");
        assert_eq!(body["body"]["storage"]["representation"], "storage");
        assert!(body.get("ancestors").is_none());
    }

    #[test]
    fn test_new_content_with_ancestor() {
        let body = NewContent::new("Child", "DOC", "")
            .with_ancestor("42")
            .with_type("blogpost")
            .to_body();
        assert_eq!(body["ancestors"], json!([{"id": "42"}]));
        assert_eq!(body["type"], "blogpost");
    }
}
