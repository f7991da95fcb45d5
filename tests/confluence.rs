//
//  atlassian-api
//  tests/confluence.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use atlassian_api::api::confluence::NewContent;
use atlassian_api::api::{AtlassianClient, Confluence};
use mockito::{Matcher, ServerGuard};
use serde_json::json;

fn confluence(server: &ServerGuard) -> Confluence {
    Confluence::new(AtlassianClient::new(&server.url()).unwrap())
}

#[tokio::test]
async fn test_create_content_under_ancestor() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/api/content")
        .match_body(Matcher::Json(json!({
            "type": "page",
            "title": "Release 1.2",
            "ancestors": [{"id": "100"}],
            "space": {"key": "DOC"},
            "body": {"storage": {"value": "<p>notes</p>", "representation": "storage"}}
        })))
        .with_status(200)
        .with_body(r#"{"id": "101", "title": "Release 1.2"}"#)
        .create_async()
        .await;

    let content = NewContent::new("Release 1.2", "DOC", "<p>notes</p>").with_ancestor("100");
    let created = confluence(&server).create_content(&content).await.unwrap();

    mock.assert_async().await;
    assert_eq!(created.str("id"), Some("101"));
}

#[tokio::test]
async fn test_update_content_sends_version_two() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/rest/api/content/101")
        .match_body(Matcher::Json(json!({
            "version": {"number": 2},
            "title": "Release 1.2",
            "type": "page",
            "body": {"storage": {"value": "<p>v2</p>", "representation": "storage"}}
        })))
        .with_status(200)
        .with_body(r#"{"id": "101", "version": {"number": 2}}"#)
        .create_async()
        .await;

    let updated = confluence(&server)
        .update_content("101", "Release 1.2", "<p>v2</p>", "page")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(updated.pointer("/version/number"), Some(&json!(2)));
}

#[tokio::test]
async fn test_delete_content_without_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/rest/api/content/101")
        .with_status(204)
        .create_async()
        .await;

    let deleted = confluence(&server).delete_content("101").await.unwrap();

    mock.assert_async().await;
    assert!(deleted.is_empty_object());
}

#[tokio::test]
async fn test_content_reads() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/api/content/101")
        .with_status(200)
        .with_body(r#"{"id": "101", "type": "page"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/rest/api/content/101/history")
        .with_status(200)
        .with_body(r#"{"latest": true}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/rest/api/content")
        .with_status(200)
        .with_body(r#"{"results": [{"id": "101"}], "size": 1}"#)
        .create_async()
        .await;

    let confluence = confluence(&server);

    assert_eq!(
        confluence.get_content_by_id("101").await.unwrap().str("type"),
        Some("page")
    );
    assert_eq!(
        confluence.get_content_history("101").await.unwrap().bool("latest"),
        Some(true)
    );
    assert_eq!(
        confluence.get_content().await.unwrap().i64("size"),
        Some(1)
    );
}
