//
//  atlassian-api
//  tests/bitbucket.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use atlassian_api::api::bitbucket::PullRequestState;
use atlassian_api::api::{ApiError, AtlassianClient, Bitbucket};
use mockito::{Matcher, ServerGuard};
use serde_json::json;

const REPO_PATH: &str = "/rest/api/latest/projects/PROJ/repos/repo";

fn bitbucket(server: &ServerGuard) -> Bitbucket {
    Bitbucket::new(AtlassianClient::new(&server.url()).unwrap())
}

#[tokio::test]
async fn test_get_project_repo_keeps_overshooting_page() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/rest/api/latest/projects/PROJ/repos")
        .match_query(Matcher::Exact("limit=3".into()))
        .with_status(200)
        .with_body(
            json!({
                "values": [{"name": "a"}, {"name": "b"}],
                "isLastPage": false,
                "nextPageStart": 2
            })
            .to_string(),
        )
        .create_async()
        .await;
    let second = server
        .mock("GET", "/rest/api/latest/projects/PROJ/repos")
        .match_query(Matcher::Exact("start=2&limit=1".into()))
        .with_status(200)
        .with_body(
            json!({
                "values": [{"name": "c"}, {"name": "d"}],
                "isLastPage": false,
                "nextPageStart": 4
            })
            .to_string(),
        )
        .create_async()
        .await;

    let repos = bitbucket(&server)
        .get_project_repo("PROJ", 0, Some(3))
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;
    let names: Vec<_> = repos.iter().filter_map(|r| r.str("name")).collect();
    assert_eq!(names, vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn test_get_project_repo_with_start_offset() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/api/latest/projects/PROJ/repos")
        .match_query(Matcher::Exact("start=25".into()))
        .with_status(200)
        .with_body(r#"{"values": [{"name": "z"}], "isLastPage": true}"#)
        .create_async()
        .await;

    let repos = bitbucket(&server)
        .get_project_repo("PROJ", 25, None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(repos.len(), 1);
}

#[tokio::test]
async fn test_get_repo_info_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", REPO_PATH)
        .with_status(404)
        .with_body(r#"{"errors": [{"message": "Repository PROJ/repo does not exist."}]}"#)
        .create_async()
        .await;

    let err = bitbucket(&server)
        .get_repo_info("PROJ", "repo")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_branch_names_and_latest_commit() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "values": [
            {"displayId": "master", "latestCommit": "aaa111"},
            {"displayId": "feature/ABC-1", "latestCommit": "bbb222"}
        ],
        "isLastPage": true
    })
    .to_string();
    server
        .mock("GET", format!("{}/branches", REPO_PATH).as_str())
        .with_status(200)
        .with_body(body)
        .expect(3)
        .create_async()
        .await;

    let bitbucket = bitbucket(&server);

    assert_eq!(
        bitbucket.get_repo_branch_names("PROJ", "repo").await.unwrap(),
        vec!["master".to_string(), "feature/ABC-1".to_string()]
    );
    assert_eq!(
        bitbucket
            .get_branch_latest_commit("PROJ", "repo", "feature/ABC-1")
            .await
            .unwrap(),
        Some("bbb222".to_string())
    );
    assert_eq!(
        bitbucket
            .get_branch_latest_commit("PROJ", "repo", "gone")
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_get_merged_branch() {
    let mut server = mockito::Server::new_async().await;
    let metadata_key =
        "com.atlassian.bitbucket.server.bitbucket-ref-metadata:outgoing-pull-request-metadata";
    let mock = server
        .mock("GET", format!("{}/branches", REPO_PATH).as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("base".into(), "refs/heads/master".into()),
            Matcher::UrlEncoded("details".into(), "true".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "values": [
                    {"displayId": "feature/a", "metadata": {metadata_key: {"pullRequest": {"state": "MERGED"}}}},
                    {"displayId": "feature/b", "metadata": {metadata_key: {"pullRequest": {"state": "OPEN"}}}},
                    {"displayId": "feature/c"},
                    {"displayId": "feature/a", "metadata": {metadata_key: {"pullRequest": {"state": "MERGED"}}}}
                ],
                "isLastPage": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let merged = bitbucket(&server)
        .get_merged_branch("PROJ", "repo", 0, None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(merged, vec!["feature/a".to_string()]);
}

#[tokio::test]
async fn test_get_branch_committer_info() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", format!("{}/commits", REPO_PATH).as_str())
        .match_query(Matcher::UrlEncoded("until".into(), "develop".into()))
        .with_status(200)
        .with_body(
            json!({
                "values": [
                    {"id": "c1", "committer": {"name": "alice"}},
                    {"id": "c2", "committer": {"name": "bob"}}
                ],
                "isLastPage": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let committers = bitbucket(&server)
        .get_branch_committer_info("PROJ", "repo", "develop", 0, None)
        .await
        .unwrap();

    mock.assert_async().await;
    let names: Vec<_> = committers.iter().filter_map(|c| c.str("name")).collect();
    assert_eq!(names, vec!["alice", "bob"]);
}

#[tokio::test]
async fn test_create_and_delete_branch() {
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/rest/branch-utils/1.0/projects/PROJ/repos/repo/branches")
        .match_body(Matcher::Json(json!({"name": "feature/new", "startPoint": "master"})))
        .with_status(200)
        .with_body(r#"{"displayId": "feature/new"}"#)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/rest/branch-utils/latest/projects/PROJ/repos/repo/branches")
        .match_body(Matcher::Json(json!({"name": "feature/old", "endPoint": "abc123"})))
        .with_status(204)
        .create_async()
        .await;

    let bitbucket = bitbucket(&server);
    let created = bitbucket
        .create_branch("PROJ", "repo", "feature/new", "master")
        .await
        .unwrap();
    let deleted = bitbucket
        .delete_branch("PROJ", "repo", "feature/old", Some("abc123"))
        .await
        .unwrap();

    create.assert_async().await;
    delete.assert_async().await;
    assert_eq!(created.and_then(|r| r.str("displayId").map(String::from)), Some("feature/new".into()));
    assert!(deleted.is_none());
}

#[tokio::test]
async fn test_pull_request_lookups() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", format!("{}/pull-requests", REPO_PATH).as_str())
        .match_query(Matcher::UrlEncoded("state".into(), "ALL".into()))
        .with_status(200)
        .with_body(
            json!({
                "values": [
                    {"id": 7, "fromRef": {"displayId": "bugfix/misc"}, "toRef": {"displayId": "master"}},
                    {"id": 8, "fromRef": {"displayId": "feature/ABC-42-login"}, "toRef": {"displayId": "release/1.0"}}
                ],
                "isLastPage": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let bitbucket = bitbucket(&server);

    assert_eq!(
        bitbucket
            .get_pull_request_source_branch_name("PROJ", "repo", 8)
            .await
            .unwrap(),
        Some("feature/ABC-42-login".to_string())
    );
    assert_eq!(
        bitbucket
            .get_pull_request_destination_branch_name("PROJ", "repo", 8)
            .await
            .unwrap(),
        Some("release/1.0".to_string())
    );
    assert_eq!(
        bitbucket
            .get_pull_request_source_branch_name("PROJ", "repo", 99)
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        bitbucket
            .get_pull_request_relate_jira_key("PROJ", "repo", 8)
            .await
            .unwrap(),
        Some("ABC-42".to_string())
    );
    assert_eq!(
        bitbucket
            .get_pull_request_relate_jira_key("PROJ", "repo", 7)
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_get_pull_request_state_and_limit() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", format!("{}/pull-requests", REPO_PATH).as_str())
        .match_query(Matcher::Exact("state=OPEN&limit=5".into()))
        .with_status(200)
        .with_body(r#"{"values": [{"id": 1}], "isLastPage": true}"#)
        .create_async()
        .await;

    let prs = bitbucket(&server)
        .get_pull_request("PROJ", "repo", PullRequestState::Open, 0, Some(5))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(prs.len(), 1);
}

#[tokio::test]
async fn test_update_pull_request_fields() {
    let mut server = mockito::Server::new_async().await;
    let pr_path = "/rest/api/1.0/projects/PROJ/repos/repo/pull-requests/123";
    let title = server
        .mock("PUT", pr_path)
        .match_body(Matcher::Json(json!({"title": "New concise title"})))
        .with_status(200)
        .with_body(r#"{"id": 123}"#)
        .create_async()
        .await;
    let reviewers = server
        .mock("PUT", pr_path)
        .match_body(Matcher::Json(json!({"reviewers": ["alice", "bob"]})))
        .with_status(200)
        .with_body(r#"{"id": 123}"#)
        .create_async()
        .await;
    let destination = server
        .mock("PUT", pr_path)
        .match_body(Matcher::Json(json!({"destination": {"branch": {"name": "release/1.2.3"}}})))
        .with_status(200)
        .with_body(r#"{"id": 123}"#)
        .create_async()
        .await;

    let bitbucket = bitbucket(&server);
    bitbucket
        .update_pull_request_title("PROJ", "repo", 123, "New concise title")
        .await
        .unwrap();
    bitbucket
        .update_pull_request_reviewers("PROJ", "repo", 123, &["alice", "bob"])
        .await
        .unwrap();
    let updated = bitbucket
        .update_pull_request_destination("PROJ", "repo", 123, "release/1.2.3")
        .await
        .unwrap();

    title.assert_async().await;
    reviewers.assert_async().await;
    destination.assert_async().await;
    assert_eq!(updated.and_then(|r| r.i64("id")), Some(123));
}

#[tokio::test]
async fn test_blocker_comment_updates() {
    let mut server = mockito::Server::new_async().await;
    let path = "/rest/api/1.0/projects/PROJ/repos/repo/pull-requests/123/blocker-comments/456";
    let resolve = server
        .mock("PUT", path)
        .match_body(Matcher::Json(json!({"state": "RESOLVED"})))
        .with_status(200)
        .create_async()
        .await;
    let to_task = server
        .mock("PUT", path)
        .match_body(Matcher::Json(json!({"severity": "BLOCKER"})))
        .with_status(200)
        .create_async()
        .await;

    let bitbucket = bitbucket(&server);
    bitbucket
        .resolve_blocker_comment("PROJ", "repo", 123, 456)
        .await
        .unwrap();
    bitbucket
        .convert_comment_to_task("PROJ", "repo", 123, 456)
        .await
        .unwrap();

    resolve.assert_async().await;
    to_task.assert_async().await;
}
