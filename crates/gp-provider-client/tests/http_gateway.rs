// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! HttpGateway against a local HTTP server

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use gp_logging::LogCapture;
use gp_provider_client::{
    ApiGateway, FetchOptions, FixedClock, HttpGateway, ProviderClient, ProviderError, TokenAuth,
};
use httpmock::Method::GET;
use httpmock::MockServer;
use serde_json::json;

const ORG_PATH: &str = "/oapi/v1/codeup/organizations/org-1";
const TOKEN: &str = "pt-s3cr3t-token";

fn gateway_for(server: &MockServer) -> HttpGateway {
    HttpGateway::from_url(&server.url(ORG_PATH), TokenAuth::new(TOKEN), Duration::from_secs(5)).unwrap()
}

fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[gp_test_utils::logged_tokio_test]
async fn sends_token_header_and_keeps_base_path() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("{}/repositories", ORG_PATH))
                .header("x-yunxiao-token", TOKEN)
                .query_param("orderBy", "last_activity_at")
                .query_param("page", "1");
            then.status(200).json_body(json!([]));
        })
        .await;

    let value = gateway_for(&server)
        .get(
            "/repositories",
            &query(&[("orderBy", "last_activity_at"), ("page", "1")]),
        )
        .await
        .unwrap();

    assert_eq!(value, json!([]));
    mock.assert_async().await;
}

#[gp_test_utils::logged_tokio_test]
async fn status_codes_map_to_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/repositories/404", ORG_PATH));
            then.status(404).body(r#"{"errorMessage":"not found"}"#);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/repositories/500", ORG_PATH));
            then.status(500).body("boom");
        })
        .await;

    let gateway = gateway_for(&server);
    let err = gateway.get("/repositories/404", &[]).await.unwrap_err();
    assert!(err.is_not_found());

    match gateway.get("/repositories/500", &[]).await.unwrap_err() {
        ProviderError::Api { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[gp_test_utils::logged_tokio_test]
async fn empty_body_is_null_and_garbage_is_json_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/empty", ORG_PATH));
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/garbage", ORG_PATH));
            then.status(200).body("<html>");
        })
        .await;

    let gateway = gateway_for(&server);
    assert_eq!(gateway.get("/empty", &[]).await.unwrap(), serde_json::Value::Null);
    assert!(matches!(
        gateway.get("/garbage", &[]).await,
        Err(ProviderError::Json(_))
    ));
}

#[gp_test_utils::logged_tokio_test]
async fn end_to_end_commit_listing_stops_at_window() {
    let server = MockServer::start_async().await;
    let commits: Vec<_> = (0..20)
        .map(|i| {
            gp_provider_mock::fixtures::commit(
                &format!("c{:02}", i),
                &format!("2024-03-{:02}T10:00:00+08:00", 20 - i),
            )
        })
        .collect();
    let page1 = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("{}/repositories/7/commits", ORG_PATH))
                .query_param("refName", "main")
                .query_param("since", "2024-03-13T12:00:00Z")
                .query_param("page", "1")
                .query_param("perPage", "20");
            then.status(200).json_body(json!(commits));
        })
        .await;
    let page2 = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("{}/repositories/7/commits", ORG_PATH))
                .query_param("page", "2");
            then.status(200).json_body(json!([]));
        })
        .await;

    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap());
    let client = ProviderClient::new(Arc::new(gateway_for(&server)), FetchOptions::default())
        .with_clock(Arc::new(clock));
    let found = client.list_commits("7", Some("main"), Some(7)).await.unwrap();

    // 2024-03-13T10:00+08:00 is 02:00Z, before the cutoff
    assert_eq!(found.len(), 7);
    assert_eq!(found[0].branch_name.as_deref(), Some("main"));
    page1.assert_async().await;
    assert_eq!(page2.hits_async().await, 0);
}

#[gp_test_utils::logged_tokio_test]
async fn token_never_reaches_the_logs() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/repositories", ORG_PATH));
            then.status(401).body(r#"{"errorMessage":"unauthorized"}"#);
        })
        .await;

    let capture = LogCapture::new();
    let _default = tracing::subscriber::set_default(capture.subscriber(tracing::Level::TRACE));

    let client = ProviderClient::new(Arc::new(gateway_for(&server)), FetchOptions::default());
    let err = client.list_active_repositories(7).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    tracing::error!(error = %err, auth = ?TokenAuth::new(TOKEN), "listing failed");

    let logs = capture.contents();
    assert!(logs.contains("provider request"), "expected request events in:\n{logs}");
    assert!(!logs.contains(TOKEN));
    assert!(!err.to_string().contains(TOKEN));
}
