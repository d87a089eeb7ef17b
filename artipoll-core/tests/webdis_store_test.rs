//! Tests for the webdis hash store against a mock gateway.

use std::time::Duration;

use artipoll_core::{
    CacheConfig, HashStore, PollStateStore, RepositoryType, SearchEndpointConfig,
    WebdisHashStore,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POLL_KEY_PATH: &str = "/HGET/igor:artifactory:publish:queue:libs:io.example/lastPollCycleTimestamp";

fn search() -> SearchEndpointConfig {
    SearchEndpointConfig::new(
        "libs",
        "https://repo.example.com",
        "libs-release",
        RepositoryType::Maven,
    )
    .with_group_id("io.example")
}

fn state(server: &MockServer) -> PollStateStore {
    let config = CacheConfig::new("igor").with_store_url(server.uri());
    PollStateStore::from_config(&config).expect("store")
}

#[tokio::test]
async fn test_hget_reads_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(POLL_KEY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "HGET": "1700000000000" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ts = state(&server)
        .get_last_poll_cycle_timestamp(&search())
        .await
        .unwrap();
    assert_eq!(ts, Some(1_700_000_000_000));
}

#[tokio::test]
async fn test_hget_null_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(POLL_KEY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "HGET": null })))
        .mount(&server)
        .await;

    let ts = state(&server)
        .get_last_poll_cycle_timestamp(&search())
        .await
        .unwrap();
    assert_eq!(ts, None);
}

#[tokio::test]
async fn test_hset_sends_command() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/HSET/igor:artifactory:publish:queue:libs:io.example/lastPollCycleTimestamp/42",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "HSET": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    state(&server)
        .set_last_poll_cycle_timestamp(&search(), 42)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_gateway_error_is_cache_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("redis is loading"))
        .expect(1)
        .mount(&server)
        .await;

    let err = state(&server)
        .get_last_poll_cycle_timestamp(&search())
        .await
        .unwrap_err();
    assert!(err.is_cache_unavailable());
}

#[tokio::test]
async fn test_malformed_reply_is_cache_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let store = WebdisHashStore::new(&server.uri(), Duration::from_secs(2)).unwrap();
    let err = store.hget("k", "f").await.unwrap_err();
    assert!(err.is_cache_unavailable());
}

#[tokio::test]
async fn test_timeout_is_cache_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "HGET": "1" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let store = WebdisHashStore::new(&server.uri(), Duration::from_millis(200)).unwrap();
    let err = store.hget("k", "f").await.unwrap_err();
    assert!(err.is_cache_unavailable());
}

#[tokio::test]
async fn test_connection_refused_is_cache_unavailable() {
    let store = WebdisHashStore::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let err = store.hset("k", "f", "v").await.unwrap_err();
    assert!(err.is_cache_unavailable());
}
