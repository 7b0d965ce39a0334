//! Request pipeline against a mock backend: header/body/query wiring,
//! response decoding, and the single-shot recovery branches.

use std::time::{Duration, Instant};

use opendock_mcp::{ApiClient, ApiError, ApiRequest, AuthManager, Config};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, token: &str, with_creds: bool) -> ApiClient {
    let config = Config {
        api_url: server.uri(),
        username: with_creds.then(|| "user@example.com".to_string()),
        password: with_creds.then(|| "hunter2".to_string()),
        // Opaque tokens are treated as valid, so no auth traffic unless a
        // 401 forces a reissue.
        token: Some(token.to_string()),
    };
    let auth = AuthManager::new(&config).unwrap();
    ApiClient::new(&config.api_url, auth).unwrap()
}

#[tokio::test]
async fn get_carries_bearer_token_and_decodes_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "abc" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, "test-token", false);
    let out = api.request(ApiRequest::get("/item")).await.unwrap();
    assert_eq!(out, Some(json!({ "id": "abc" })));
}

#[tokio::test]
async fn post_serializes_body_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/carrier"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "name": "Acme Freight" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "c1" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, "test-token", false);
    let req = ApiRequest::post("/carrier").body(json!({ "name": "Acme Freight" }));
    assert_eq!(api.request(req).await.unwrap(), Some(json!({ "id": "c1" })));
}

#[tokio::test]
async fn query_params_reach_the_wire_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/appointment"))
        .and(query_param("warehouseId", "w1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, "test-token", false);
    let req = ApiRequest::get("/appointment")
        .query("warehouseId", "w1")
        .query("join", vec!["dock".to_string(), "loadType".to_string()])
        .query_opt("status", None::<String>);
    assert_eq!(api.request(req).await.unwrap(), Some(json!([])));

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert_eq!(query, "warehouseId=w1&join=dock&join=loadType");
}

#[tokio::test]
async fn no_content_maps_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/appointment/a1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, "test-token", false);
    assert_eq!(api.request(ApiRequest::delete("/appointment/a1")).await.unwrap(), None);
}

#[tokio::test]
async fn unauthorized_triggers_reissue_and_single_resend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .and(header("authorization", "Bearer stale-token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": "fresh-token" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, "stale-token", true);
    let out = api.request(ApiRequest::get("/item")).await.unwrap();
    assert_eq!(out, Some(json!({ "ok": true })));
}

#[tokio::test]
async fn second_unauthorized_surfaces_as_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .and(header("authorization", "Bearer stale-token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token rejected"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": "fresh-token" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("still unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, "stale-token", true);
    let err = api.request(ApiRequest::get("/item")).await.unwrap_err();
    assert_eq!(err.to_string(), "API error 401: still unauthorized");
}

#[tokio::test]
async fn rate_limit_without_header_waits_a_second_then_resends() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, "test-token", false);
    let start = Instant::now();
    let out = api.request(ApiRequest::get("/item")).await.unwrap();
    assert_eq!(out, Some(json!({ "ok": true })));
    assert!(start.elapsed() >= Duration::from_millis(900));
}

#[tokio::test]
async fn rate_limit_honors_retry_after_seconds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, "test-token", false);
    let start = Instant::now();
    let out = api.request(ApiRequest::get("/item")).await.unwrap();
    assert_eq!(out, Some(json!({ "ok": true })));
    // Retry-After: 0 overrides the one-second default.
    assert!(start.elapsed() < Duration::from_millis(900));
}

#[tokio::test]
async fn gateway_errors_get_one_delayed_retry() {
    for status in [502u16, 503, 504] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/item"))
            .respond_with(ResponseTemplate::new(status))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/item"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server, "test-token", false);
        let start = Instant::now();
        assert_eq!(api.request(ApiRequest::get("/item")).await.unwrap(), None);
        assert!(start.elapsed() >= Duration::from_millis(900));
    }
}

#[tokio::test]
async fn gateway_error_twice_surfaces_the_second_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .expect(2)
        .mount(&server)
        .await;

    let api = client(&server, "test-token", false);
    let err = api.request(ApiRequest::get("/item")).await.unwrap_err();
    assert_eq!(err.to_string(), "API error 503: upstream down");
}

#[tokio::test]
async fn other_client_errors_fail_without_retry() {
    for (status, body) in [(400u16, "bad request"), (404, "not found"), (500, "boom")] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/item"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server, "test-token", false);
        let err = api.request(ApiRequest::get("/item")).await.unwrap_err();
        assert_eq!(err.to_string(), format!("API error {status}: {body}"));
        assert!(matches!(err, ApiError::Api { .. }));
    }
}

#[tokio::test]
async fn transport_errors_propagate_unretried() {
    // A pooled server (MockServer::start) keeps its port open after drop;
    // a builder-created one actually shuts down, yielding a transport error.
    let server = MockServer::builder().start().await;
    let api = client(&server, "test-token", false);
    drop(server);

    let err = api.request(ApiRequest::get("/item")).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
