//! Integration tests for the request pipeline over `HyperFetch`, using wiremock.

use assert2::let_assert;
use safetch::{
    DecodeError, ErrorKind, FetchExt, HyperFetch, Method, Request, RequestError, RequestInit,
    read_blob,
};
use serde::{Deserialize, Serialize};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

#[tokio::test]
async fn test_json_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"a":1}"#, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let url = format!("{}/users/1", mock_server.uri());
    let outcome = safetch::request(&client, url, None).await;

    let_assert!(Ok(processed) = outcome);
    assert_eq!(processed.status(), 200);
    assert_eq!(processed.json, Some(serde_json::json!({"a": 1})));
    assert_eq!(processed.text, None);
}

#[tokio::test]
async fn test_typed_json_body() {
    let mock_server = MockServer::start().await;

    let user = User {
        id: 1,
        name: "Alice".to_string(),
    };

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&user))
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let url = format!("{}/users/1", mock_server.uri());
    let processed = client.get(url, None).await.expect("success");

    let body: User = processed
        .json_as()
        .expect("json body")
        .expect("typed json");
    assert_eq!(body, user);
}

#[tokio::test]
async fn test_post_with_json_init() {
    let mock_server = MockServer::start().await;

    let input = User {
        id: 0,
        name: "Bob".to_string(),
    };
    let output = User {
        id: 42,
        name: "Bob".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&input))
        .respond_with(ResponseTemplate::new(201).set_body_json(&output))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let init = RequestInit::new()
        .method(Method::Post)
        .json(&input)
        .expect("json body");
    let url = format!("{}/users", mock_server.uri());
    let outcome = safetch::request(&client, url, init).await;

    let_assert!(Ok(processed) = outcome);
    assert_eq!(processed.status(), 201);
    let_assert!(Some(Ok(body)) = processed.json_as::<User>());
    assert_eq!(body, output);
}

#[tokio::test]
async fn test_text_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let outcome = client
        .get(format!("{}/hello", mock_server.uri()), None)
        .await;

    let_assert!(Ok(processed) = outcome);
    assert_eq!(processed.json, None);
    assert_eq!(processed.text.as_deref(), Some("hello"));
}

#[tokio::test]
async fn test_xml_is_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<feed/>", "application/xml"))
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let outcome = client.get(format!("{}/feed", mock_server.uri()), None).await;

    let_assert!(Ok(processed) = outcome);
    assert_eq!(processed.text.as_deref(), Some("<feed/>"));
}

#[tokio::test]
async fn test_binary_body_is_left_for_the_caller() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0x89, 0x50, 0x4e, 0x47], "image/png"),
        )
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let outcome = client
        .get(format!("{}/logo.png", mock_server.uri()), None)
        .await;

    let_assert!(Ok(mut processed) = outcome);
    assert!(processed.json.is_none() && processed.text.is_none());
    assert!(!processed.resp.body_used());

    let blob = read_blob(&mut processed.resp).await.expect("unread body");
    assert_eq!(blob.mime, "image/png");
    assert_eq!(blob.len(), 4);
}

#[tokio::test]
async fn test_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let init = RequestInit::new().method(Method::Delete);
    let outcome = client
        .request(format!("{}/users/1", mock_server.uri()), init)
        .await;

    let_assert!(Ok(processed) = outcome);
    assert_eq!(processed.status(), 204);
    assert!(processed.json.is_none() && processed.text.is_none());
}

#[tokio::test]
async fn test_http_error_keeps_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let outcome = client
        .get(format!("{}/missing", mock_server.uri()), None)
        .await;

    let_assert!(Err(err) = outcome);
    assert_eq!(err.kind(), ErrorKind::Http);
    assert_eq!(err.status(), Some(404));
    let_assert!(RequestError::Http { json, text, .. } = err);
    assert_eq!(json, None);
    assert_eq!(text.as_deref(), Some("not found"));
}

#[tokio::test]
async fn test_http_error_keeps_json() {
    #[derive(Debug, Deserialize)]
    struct ApiError {
        code: String,
    }

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"code": "E_BOOM"})),
        )
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let outcome = client
        .get(format!("{}/broken", mock_server.uri()), None)
        .await;

    let_assert!(Err(err) = outcome);
    assert!(err.is_http());
    let_assert!(Some(Ok(api_error)) = err.decode_json::<ApiError>());
    assert_eq!(api_error.code, "E_BOOM");
}

#[tokio::test]
async fn test_http_error_wins_over_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gateway"))
        .respond_with(ResponseTemplate::new(502).set_body_raw("<html>", "application/json"))
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let outcome = client
        .get(format!("{}/gateway", mock_server.uri()), None)
        .await;

    let_assert!(Err(RequestError::Http { resp, json, text }) = outcome);
    assert_eq!(resp.status(), 502);
    assert!(json.is_none() && text.is_none());
}

#[tokio::test]
async fn test_malformed_json_is_post_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("not valid json", "application/json"),
        )
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let outcome = client
        .get(format!("{}/users", mock_server.uri()), None)
        .await;

    let_assert!(Err(err) = outcome);
    assert_eq!(err.kind(), ErrorKind::Post);
    let_assert!(RequestError::Post { resp, error } = err);
    assert_eq!(resp.status(), 200);
    assert!(matches!(error, DecodeError::Json(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let client = HyperFetch::new();

    // Nothing listens on port 1
    let outcome = client.get("http://127.0.0.1:1/", None).await;

    let_assert!(Err(RequestError::Network) = outcome);
}

#[tokio::test]
async fn test_invalid_url_is_network_error() {
    let client = HyperFetch::new();

    let outcome = client.get("definitely not a url", None).await;

    let_assert!(Err(err) = outcome);
    assert!(err.is_network());
    assert!(err.response().is_none());
}

#[tokio::test]
async fn test_get_overrides_init_method() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("items"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let init = RequestInit::new().method(Method::Post);
    let outcome = safetch::get(&client, format!("{}/items", mock_server.uri()), init).await;

    let_assert!(Ok(processed) = outcome);
    assert_eq!(processed.text.as_deref(), Some("items"));
}

#[tokio::test]
async fn test_request_target_with_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/7"))
        .and(header("X-Request-Id", "abc-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("updated"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let url = url::Url::parse(&format!("{}/users/7", mock_server.uri())).expect("url");
    let target = Request::builder(Method::Put, url)
        .header("X-Request-Id", "abc-123")
        .body(bytes::Bytes::from_static(b"payload"))
        .build();

    let outcome = client.request(target, None).await;

    let_assert!(Ok(processed) = outcome);
    assert_eq!(processed.text.as_deref(), Some("updated"));
}

#[tokio::test]
async fn test_concurrent_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .expect(8)
        .mount(&mock_server)
        .await;

    let client = HyperFetch::new();
    let url = format!("{}/ping", mock_server.uri());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            let url = url.clone();
            tokio::spawn(async move { client.get(url, None).await })
        })
        .collect();

    for handle in handles {
        let outcome = handle.await.expect("task");
        let_assert!(Ok(processed) = outcome);
        assert_eq!(processed.text.as_deref(), Some("pong"));
    }
}
