use atlassian_rest_api::{
    ApiError, Credential, HttpMethod, HttpTransport, Params, Transport, TransportConfig,
    TransportErrorKind,
};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer, credential: Credential) -> HttpTransport {
    HttpTransport::new(TransportConfig::new(server.uri(), credential))
}

#[tokio::test]
async fn test_get_sends_query_and_basic_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/project"))
        .and(query_param("a", "1"))
        .and(query_param("b", "2"))
        .and(basic_auth("jira", "secret"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = transport(&mock_server, Credential::basic("jira", "secret"));
    let params = Params::new().with("a", "1").with("b", "2");
    let result = client
        .call_endpoint("project", params, HttpMethod::Get)
        .await
        .unwrap();

    assert_eq!(result, json!({"ok": true}));
    assert_eq!(client.result_http_code().unwrap(), 200);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("a=1&b=2"));
    assert_eq!(
        requests[0].headers.get("authorization").unwrap(),
        "Basic amlyYTpzZWNyZXQ="
    );
}

#[tokio::test]
async fn test_anonymous_sends_no_authorization() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let mut client = transport(&mock_server, Credential::anonymous());
    client.get("project").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_post_and_put_send_json_body_without_query() {
    let mock_server = MockServer::start().await;

    for verb in ["POST", "PUT"] {
        Mock::given(method(verb))
            .and(path("/project"))
            .and(body_json(json!({"a": "1", "b": "2"})))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"created": true})))
            .mount(&mock_server)
            .await;
    }

    let mut client = transport(&mock_server, Credential::anonymous());
    for verb in [HttpMethod::Post, HttpMethod::Put] {
        let params = Params::new().with("a", "1").with("b", "2");
        let result = client.call_endpoint("project", params, verb).await.unwrap();
        assert_eq!(result, json!({"created": true}));
        assert_eq!(client.result_http_code().unwrap(), 201);
    }

    for request in mock_server.received_requests().await.unwrap() {
        assert_eq!(request.url.query(), None);
        assert_eq!(request.body, br#"{"a":"1","b":"2"}"#.to_vec());
    }
}

#[tokio::test]
async fn test_delete_sends_parameters_in_query_without_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/user"))
        .and(query_param("username", "bob"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let mut client = transport(&mock_server, Credential::anonymous());
    let params = Params::new().with("username", "bob");
    let result = client
        .call_endpoint("user", params, HttpMethod::Delete)
        .await
        .unwrap();
    assert!(result.is_null());

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_status_codes_map_to_error_kinds() {
    let mock_server = MockServer::start().await;

    for (route, status) in [("/missing", 404u16), ("/secret", 401), ("/empty", 204), ("/broken", 500)] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&mock_server)
            .await;
    }

    let mut client = transport(&mock_server, Credential::anonymous());

    assert!(matches!(client.get("missing").await, Err(ApiError::NotFound)));
    assert_eq!(client.result_http_code().unwrap(), 404);
    assert!(matches!(client.get("secret").await, Err(ApiError::Unauthorized)));
    assert!(matches!(client.get("empty").await, Err(ApiError::NoContent)));

    match client.get("broken").await {
        Err(ApiError::Http { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("500"));
        }
        other => panic!("expected HttpError, got {other:?}"),
    }
    assert_eq!(client.result_http_code().unwrap(), 500);
}

#[tokio::test]
async fn test_same_get_twice_is_idempotent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/project/TEST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "TEST"})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut client = transport(&mock_server, Credential::anonymous());
    let first = client.get("project/TEST").await.unwrap();
    let second = client.get("project/TEST").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_parameters_do_not_carry_over() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let mut client = transport(&mock_server, Credential::anonymous());
    let params = Params::new().with("expand", "lead");
    client
        .call_endpoint("project", params, HttpMethod::Get)
        .await
        .unwrap();
    client.get("project").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("expand=lead"));
    assert_eq!(requests[1].url.query(), None);
}

#[tokio::test]
async fn test_non_json_body_is_returned_as_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&mock_server)
        .await;

    let mut client = transport(&mock_server, Credential::anonymous());
    assert_eq!(client.get("plain").await.unwrap(), json!("hello"));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let config = TransportConfig::new("http://127.0.0.1:1", Credential::anonymous());
    let mut client = HttpTransport::new(config);

    match client.get("project").await {
        Err(ApiError::Transport { kind, .. }) => assert_eq!(kind, TransportErrorKind::Connect),
        other => panic!("expected TransportError, got {other:?}"),
    }
    assert!(matches!(client.result_http_code(), Err(ApiError::NoResult)));
}

#[tokio::test]
async fn test_cookie_file_is_written_on_close() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "JSESSIONID=abc123; Path=/")
                .set_body_json(json!({"session": {"name": "JSESSIONID"}})),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let cookie_file = dir.path().join("cookies");
    let config =
        TransportConfig::new(mock_server.uri(), Credential::anonymous()).with_cookie_file(&cookie_file);
    let mut client = HttpTransport::new(config);

    client
        .call_endpoint("session", Params::new(), HttpMethod::Post)
        .await
        .unwrap();
    client.close();

    let saved = std::fs::read_to_string(&cookie_file).unwrap();
    assert!(saved.contains("JSESSIONID=abc123"));
}

#[tokio::test]
async fn test_expired_cookie_is_removed_from_file_on_close() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/session"))
        .and(header("cookie", "JSESSIONID=stale"))
        .respond_with(
            ResponseTemplate::new(204).insert_header("set-cookie", "JSESSIONID=; Path=/; Max-Age=0"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let cookie_file = dir.path().join("cookies");
    std::fs::write(&cookie_file, "JSESSIONID=stale\n").unwrap();

    let config =
        TransportConfig::new(mock_server.uri(), Credential::anonymous()).with_cookie_file(&cookie_file);
    let mut client = HttpTransport::new(config);

    let err = client
        .call_endpoint("session", Params::new(), HttpMethod::Delete)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NoContent));
    client.close();

    let saved = std::fs::read_to_string(&cookie_file).unwrap();
    assert!(!saved.contains("stale"), "cookie file: {saved:?}");
    assert!(saved.trim().is_empty());
}
