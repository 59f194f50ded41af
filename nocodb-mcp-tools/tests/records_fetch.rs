//! Integration tests for the records_fetch MCP tool
//!
//! These tests run the full tool path (server dispatch, argument parsing,
//! HTTP request, response shaping) against a wiremock NocoDB stand-in.

use nocodb_mcp_tools::{McpServer, NocoDbConfig};
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TABLE_ID: &str = "mg0cr0r3zyirzd8";

fn records_path() -> String {
    format!("/api/v2/tables/{TABLE_ID}/records")
}

fn server_for(mock: &MockServer, token: Option<&str>) -> McpServer {
    let config = NocoDbConfig {
        base_url: mock.uri(),
        api_token: token.map(str::to_string),
        ..NocoDbConfig::default()
    };
    McpServer::new(config)
}

fn args(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object arguments, got {other}"),
    }
}

fn response_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => &text.text,
        other => panic!("expected text content, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_returns_count_and_records() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(records_path()))
        .and(header("accept", "application/json"))
        .and(header("xc-token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{"Id": 1, "Title": "first"}, {"Id": 2, "Title": "second"}],
            "pageInfo": {"totalRows": 2}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server, Some("test-token"));
    let result = server
        .execute_tool("records_fetch", args(json!({})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
    let envelope: Value = serde_json::from_str(response_text(&result)).unwrap();
    assert_eq!(envelope["count"], 2);
    assert_eq!(
        envelope["records"],
        json!([{"Id": 1, "Title": "first"}, {"Id": 2, "Title": "second"}])
    );
}

#[tokio::test]
async fn test_fetch_sends_query_parameters() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(records_path()))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "20"))
        .and(query_param("shuffle", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server, Some("test-token"));
    let result = server
        .execute_tool(
            "records_fetch",
            args(json!({"limit": 10, "offset": 20, "shuffle": 1})),
        )
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
}

#[tokio::test]
async fn test_fetch_defaults_applied_to_query() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(records_path()))
        .and(query_param("limit", "25"))
        .and(query_param("offset", "0"))
        .and(query_param("shuffle", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server, Some("test-token"));
    let result = server
        .execute_tool("records_fetch", args(json!({})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
}

#[tokio::test]
async fn test_fetch_accepts_rows_field() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(records_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"rows": [{"Id": 7}]})),
        )
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server, Some("test-token"));
    let result = server
        .execute_tool("records_fetch", args(json!({})))
        .await
        .unwrap();

    let envelope: Value = serde_json::from_str(response_text(&result)).unwrap();
    assert_eq!(envelope["count"], 1);
    assert_eq!(envelope["records"], json!([{"Id": 7}]));
}

#[tokio::test]
async fn test_fetch_unrecognized_shape_yields_empty_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(records_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"Id": 1}]})),
        )
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server, Some("test-token"));
    let result = server
        .execute_tool("records_fetch", args(json!({})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
    let envelope: Value = serde_json::from_str(response_text(&result)).unwrap();
    assert_eq!(envelope["count"], 0);
    assert_eq!(envelope["records"], json!([]));
}

#[tokio::test]
async fn test_missing_token_short_circuits_without_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server, None);
    let result = server
        .execute_tool("records_fetch", args(json!({})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        response_text(&result),
        "Error: NOCODB_TOKEN is not set and no token was provided"
    );
}

#[tokio::test]
async fn test_explicit_token_overrides_configured_token() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(records_path()))
        .and(header("xc-token", "param-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server, Some("config-token"));
    let result = server
        .execute_tool("records_fetch", args(json!({"token": "param-token"})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
}

#[tokio::test]
async fn test_explicit_token_works_without_configured_token() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(records_path()))
        .and(header("xc-token", "param-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server, None);
    let result = server
        .execute_tool("records_fetch", args(json!({"token": "param-token"})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
}

#[tokio::test]
async fn test_http_failure_reports_status_line_only() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(records_path()))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid token"))
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server, Some("bad-token"));
    let result = server
        .execute_tool("records_fetch", args(json!({})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    // The response body must not leak into the tool output.
    assert_eq!(response_text(&result), "Request failed: 401 Unauthorized");
}

#[tokio::test]
async fn test_server_error_reports_status_line() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(records_path()))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server, Some("test-token"));
    let result = server
        .execute_tool("records_fetch", args(json!({})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        response_text(&result),
        "Request failed: 500 Internal Server Error"
    );
}

#[tokio::test]
async fn test_network_error_reports_error_prefix() {
    // Nothing is listening here; the connection is refused immediately.
    let config = NocoDbConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        api_token: Some("test-token".to_string()),
        ..NocoDbConfig::default()
    };
    let server = McpServer::new(config);

    let result = server
        .execute_tool("records_fetch", args(json!({})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert!(response_text(&result).starts_with("Error: "));
}

#[tokio::test]
async fn test_invalid_limit_is_protocol_error() {
    let mock_server = MockServer::start().await;
    let server = server_for(&mock_server, Some("test-token"));

    let result = server
        .execute_tool("records_fetch", args(json!({"limit": 0})))
        .await;
    assert!(result.is_err());

    let result = server
        .execute_tool("records_fetch", args(json!({"limit": 1001})))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_non_json_success_body_reports_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(records_path()))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server, Some("test-token"));
    let result = server
        .execute_tool("records_fetch", args(json!({})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert!(response_text(&result).starts_with("Error: "));
}
