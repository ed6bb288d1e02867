//! Gateway tests against a mock search service

use mockito::Matcher;
use reqwest::Method;
use search_portal::config::ServiceConfig;
use search_portal::search::{
    build_filter_params, build_search_params, SearchError, SearchGateway, SortKey, API_VERSION,
};
use serde_json::json;

fn gateway_for(url: &str) -> SearchGateway {
    let config = ServiceConfig {
        endpoint: url.to_string(),
        api_key: "test-key".to_string(),
        index_name: "margies-index-py".to_string(),
        api_version: API_VERSION.to_string(),
        request_timeout_secs: None,
    };
    SearchGateway::new(&config).unwrap()
}

#[tokio::test]
async fn test_query_index_sends_encoded_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/indexes/margies-index-py/docs".to_string()))
        .match_header("api-key", "test-key")
        .match_header("content-type", "application/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("search".into(), "new york & more".into()),
            Matcher::UrlEncoded("queryType".into(), "full".into()),
            Matcher::UrlEncoded("$filter".into(), "author eq 'Reviewer'".into()),
            Matcher::UrlEncoded("$orderby".into(), "last_modified desc".into()),
            Matcher::UrlEncoded("api-version".into(), "2020-06-30-Preview".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"@odata.count": 0, "@search.facets": {"author": []}, "value": []}"#)
        .create_async()
        .await;

    let gateway = gateway_for(&server.url());
    let params = build_filter_params("new york & more", Some("Reviewer"), SortKey::Date, API_VERSION);
    let response = gateway
        .query_index("margies-index-py", &params)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(response["@odata.count"], 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_send_puts_json_body() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({"name": "margies-index-py", "fields": [{"name": "id", "key": true}]});
    let mock = server
        .mock("PUT", Matcher::Regex(r"^/indexes/margies-index-py".to_string()))
        .match_header("api-key", "test-key")
        .match_query(Matcher::UrlEncoded(
            "api-version".into(),
            "2020-06-30-Preview".into(),
        ))
        .match_body(Matcher::Json(body.clone()))
        .with_status(201)
        .with_body(r#"{"name": "margies-index-py"}"#)
        .create_async()
        .await;

    let gateway = gateway_for(&server.url());
    let response = gateway
        .send(Method::PUT, "indexes/margies-index-py", Some(&body))
        .await
        .unwrap();

    assert_eq!(response, Some(json!({"name": "margies-index-py"})));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_body_yields_none() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", Matcher::Regex(r"^/indexers/margies-indexer".to_string()))
        .with_status(204)
        .create_async()
        .await;

    let gateway = gateway_for(&server.url());
    let response = gateway
        .send(Method::DELETE, "indexers/margies-indexer", None)
        .await
        .unwrap();

    assert_eq!(response, None);
}

#[tokio::test]
async fn test_error_status_body_is_returned() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(r"^/servicestats".to_string()))
        .with_status(403)
        .with_body(r#"{"error": {"code": "", "message": "Access denied"}}"#)
        .create_async()
        .await;

    let gateway = gateway_for(&server.url());
    let response = gateway.send(Method::GET, "servicestats", None).await.unwrap();

    assert_eq!(response.unwrap()["error"]["message"], "Access denied");
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(r"^/indexes/".to_string()))
        .with_status(200)
        .with_body("<html>gateway timeout</html>")
        .create_async()
        .await;

    let gateway = gateway_for(&server.url());
    let result = gateway
        .query_index("margies-index-py", &build_search_params("x", API_VERSION))
        .await;

    assert!(matches!(result, Err(SearchError::Decode(_))));
}

#[tokio::test]
async fn test_non_utf8_body_is_transport_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(r"^/servicestats".to_string()))
        .with_status(200)
        .with_body(vec![0xff, 0xfe, 0xfd])
        .create_async()
        .await;

    let gateway = gateway_for(&server.url());
    let result = gateway.send(Method::GET, "servicestats", None).await;

    assert!(matches!(result, Err(SearchError::Transport(_))));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let gateway = gateway_for("http://127.0.0.1:1");
    let result = gateway.send(Method::GET, "servicestats", None).await;

    assert!(matches!(result, Err(SearchError::Transport(_))));
}
