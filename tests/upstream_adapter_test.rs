//! HTTP upstream adapter tests against a real local socket.

mod common;

use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vnfeed::adapters::http_upstream::HttpUpstream;
use vnfeed::domain::error::UpstreamError;
use vnfeed::domain::udf::UdfOperation;
use vnfeed::ports::upstream_port::UpstreamPort;

use common::pairs;

#[tokio::test]
async fn forwards_path_query_and_no_store_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tv/history"))
        .and(query_param("symbol", "FPT"))
        .and(query_param("resolution", "D"))
        .and(header("cache-control", "no-store"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"s":"ok"}"#, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let upstream = HttpUpstream::new(&server.uri(), Duration::from_secs(2)).unwrap();
    let response = upstream
        .fetch(
            UdfOperation::History,
            &pairs(&[("symbol", "FPT"), ("resolution", "D")]),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert!(response.is_success());
    assert_eq!(response.body, br#"{"s":"ok"}"#.to_vec());
    assert_eq!(response.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn error_statuses_complete_the_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tv/search"))
        .respond_with(ResponseTemplate::new(503).set_body_raw("down for maintenance", "text/plain"))
        .mount(&server)
        .await;

    let upstream = HttpUpstream::new(&server.uri(), Duration::from_secs(2)).unwrap();
    let response = upstream
        .fetch(UdfOperation::Search, &pairs(&[("query", "fpt")]))
        .await
        .unwrap();

    assert_eq!(response.status, 503);
    assert!(!response.is_success());
    assert_eq!(response.body, b"down for maintenance".to_vec());
}

#[tokio::test]
async fn slow_upstream_reports_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tv/time"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let upstream = HttpUpstream::new(&server.uri(), Duration::from_millis(100)).unwrap();
    let result = upstream.fetch(UdfOperation::Time, &[]).await;

    assert!(matches!(result, Err(UpstreamError::Timeout { .. })));
}

#[tokio::test]
async fn refused_connection_reports_transport_error() {
    // Discard port: nothing listens there.
    let upstream = HttpUpstream::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
    let result = upstream.fetch(UdfOperation::Config, &[]).await;

    assert!(matches!(result, Err(UpstreamError::Transport(_))));
}

#[tokio::test]
async fn trailing_slash_in_base_url_builds_clean_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tv/time"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1717405823"))
        .expect(1)
        .mount(&server)
        .await;

    let upstream =
        HttpUpstream::new(&format!("{}/", server.uri()), Duration::from_secs(2)).unwrap();
    let response = upstream.fetch(UdfOperation::Time, &[]).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"1717405823".to_vec());
}

#[tokio::test]
async fn operation_names_map_to_distinct_routes() {
    let server = MockServer::start().await;
    for op in UdfOperation::ALL {
        Mock::given(method("GET"))
            .and(path(format!("/api/tv/{}", op.wire_name())))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(format!(r#"{{"op":"{}"}}"#, op.wire_name()), "application/json"),
            )
            .mount(&server)
            .await;
    }

    let upstream = HttpUpstream::new(&server.uri(), Duration::from_secs(2)).unwrap();
    for op in UdfOperation::ALL {
        let response = upstream.fetch(op, &[]).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["op"], op.wire_name());
    }
}
