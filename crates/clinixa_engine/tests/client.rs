use std::time::Duration;

use clinixa_core::{validate, Likelihood, RawForm, SymptomRequest};
use clinixa_engine::{
    AnalysisClient, ClientSettings, FailureKind, ReqwestAnalysisClient, ANALYSIS_FALLBACK,
    MALFORMED_RESPONSE, SERVER_UNREACHABLE, TIMED_OUT,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(base: &str) -> ReqwestAnalysisClient {
    let settings = ClientSettings::with_base_url(Url::parse(base).unwrap());
    ReqwestAnalysisClient::new(settings).unwrap()
}

fn sample_request() -> SymptomRequest {
    validate(&RawForm {
        symptoms: "headache, fever".into(),
        age: "25".into(),
        gender: "male".into(),
        duration: "2 days".into(),
    })
    .unwrap()
}

fn sample_body() -> serde_json::Value {
    json!({
        "possible_diseases": [
            { "name": "Influenza", "likelihood": "High", "description": "Viral infection" }
        ],
        "precautions": ["Rest", "Drink fluids"],
        "when_to_seek_help": "If breathing becomes difficult",
        "disclaimer": "This is not a medical diagnosis."
    })
}

/// A local port with nothing listening on it.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// A listener that never accepts, with its backlog filled so new connects stall.
fn stalled_listener() -> (std::net::TcpListener, Vec<std::net::TcpStream>, String) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let mut held = Vec::new();
    for _ in 0..1024 {
        match std::net::TcpStream::connect_timeout(&addr, Duration::from_millis(100)) {
            Ok(stream) => held.push(stream),
            Err(_) => break,
        }
    }
    (listener, held, format!("http://{addr}"))
}

/// Serves one connection: reads the request, then sends `head` with a
/// `Content-Length` longer than the body that follows and hangs up.
async fn serve_truncated(head: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        let response = format!(
            "{head}\r\ncontent-type: application/json\r\ncontent-length: 512\r\n\r\n{{\"possible_dis"
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}")
}

async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut received = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        received.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&received);
        if let Some(end) = text.find("\r\n\r\n") {
            let body_len = text[..end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if received.len() >= end + 4 + body_len {
                return;
            }
        }
    }
}

#[tokio::test]
async fn analyze_posts_json_payload_and_decodes_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-symptoms"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "symptoms": "headache, fever",
            "age": 25,
            "gender": "male",
            "duration": "2 days"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server.uri())
        .analyze(&sample_request())
        .await
        .expect("analysis ok");

    assert_eq!(result.possible_diseases.len(), 1);
    assert_eq!(result.possible_diseases[0].name, "Influenza");
    assert_eq!(result.possible_diseases[0].likelihood, Likelihood::High);
    assert_eq!(result.precautions, vec!["Rest", "Drink fluids"]);
    assert_eq!(result.when_to_seek_help, "If breathing becomes difficult");
}

#[tokio::test]
async fn server_error_surfaces_detail_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-symptoms"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "model unavailable" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .analyze(&sample_request())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Application { status: 500 });
    assert_eq!(err.user_message(), "model unavailable");
}

#[tokio::test]
async fn error_without_detail_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-symptoms"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .analyze(&sample_request())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Application { status: 503 });
    assert_eq!(err.user_message(), ANALYSIS_FALLBACK);
}

#[tokio::test]
async fn success_with_unexpected_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-symptoms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "diagnosis": "flu" })))
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .analyze(&sample_request())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedResponse);
    assert_eq!(err.user_message(), MALFORMED_RESPONSE);
}

#[tokio::test]
async fn refused_connection_is_unreachable() {
    let err = client_for(&closed_port_url())
        .analyze(&sample_request())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Unreachable);
    assert_eq!(err.user_message(), SERVER_UNREACHABLE);
    assert_ne!(err.user_message(), err.message);
}

#[tokio::test]
async fn stalled_connect_is_unreachable_without_request_timeout() {
    let (_listener, _held, base) = stalled_listener();
    let settings = ClientSettings {
        connect_timeout: Duration::from_millis(300),
        request_timeout: None,
        ..ClientSettings::with_base_url(Url::parse(&base).unwrap())
    };
    let client = ReqwestAnalysisClient::new(settings).unwrap();

    let err = client.analyze(&sample_request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Unreachable);
    assert_eq!(err.user_message(), SERVER_UNREACHABLE);
}

#[tokio::test]
async fn truncated_success_body_is_malformed() {
    let base = serve_truncated("HTTP/1.1 200 OK").await;

    let err = client_for(&base)
        .analyze(&sample_request())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedResponse);
    assert_eq!(err.user_message(), MALFORMED_RESPONSE);
}

#[tokio::test]
async fn truncated_error_body_keeps_status_with_fallback() {
    let base = serve_truncated("HTTP/1.1 500 Internal Server Error").await;
    let err = client_for(&base)
        .analyze(&sample_request())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Application { status: 500 });
    assert_eq!(err.user_message(), ANALYSIS_FALLBACK);

    let base = serve_truncated("HTTP/1.1 503 Service Unavailable").await;
    let err = client_for(&base).health().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Application { status: 503 });
}

#[tokio::test]
async fn configured_timeout_is_reported_separately() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-symptoms"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(sample_body()),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::with_base_url(Url::parse(&server.uri()).unwrap())
    };
    let client = ReqwestAnalysisClient::new(settings).unwrap();

    let err = client.analyze(&sample_request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
    assert_eq!(err.user_message(), TIMED_OUT);
}

#[tokio::test]
async fn health_returns_arbitrary_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .mount(&server)
        .await;

    let body = client_for(&server.uri()).health().await.unwrap();
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn health_failure_keeps_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client_for(&server.uri()).health().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Application { status: 502 });

    let err = client_for(&closed_port_url()).health().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Unreachable);
}
