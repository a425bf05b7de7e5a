//! End-to-end uploads against a local `tiny_http` server.

use std::io::{Read, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use pretty_assertions::assert_eq;
use sbom_uploader::config::{ApiKey, ConfigError, UploaderConfig};
use sbom_uploader::exit::{exit_code_for, EXIT_ACCEPTED, EXIT_FAILED, EXIT_REJECTED};
use sbom_uploader::upload::ResponseBody;
use sbom_uploader::{upload, UploadError};

const API_KEY: &str = "odt_integration_key";

/// What the mock server saw.
#[derive(Debug)]
struct Captured {
    method: String,
    url: String,
    api_key: Option<String>,
    content_type: Option<String>,
    body: String,
}

struct MockServer {
    base_url: String,
    requests: mpsc::Receiver<Captured>,
}

impl MockServer {
    /// Answer the first request with `status` and `body`, after an optional delay.
    fn start(status: u16, body: &'static str, delay: Duration) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock server");
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("ip listener");
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let Ok(Some(mut request)) = server.recv_timeout(Duration::from_secs(10)) else {
                return;
            };

            let header = |name: &'static str| {
                request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv(name))
                    .map(|h| h.value.as_str().to_owned())
            };
            let api_key = header("X-Api-Key");
            let content_type = header("Content-Type");

            let mut body_text = String::new();
            let _ = request.as_reader().read_to_string(&mut body_text);

            let _ = tx.send(Captured {
                method: request.method().to_string(),
                url: request.url().to_owned(),
                api_key,
                content_type,
                body: body_text,
            });

            thread::sleep(delay);
            let response = tiny_http::Response::from_string(body).with_status_code(status);
            let _ = request.respond(response);
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            requests: rx,
        }
    }

    fn responding(status: u16, body: &'static str) -> Self {
        Self::start(status, body, Duration::ZERO)
    }

    fn received(&self) -> Captured {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("mock server received a request")
    }

    fn assert_untouched(&self) {
        assert!(
            self.requests.recv_timeout(Duration::from_millis(300)).is_err(),
            "no request should have been sent"
        );
    }
}

fn write_bom(dir: &Path, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join("bom.json");
    let mut file = std::fs::File::create(&path).expect("create bom");
    file.write_all(bytes).expect("write bom");
    path
}

fn config_for(base_url: &str, bom_path: &Path) -> UploaderConfig {
    UploaderConfig {
        base_url: base_url.to_owned(),
        api_key: ApiKey::new(API_KEY),
        project_name: "shop".into(),
        project_version: "2.3.1".into(),
        bom_path: bom_path.to_path_buf(),
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn accepted_upload_reports_token() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bom = write_bom(dir.path(), br#"{"bomFormat":"CycloneDX","specVersion":"1.5"}"#);
    let server = MockServer::responding(200, r#"{"token":"abc123"}"#);

    let outcome = upload(&config_for(&server.base_url, &bom))
        .await
        .expect("upload completes");

    assert_eq!(outcome.status, 200);
    assert!(outcome.success);
    assert_eq!(outcome.token.as_deref(), Some("abc123"));

    let request = server.received();
    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "/api/v1/bom");
    assert_eq!(request.api_key.as_deref(), Some(API_KEY));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));

    let body: serde_json::Value = serde_json::from_str(&request.body).expect("json body");
    assert_eq!(body["projectName"], "shop");
    assert_eq!(body["projectVersion"], "2.3.1");
    assert_eq!(body["autoCreate"], true);
}

#[tokio::test]
async fn payload_round_trips_binary_content() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bytes: Vec<u8> = (0..=255u8).cycle().take(4099).collect();
    let bom = write_bom(dir.path(), &bytes);
    let server = MockServer::responding(200, r#"{"token":"t"}"#);

    upload(&config_for(&server.base_url, &bom))
        .await
        .expect("upload completes");

    let body: serde_json::Value = serde_json::from_str(&server.received().body).expect("json body");
    let encoded = body["bom"].as_str().expect("bom is a string");
    assert_eq!(STANDARD.decode(encoded).expect("valid base64"), bytes);
}

#[tokio::test]
async fn rejected_upload_keeps_raw_text() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bom = write_bom(dir.path(), b"{}");
    let server = MockServer::responding(400, "bad request");

    let outcome = upload(&config_for(&server.base_url, &bom))
        .await
        .expect("a 400 is an outcome, not an error");

    assert_eq!(outcome.status, 400);
    assert!(!outcome.success);
    assert_eq!(outcome.token, None);
    assert_eq!(outcome.body, ResponseBody::Text("bad request".into()));
}

#[tokio::test]
async fn structured_error_body_is_surfaced() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bom = write_bom(dir.path(), b"{}");
    let server = MockServer::responding(401, r#"{"message":"invalid api key"}"#);

    let outcome = upload(&config_for(&server.base_url, &bom))
        .await
        .expect("upload completes");

    assert_eq!(outcome.status, 401);
    assert_eq!(
        outcome.body,
        ResponseBody::Json(serde_json::json!({ "message": "invalid api key" }))
    );
}

#[tokio::test]
async fn missing_or_placeholder_key_sends_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bom = write_bom(dir.path(), b"{}");

    for key in ["", "   ", "YOUR_API_KEY", "changeme"] {
        let server = MockServer::responding(200, r#"{"token":"never"}"#);
        let config = UploaderConfig {
            api_key: ApiKey::new(key),
            ..config_for(&server.base_url, &bom)
        };

        let err = upload(&config).await.unwrap_err();
        assert!(
            matches!(
                err,
                UploadError::Config(ConfigError::MissingApiKey | ConfigError::PlaceholderApiKey)
            ),
            "{key:?}: {err}"
        );
        server.assert_untouched();
    }
}

#[tokio::test]
async fn missing_file_sends_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let server = MockServer::responding(200, r#"{"token":"never"}"#);
    let config = config_for(&server.base_url, &dir.path().join("does-not-exist.json"));

    let err = upload(&config).await.unwrap_err();
    assert!(matches!(err, UploadError::NotFound { .. }), "{err}");
    assert!(err.to_string().contains("does-not-exist.json"));
    server.assert_untouched();
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let dir = tempfile::tempdir().expect("temp dir");
    let bom = write_bom(dir.path(), b"{}");

    let err = upload(&config_for(&format!("http://127.0.0.1:{port}"), &bom))
        .await
        .unwrap_err();

    match &err {
        UploadError::Transport { endpoint, source } => {
            assert_eq!(endpoint, &format!("http://127.0.0.1:{port}/api/v1/bom"));
            assert!(source.is_connect(), "{source}");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert!(std::error::Error::source(&err).is_some());
    assert!(!err.to_string().contains(API_KEY));
}

#[tokio::test]
async fn slow_server_times_out() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bom = write_bom(dir.path(), b"{}");
    let server = MockServer::start(200, r#"{"token":"late"}"#, Duration::from_secs(3));
    let config = UploaderConfig {
        timeout_secs: 1,
        ..config_for(&server.base_url, &bom)
    };

    let err = upload(&config).await.unwrap_err();
    match err {
        UploadError::Transport { source, .. } => assert!(source.is_timeout(), "{source}"),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn exit_codes_follow_the_server_answer() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bom = write_bom(dir.path(), b"{}");

    let accepted = MockServer::responding(200, r#"{"token":"abc123"}"#);
    let result = upload(&config_for(&accepted.base_url, &bom)).await;
    assert_eq!(exit_code_for(&result), EXIT_ACCEPTED);

    let rejected = MockServer::responding(400, "bad request");
    let result = upload(&config_for(&rejected.base_url, &bom)).await;
    assert_eq!(exit_code_for(&result), EXIT_REJECTED);

    let missing = config_for(&rejected.base_url, &dir.path().join("absent.json"));
    assert_eq!(exit_code_for(&upload(&missing).await), EXIT_FAILED);
}
