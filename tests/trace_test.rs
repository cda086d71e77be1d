//! Debug-mode dumps must never leak the API key or secret.

use log::{LevelFilter, Log, Metadata, Record};
use serde_json::json;
use std::sync::{Mutex, Once};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zerogate::trace::{LOG_TARGET, REDACTED};
use zerogate::{Body, Client, ClientOption, Context};

const API_KEY: &str = "key_5fbea6690113a5b9560bc9def29c91e2";
const API_SECRET: &str = "1f4f6db557e4fdce6eb1dbbcc9f5d544f99252e8c2b5158a566e1c4667a48717";

struct CaptureLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target() == LOG_TARGET
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.lines.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    lines: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

fn install_logger() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Dumps captured so far that mention `marker`.
fn dumps_containing(marker: &str) -> Vec<String> {
    LOGGER
        .lines
        .lock()
        .unwrap()
        .iter()
        .filter(|line| line.contains(marker))
        .cloned()
        .collect()
}

#[tokio::test]
async fn test_request_dump_is_redacted() {
    install_logger();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/trace-request"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&mock_server)
        .await;

    let client = Client::with_options(
        API_KEY,
        API_SECRET,
        [
            ClientOption::BaseUrl(mock_server.uri()),
            ClientOption::Debug(true),
        ],
    )
    .unwrap();

    // The secret travels in the body so the request dump contains both values.
    client
        .post(
            &Context::background(),
            "/trace-request",
            None,
            Body::json(&json!({"echo": API_SECRET})).unwrap(),
            None,
        )
        .await
        .unwrap();

    let dumps = dumps_containing("POST /trace-request HTTP/1.1");
    assert_eq!(dumps.len(), 1);
    let dump = &dumps[0];
    assert!(!dump.contains(API_KEY));
    assert!(!dump.contains(API_SECRET));
    assert!(dump.contains(&format!("APIKey={REDACTED}")));
    assert!(dump.contains(&format!(r#"{{"echo":"{REDACTED}"}}"#)));
}

#[tokio::test]
async fn test_response_dump_is_redacted() {
    install_logger();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trace-response"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-trace", "trace-response-marker")
                .set_body_json(json!({
                    "success": true,
                    "data": {"key": API_KEY, "secret": API_SECRET}
                })),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_options(
        API_KEY,
        API_SECRET,
        [
            ClientOption::BaseUrl(mock_server.uri()),
            ClientOption::Debug(true),
        ],
    )
    .unwrap();

    let res = client
        .get(&Context::background(), "/trace-response", None, None)
        .await
        .unwrap();

    // Redaction applies to the dump only, never to the returned body.
    let data: serde_json::Value = res.data().unwrap();
    assert_eq!(data["secret"], API_SECRET);

    let dumps = dumps_containing("trace-response-marker");
    assert_eq!(dumps.len(), 1);
    let dump = &dumps[0];
    assert!(dump.contains("HTTP/1.1 200 OK"));
    assert!(!dump.contains(API_KEY));
    assert!(!dump.contains(API_SECRET));
    assert_eq!(dump.matches(REDACTED).count(), 2);
}

#[tokio::test]
async fn test_no_dump_without_debug() {
    install_logger();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trace-quiet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&mock_server)
        .await;

    let client = Client::with_options(
        API_KEY,
        API_SECRET,
        [ClientOption::BaseUrl(mock_server.uri())],
    )
    .unwrap();

    client
        .get(&Context::background(), "/trace-quiet", None, None)
        .await
        .unwrap();

    assert!(dumps_containing("/trace-quiet").is_empty());
}
