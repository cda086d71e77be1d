//! Debug dumps of requests and responses.
//!
//! Dumps are rendered as HTTP/1.1 text, then every literal occurrence of the
//! API key and secret is replaced with [`REDACTED`] before anything reaches
//! the logger.

use bytes::Bytes;
use http::HeaderMap;
use std::fmt::Write;

/// Marker substituted for secret values in dumps.
pub const REDACTED: &str = "[**************]";

/// Log target used for request/response dumps.
pub const LOG_TARGET: &str = "zerogate::http";

/// Replaces secret values in rendered text.
#[derive(Debug, Clone)]
pub struct Redactor {
    secrets: Vec<String>,
}

impl Redactor {
    /// Build a redactor for the given secret values. Empty values are ignored.
    pub fn new<I, S>(secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut secrets: Vec<String> = secrets
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.is_empty())
            .collect();
        // Longest first, so a secret containing another is replaced whole.
        secrets.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { secrets }
    }

    /// Replace every occurrence of every secret in `text`.
    pub fn redact(&self, text: &str) -> String {
        self.secrets
            .iter()
            .fold(text.to_string(), |acc, secret| acc.replace(secret.as_str(), REDACTED))
    }
}

/// Render an outgoing request the way it goes on the wire.
pub fn dump_request(request: &http::Request<Bytes>) -> String {
    let uri = request.uri();
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    let mut out = String::new();
    let _ = write!(out, "{} {} HTTP/1.1\r\n", request.method(), target);
    if let Some(authority) = uri.authority() {
        let _ = write!(out, "Host: {}\r\n", authority);
    }
    write_headers(&mut out, request.headers());
    out.push_str("\r\n");
    out.push_str(&String::from_utf8_lossy(request.body()));
    out
}

/// Render an incoming response.
pub fn dump_response(response: &http::Response<Bytes>) -> String {
    let status = response.status();

    let mut out = String::new();
    let _ = write!(
        out,
        "{:?} {} {}\r\n",
        response.version(),
        status.as_str(),
        status.canonical_reason().unwrap_or("")
    );
    write_headers(&mut out, response.headers());
    out.push_str("\r\n");
    out.push_str(&String::from_utf8_lossy(response.body()));
    out
}

fn write_headers(out: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let _ = write!(
            out,
            "{}: {}\r\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        );
    }
}
