//! Response classification and envelope decoding.

use crate::error::{ApiError, ErrorResponse, Result};
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Successful (status below 400) API response with its raw body.
///
/// Decoding the body into a typed payload is up to the caller; see
/// [`ApiResponse::data`] and [`ApiResponse::paged`].
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Raw response body.
    pub body: Bytes,
    /// HTTP status code.
    pub status_code: StatusCode,
    /// Status line text, e.g. `"200 OK"`.
    pub status: String,
    /// Response headers.
    pub headers: HeaderMap,
}

impl ApiResponse {
    /// Decode the whole body as `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decode a single-resource envelope and return its `data`.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(self.json::<SuccessResponse<T>>()?.data)
    }

    /// Decode a collection envelope.
    pub fn paged<T: DeserializeOwned>(&self) -> Result<PagedResponse<T>> {
        self.json()
    }
}

/// Envelope for single resources: `{"success": true, "data": ...}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SuccessResponse<T> {
    /// Always true for success envelopes.
    #[serde(default)]
    pub success: bool,
    /// The resource.
    pub data: T,
}

/// Envelope for collections: `{"success": true, "data": [...], "total": N}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PagedResponse<T> {
    /// Always true for success envelopes.
    #[serde(default)]
    pub success: bool,
    /// Items in this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Total number of items on the server.
    #[serde(default)]
    pub total: i64,
}

/// Turn a transport response into an [`ApiResponse`] or an error.
///
/// Status codes of 400 and above must carry a decodable error envelope; if
/// the body is not one, the decoding error itself is returned.
pub fn classify(response: http::Response<Bytes>) -> Result<ApiResponse> {
    let (parts, body) = response.into_parts();

    if parts.status.as_u16() >= 400 {
        let envelope: ErrorResponse = serde_json::from_slice(&body)?;
        return Err(ApiError {
            status_code: parts.status.as_u16(),
            response: envelope,
        }
        .into());
    }

    let status = match parts.status.canonical_reason() {
        Some(reason) => format!("{} {}", parts.status.as_str(), reason),
        None => parts.status.as_str().to_string(),
    };

    Ok(ApiResponse {
        body,
        status_code: parts.status,
        status,
        headers: parts.headers,
    })
}
