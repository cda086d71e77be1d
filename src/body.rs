//! Request bodies.

use crate::error::Result;
use bytes::Bytes;
use serde::Serialize;
use std::fmt;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Body sent for `POST`/`PUT` requests when none is given.
pub const EMPTY_JSON_OBJECT: &[u8] = b"{}";

/// Request body.
///
/// Whatever the variant, the body is turned into one owned byte buffer
/// before the request is signed, and that buffer is what gets sent.
#[derive(Default)]
pub enum Body {
    /// No body. Sent as `{}` for `POST` and `PUT`.
    #[default]
    Empty,
    /// Raw bytes, sent unchanged.
    Raw(Bytes),
    /// A JSON value, serialized when the request is built.
    Json(serde_json::Value),
    /// A byte stream, drained to completion when the request is built.
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

impl Body {
    /// Build a JSON body from any serializable value.
    ///
    /// The value is serialized right away, so struct fields keep their
    /// declaration order on the wire.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Body::Raw(Bytes::from(serde_json::to_vec(value)?)))
    }

    /// Build a body from a byte stream.
    pub fn reader(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Body::Reader(Box::new(reader))
    }

    /// Materialize the body into the exact bytes that will be signed and sent.
    pub async fn into_bytes(self) -> Result<Bytes> {
        match self {
            Body::Empty => Ok(Bytes::from_static(EMPTY_JSON_OBJECT)),
            Body::Raw(bytes) => Ok(bytes),
            Body::Json(value) => Ok(Bytes::from(serde_json::to_vec(&value)?)),
            Body::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf).await?;
                Ok(Bytes::from(buf))
            }
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Empty"),
            Body::Raw(bytes) => f.debug_tuple("Raw").field(&bytes.len()).finish(),
            Body::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Body::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Raw(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Raw(Bytes::from(bytes))
    }
}

impl From<&'static [u8]> for Body {
    fn from(bytes: &'static [u8]) -> Self {
        Body::Raw(Bytes::from_static(bytes))
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Raw(Bytes::from(s))
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}

impl<T: Into<Body>> From<Option<T>> for Body {
    fn from(body: Option<T>) -> Self {
        body.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_becomes_empty_object() {
        let bytes = Body::Empty.into_bytes().await.unwrap();
        assert_eq!(&bytes[..], b"{}");
    }

    #[tokio::test]
    async fn test_raw_passes_through() {
        let raw = b"  not json at all ".to_vec();
        let bytes = Body::from(raw.clone()).into_bytes().await.unwrap();
        assert_eq!(bytes.to_vec(), raw);
    }

    #[tokio::test]
    async fn test_json_serializes_struct() {
        #[derive(Serialize)]
        struct Request {
            name: &'static str,
            description: &'static str,
        }

        let body = Body::json(&Request {
            name: "Test",
            description: "test tenant",
        })
        .unwrap();
        let bytes = body.into_bytes().await.unwrap();
        assert_eq!(&bytes[..], br#"{"name":"Test","description":"test tenant"}"#);
    }

    #[tokio::test]
    async fn test_reader_is_drained() {
        let data: &'static [u8] = b"streamed payload";
        let bytes = Body::reader(data).into_bytes().await.unwrap();
        assert_eq!(&bytes[..], data);
    }

    #[tokio::test]
    async fn test_option_none_is_empty() {
        let body = Body::from(None::<serde_json::Value>);
        assert!(matches!(body, Body::Empty));

        let body = Body::from(Some(json!({"a": 1})));
        assert!(matches!(body, Body::Json(_)));
    }
}
