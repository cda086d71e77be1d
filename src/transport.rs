//! Pluggable HTTP transport.
//!
//! The client never talks to the network directly: it hands a fully built,
//! signed `http::Request<Bytes>` to a [`Transport`] and receives the complete
//! response. Retries, pooling, proxies and rate limiting all belong to the
//! transport.

use crate::error::BoxError;
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::Debug;

/// Performs one HTTP exchange.
///
/// Implementations must be safe to share between concurrent calls.
#[async_trait]
pub trait Transport: Debug + Send + Sync + 'static {
    /// Send the request and return the response with its body fully read.
    async fn perform(
        &self,
        request: http::Request<Bytes>,
    ) -> Result<http::Response<Bytes>, BoxError>;
}

/// Default transport backed by [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wrap a caller-configured reqwest client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn perform(
        &self,
        request: http::Request<Bytes>,
    ) -> Result<http::Response<Bytes>, BoxError> {
        let request = reqwest::Request::try_from(request)?;
        let response = self.client.execute(request).await?;

        let mut builder = http::Response::builder()
            .status(response.status())
            .version(response.version());
        if let Some(headers) = builder.headers_mut() {
            *headers = response.headers().clone();
        }
        let body = response.bytes().await?;

        Ok(builder.body(body)?)
    }
}
