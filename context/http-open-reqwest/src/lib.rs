//! Reqwest-backed transport for apidecl.
//!
//! [`ReqwestHttpOpen`] implements the [`HttpOpen`] capability over a shared
//! [`reqwest::Client`]. Responses with any HTTP status come back as ordinary
//! raw responses; only transport faults (connect, DNS, timeout) surface as
//! errors, which is exactly the contract the pipeline expects.

use apidecl_core::{Error, HttpOpen, PreparedRequest, RawResponse, ReadBody, Result};
use async_trait::async_trait;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// ReqwestHttpOpen dispatches prepared requests over a reqwest client.
///
/// The client is shared, so connection reuse is reqwest's concern, not the
/// pipeline's.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpOpen {
    client: Client,
}

impl ReqwestHttpOpen {
    /// Create a new ReqwestHttpOpen with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpOpen for ReqwestHttpOpen {
    async fn open(&self, req: PreparedRequest, timeout: Option<Duration>) -> Result<RawResponse> {
        let mut builder = self.client.request(req.method, &req.url);

        if let Some(body) = req.body {
            builder = builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                Error::request_invalid(format!("request to {} could not be built", req.url))
                    .with_source(e)
            } else if e.is_timeout() {
                Error::transport_failed(format!("request to {} timed out", req.url)).with_source(e)
            } else {
                Error::transport_failed(format!("request to {} failed", req.url)).with_source(e)
            }
        })?;

        let status = response.status();
        Ok(RawResponse::new(status, ReqwestBody(Some(response))))
    }
}

/// Body handle that defers reading until the response wrapper asks for
/// content. A drained handle yields empty bytes.
#[derive(Debug)]
struct ReqwestBody(Option<reqwest::Response>);

#[async_trait]
impl ReadBody for ReqwestBody {
    async fn read_all(&mut self) -> Result<Bytes> {
        match self.0.take() {
            Some(response) => response.bytes().await.map_err(|e| {
                Error::transport_failed("reading response body failed").with_source(e)
            }),
            None => Ok(Bytes::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_body_read_once_then_empty() {
        let response = reqwest::Response::from(
            http::Response::builder()
                .status(200)
                .body("This is my content".to_string())
                .unwrap(),
        );

        let mut body = ReqwestBody(Some(response));
        assert_eq!(body.read_all().await.unwrap(), "This is my content");
        assert_eq!(body.read_all().await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_protocol_error_is_a_response() {
        let response = reqwest::Response::from(
            http::Response::builder()
                .status(500)
                .body("boom".to_string())
                .unwrap(),
        );

        // A 5xx stays a response: status is data for the wrapper layer.
        let mut raw = RawResponse::new(response.status(), ReqwestBody(Some(response)));
        assert_eq!(raw.status().as_u16(), 500);
        assert_eq!(raw.read().await.unwrap(), "boom");
    }
}
