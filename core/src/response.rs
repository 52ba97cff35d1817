//! Response abstraction: raw transport responses and their wrappers.

use crate::{Error, Result};
use bytes::Bytes;
use http::StatusCode;
use serde_json::Value;
use std::fmt::Debug;

/// ReadBody is the one-shot byte stream behind a raw response.
///
/// Streams are not assumed re-readable: a drained body yields empty bytes on
/// any further read, like a file handle at EOF. Wrappers are expected to read
/// at most once and cache.
#[async_trait::async_trait]
pub trait ReadBody: Debug + Send + 'static {
    /// Read the remaining body to completion.
    async fn read_all(&mut self) -> Result<Bytes>;
}

/// In-memory body, used by buffering transports and tests.
#[derive(Debug, Default)]
pub struct StaticBody(Option<Bytes>);

impl StaticBody {
    /// Create a body over the given bytes.
    pub fn new(content: impl Into<Bytes>) -> Self {
        Self(Some(content.into()))
    }
}

#[async_trait::async_trait]
impl ReadBody for StaticBody {
    async fn read_all(&mut self) -> Result<Bytes> {
        Ok(self.0.take().unwrap_or_default())
    }
}

/// Opaque response handle returned by the transport.
///
/// Created once per call by the transport and consumed exactly once by the
/// response wrapper. Protocol errors (4xx/5xx) arrive through this same type;
/// only transport faults are reported as errors.
#[derive(Debug)]
pub struct RawResponse {
    status: StatusCode,
    body: Box<dyn ReadBody>,
}

impl RawResponse {
    /// Create a raw response from a status code and a body stream.
    pub fn new(status: StatusCode, body: impl ReadBody) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }

    /// HTTP status of this response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Drain the body stream. A second read yields empty bytes.
    pub async fn read(&mut self) -> Result<Bytes> {
        self.body.read_all().await
    }
}

/// Uniform accessor surface for responses handed back to the caller.
///
/// This replaces duck-typed attribute access with an explicit interface:
/// status inspection via [`code`](ResponseView::code) and
/// [`is_success`](ResponseView::is_success), raw content via
/// [`content`](ResponseView::content), and structured access via
/// [`decoded`](ResponseView::decoded).
#[async_trait::async_trait]
pub trait ResponseView: Debug + Send {
    /// Numeric HTTP status code.
    fn code(&self) -> u16;

    /// True iff the status is in the 2xx class.
    ///
    /// Per RFC 2616 a 2xx code indicates the request was successfully
    /// received, understood, and accepted. 1xx and 3xx do not count.
    fn is_success(&self) -> bool {
        self.code() / 100 == 2
    }

    /// Raw response content.
    ///
    /// Wrappers read the underlying stream at most once and serve later
    /// calls from a per-instance cache.
    async fn content(&mut self) -> Result<Bytes>;

    /// Structured view of the content.
    ///
    /// Wrappers that do not decode return a `DecodeFailed` error when called.
    async fn decoded(&mut self) -> Result<&Value> {
        Err(Error::decode_failed(
            "decoding not supported: this wrapper does not decode content",
        ))
    }
}

#[async_trait::async_trait]
impl ResponseView for RawResponse {
    fn code(&self) -> u16 {
        self.status.as_u16()
    }

    async fn content(&mut self) -> Result<Bytes> {
        self.read().await
    }
}

/// Thin wrapper around a raw transport response.
///
/// Adds content caching on top of [`RawResponse`]: the body stream is read on
/// first access and memoized for the lifetime of the wrapper.
#[derive(Debug)]
pub struct BaseResponse {
    raw: RawResponse,
    content: Option<Bytes>,
}

impl BaseResponse {
    /// Wrap a raw response.
    pub fn new(raw: RawResponse) -> Self {
        Self { raw, content: None }
    }
}

#[async_trait::async_trait]
impl ResponseView for BaseResponse {
    fn code(&self) -> u16 {
        self.raw.status().as_u16()
    }

    async fn content(&mut self) -> Result<Bytes> {
        match &self.content {
            Some(content) => Ok(content.clone()),
            None => {
                let content = self.raw.read().await?;
                self.content = Some(content.clone());
                Ok(content)
            }
        }
    }
}

/// Wrapper that decodes the content as JSON on first access.
///
/// The parsed value is decoded at most once and cached. A parse failure
/// surfaces as a `DecodeFailed` error at the point of access; it is never
/// replaced with an empty structure.
#[derive(Debug)]
pub struct JsonResponse {
    inner: BaseResponse,
    decoded: Option<Value>,
}

impl JsonResponse {
    /// Wrap a raw response.
    pub fn new(raw: RawResponse) -> Self {
        Self {
            inner: BaseResponse::new(raw),
            decoded: None,
        }
    }
}

#[async_trait::async_trait]
impl ResponseView for JsonResponse {
    fn code(&self) -> u16 {
        self.inner.code()
    }

    async fn content(&mut self) -> Result<Bytes> {
        self.inner.content().await
    }

    async fn decoded(&mut self) -> Result<&Value> {
        if self.decoded.is_none() {
            let content = self.inner.content().await?;
            let value = serde_json::from_slice(&content).map_err(|e| {
                Error::decode_failed("response content is not valid JSON").with_source(e)
            })?;
            self.decoded = Some(value);
        }
        Ok(self.decoded.as_ref().expect("decoded value must be set"))
    }
}

/// WrapResponse decides how a raw response is presented to the caller.
///
/// The pipeline resolves the wrapper once per call, first match wins: the
/// wrapper bound to the endpoint declaration, then the client-level default,
/// then the raw response itself unwrapped.
pub trait WrapResponse: Debug + Send + Sync + 'static {
    /// Wrap the raw response.
    fn wrap(&self, raw: RawResponse) -> Box<dyn ResponseView>;
}

/// Wraps responses in [`BaseResponse`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WrapBase;

impl WrapResponse for WrapBase {
    fn wrap(&self, raw: RawResponse) -> Box<dyn ResponseView> {
        Box::new(BaseResponse::new(raw))
    }
}

/// Wraps responses in [`JsonResponse`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WrapJson;

impl WrapResponse for WrapJson {
    fn wrap(&self, raw: RawResponse) -> Box<dyn ResponseView> {
        Box::new(JsonResponse::new(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use test_case::test_case;

    /// Body stub that counts how often the stream is read.
    #[derive(Debug)]
    struct CountingBody {
        content: Bytes,
        reads: Arc<AtomicUsize>,
    }

    impl CountingBody {
        fn new(content: &'static str) -> (Self, Arc<AtomicUsize>) {
            let reads = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    content: Bytes::from_static(content.as_bytes()),
                    reads: reads.clone(),
                },
                reads,
            )
        }
    }

    #[async_trait::async_trait]
    impl ReadBody for CountingBody {
        async fn read_all(&mut self) -> Result<Bytes> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(std::mem::take(&mut self.content))
        }
    }

    fn raw(status: u16, content: &'static str) -> RawResponse {
        RawResponse::new(
            StatusCode::from_u16(status).unwrap(),
            StaticBody::new(content),
        )
    }

    #[test_case(200, true)]
    #[test_case(204, true)]
    #[test_case(299, true)]
    #[test_case(199, false)]
    #[test_case(301, false)]
    #[test_case(400, false)]
    #[test_case(500, false)]
    fn test_is_success(status: u16, expected: bool) {
        let response = BaseResponse::new(raw(status, ""));
        assert_eq!(response.is_success(), expected);
        assert_eq!(response.code(), status);
    }

    #[tokio::test]
    async fn test_content_returned() {
        let mut response = BaseResponse::new(raw(200, "This is my content"));
        assert_eq!(response.content().await.unwrap(), "This is my content");
    }

    #[tokio::test]
    async fn test_content_reads_stream_once() {
        let (body, reads) = CountingBody::new("This is my content");
        let mut response = BaseResponse::new(RawResponse::new(StatusCode::OK, body));

        let first = response.content().await.unwrap();
        let second = response.content().await.unwrap();

        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(first, "This is my content");
    }

    #[tokio::test]
    async fn test_json_decoded_and_cached() {
        let (body, reads) = CountingBody::new(r#"{"color": "red", "value": 3}"#);
        let mut response = JsonResponse::new(RawResponse::new(StatusCode::OK, body));

        let value = response.decoded().await.unwrap();
        assert_eq!(value["color"], "red");
        assert_eq!(value["value"], 3);

        // Second access is served from the cache: the stream stays drained
        // exactly once and the parsed value is identical.
        let value = response.decoded().await.unwrap().clone();
        assert_eq!(value["color"], "red");
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_json_decode_failure_surfaces() {
        let mut response = JsonResponse::new(raw(200, "not json at all"));
        let err = response.decoded().await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::DecodeFailed);
    }

    #[tokio::test]
    async fn test_base_wrapper_does_not_decode() {
        let mut response = BaseResponse::new(raw(200, r#"{"fine": "json"}"#));
        let err = response.decoded().await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::DecodeFailed);
    }

    #[tokio::test]
    async fn test_raw_passthrough_one_shot_body() {
        let mut response = raw(200, "payload");
        assert_eq!(ResponseView::content(&mut response).await.unwrap(), "payload");
        // Raw responses do not cache: the drained stream yields empty bytes.
        assert_eq!(ResponseView::content(&mut response).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_protocol_error_is_ordinary_data() {
        let mut response = JsonResponse::new(raw(403, r#"{"detail": "Permission Denied"}"#));
        assert!(!response.is_success());
        assert_eq!(response.code(), 403);
        assert_eq!(
            response.decoded().await.unwrap()["detail"],
            "Permission Denied"
        );
    }
}
