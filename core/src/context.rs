use crate::{Error, HttpOpen, PreparedRequest, RawResponse, Result};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// Context carries the transport capability used to dispatch requests.
///
/// ## Important
///
/// apidecl provides NO default transport in the core crate. An unconfigured
/// context uses a no-op implementation that returns errors when called; wire
/// one in with [`with_http_open`](Context::with_http_open) (for example the
/// reqwest transport from `apidecl-http-open-reqwest`).
///
/// ## Example
///
/// ```ignore
/// use apidecl_core::Context;
/// use apidecl_http_open_reqwest::ReqwestHttpOpen;
///
/// let ctx = Context::new().with_http_open(ReqwestHttpOpen::default());
/// ```
#[derive(Clone)]
pub struct Context {
    http: Arc<dyn HttpOpen>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("http", &self.http).finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with a no-op transport.
    pub fn new() -> Self {
        Self {
            http: Arc::new(NoopHttpOpen),
        }
    }

    /// Replace the transport implementation.
    pub fn with_http_open(mut self, http: impl HttpOpen) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Dispatch a prepared request through the configured transport.
    #[inline]
    pub async fn http_open(
        &self,
        req: PreparedRequest,
        timeout: Option<Duration>,
    ) -> Result<RawResponse> {
        self.http.open(req, timeout).await
    }
}

/// NoopHttpOpen is a no-op implementation that always returns an error.
///
/// This is used when no transport is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpOpen;

#[async_trait::async_trait]
impl HttpOpen for NoopHttpOpen {
    async fn open(
        &self,
        _req: PreparedRequest,
        _timeout: Option<Duration>,
    ) -> Result<RawResponse> {
        Err(Error::unexpected(
            "HTTP dispatch not supported: no transport configured",
        ))
    }
}
