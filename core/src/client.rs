use crate::{
    Context, Endpoint, Params, RawResponse, ResponseView, Result, Signer, WrapResponse,
};
use http::Method;
use log::debug;
use std::sync::Arc;
use std::time::Duration;

/// Client is the entry point of the pipeline.
///
/// It holds the host-level configuration (base URL, default timeout, default
/// response wrapper, optional signer) and exposes the two equivalent call
/// surfaces:
///
/// - **declarative**: [`invoke`](Client::invoke) takes a declared
///   [`Endpoint`] plus a data-producing operation;
/// - **imperative**: [`fetch`](Client::fetch) takes endpoint path, method and
///   data directly.
///
/// Both run the identical encode, sign and wrapper-resolution pipeline. Each
/// call is a single synchronous unit of work: one request dispatched, one
/// response consumed, no shared state between calls, no retries.
///
/// ```no_run
/// use apidecl_core::{Client, Context, Endpoint, Params, WrapJson};
///
/// # async fn example() -> apidecl_core::Result<()> {
/// let ctx = Context::new(); // wire in a transport, e.g. apidecl-http-open-reqwest
/// let client = Client::new(ctx, "http://www.example.com").with_default_wrapper(WrapJson);
///
/// let endpoint = Endpoint::get("/do-something/");
/// let mut response = client.invoke(&endpoint, || Params::new().with("times", 5)).await?;
/// assert!(response.is_success());
/// println!("{}", response.decoded().await?["result"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    host: String,
    default_timeout: Option<Duration>,
    default_wrapper: Option<Arc<dyn WrapResponse>>,
    signer: Option<Signer>,
}

impl Client {
    /// Create a client for the given host base URL.
    pub fn new(ctx: Context, host: impl Into<String>) -> Self {
        Self {
            ctx,
            host: host.into(),
            default_timeout: None,
            default_wrapper: None,
            signer: None,
        }
    }

    /// Set the default timeout for endpoints that declare none.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Set the default response wrapper.
    ///
    /// Endpoints can override it per declaration; without either, callers get
    /// the raw response passthrough.
    pub fn with_default_wrapper(mut self, wrapper: impl WrapResponse) -> Self {
        self.default_wrapper = Some(Arc::new(wrapper));
        self
    }

    /// Attach a signer. Every request from this client is then signed after
    /// it is fully built and immediately before dispatch.
    pub fn with_signer(mut self, signer: Signer) -> Self {
        self.signer = Some(signer);
        self
    }

    /// The host base URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Declarative surface: run the data-producing operation, then the
    /// pipeline for the declared endpoint.
    pub async fn invoke<F>(&self, endpoint: &Endpoint, produce: F) -> Result<Box<dyn ResponseView>>
    where
        F: FnOnce() -> Params,
    {
        self.execute(endpoint, produce()).await
    }

    /// Imperative surface: call an endpoint path directly with method and
    /// data.
    pub async fn fetch(
        &self,
        path: &str,
        method: Method,
        params: Params,
    ) -> Result<Box<dyn ResponseView>> {
        let endpoint = Endpoint::new(path).with_method(method);
        self.execute(&endpoint, params).await
    }

    /// The shared pipeline: build, sign, dispatch, resolve.
    ///
    /// A signing failure aborts the call before dispatch; a request that was
    /// meant to be signed is never sent unsigned.
    pub async fn execute(&self, endpoint: &Endpoint, params: Params) -> Result<Box<dyn ResponseView>> {
        let mut prepared = endpoint.prepare(&self.host, &params)?;

        if let Some(signer) = &self.signer {
            signer.sign(&mut prepared)?;
        }

        let timeout = endpoint.timeout().or(self.default_timeout);
        debug!("dispatching {} {}", prepared.method, prepared.url);
        let raw = self.ctx.http_open(prepared, timeout).await?;

        Ok(self.resolve(endpoint, raw))
    }

    /// Wrapper resolution, evaluated once per call, first match wins:
    /// endpoint override, then client default, then the raw response itself.
    fn resolve(&self, endpoint: &Endpoint, raw: RawResponse) -> Box<dyn ResponseView> {
        match endpoint.wrapper().or(self.default_wrapper.as_deref()) {
            Some(wrapper) => wrapper.wrap(raw),
            None => Box::new(raw),
        }
    }
}
