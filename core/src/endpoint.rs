use crate::{Error, Params, PreparedRequest, Result, WrapResponse};
use http::Method;
use std::sync::Arc;
use std::time::Duration;

/// Declarative description of one API call site.
///
/// An `Endpoint` is created once when the call is declared and never mutated
/// afterwards. Pair it with [`Client::invoke`](crate::Client::invoke) and a
/// data-producing operation to get a full API call.
///
/// ```
/// use apidecl_core::Endpoint;
/// use std::time::Duration;
///
/// let endpoint = Endpoint::post("/do-post/").with_timeout(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint {
    path: String,
    method: Method,
    timeout: Option<Duration>,
    wrapper: Option<Arc<dyn WrapResponse>>,
}

impl Endpoint {
    /// Declare an endpoint with the default GET method.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::GET,
            timeout: None,
            wrapper: None,
        }
    }

    /// Declare a GET endpoint.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path)
    }

    /// Declare a POST endpoint.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path).with_method(Method::POST)
    }

    /// Set the HTTP method. Only GET and POST are supported.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the dispatch timeout. Without one, the transport default applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Bind a response wrapper to this endpoint.
    ///
    /// Takes precedence over the client-level default wrapper.
    pub fn with_wrapper(mut self, wrapper: impl WrapResponse) -> Self {
        self.wrapper = Some(Arc::new(wrapper));
        self
    }

    /// URL path of this endpoint.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// HTTP method of this endpoint.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Dispatch timeout, if one was declared.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The wrapper bound to this endpoint, if any.
    pub fn wrapper(&self) -> Option<&dyn WrapResponse> {
        self.wrapper.as_deref()
    }

    /// Build the target URL and body for this endpoint.
    ///
    /// GET requests with data fold the encoded query into the URL; POST
    /// requests carry it as the body. An empty encoding counts as "no query
    /// data": the URL gains no `?` and no body is attached.
    pub fn prepare(&self, host: &str, params: &Params) -> Result<PreparedRequest> {
        if self.method != Method::GET && self.method != Method::POST {
            return Err(Error::config_invalid(format!(
                "method {} is not supported, declare the endpoint as GET or POST",
                self.method
            )));
        }

        let mut url = format!("{}{}", host, self.path);
        let encoded = params.encode();

        let body = if encoded.is_empty() {
            None
        } else if self.method == Method::GET {
            url.push('?');
            url.push_str(&encoded);
            None
        } else {
            Some(encoded)
        };

        Ok(PreparedRequest {
            method: self.method.clone(),
            url,
            body,
        })
    }
}
