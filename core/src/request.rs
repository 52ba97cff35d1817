use http::Method;

/// A fully-built request, ready for signing and dispatch.
///
/// Exactly one of the URL query string and the body carries the encoded
/// parameters, never both: GET folds them into the URL, POST carries them in
/// the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: Method,
    /// Target URL, including the query string for GET requests with data.
    pub url: String,
    /// Form-encoded body, present only for POST requests with data.
    pub body: Option<String>,
}

impl PreparedRequest {
    /// Create a prepared request without a body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    /// Append one query parameter to the URL, joining with `&` when a query
    /// string is already present and `?` otherwise.
    ///
    /// The signer relies on this to insert `ClientId` and `Signature`; the
    /// value is appended verbatim.
    pub fn append_query(&mut self, key: &str, value: &str) {
        self.url
            .push(if self.url.contains('?') { '&' } else { '?' });
        self.url.push_str(key);
        self.url.push('=');
        self.url.push_str(value);
    }
}
