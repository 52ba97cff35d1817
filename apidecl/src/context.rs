use apidecl_core::Context;
use apidecl_http_open_reqwest::ReqwestHttpOpen;

/// Create a [`Context`] wired to a shared reqwest transport.
///
/// This is the ready-made setup for the common case; use
/// [`Context::with_http_open`] directly to bring your own transport.
pub fn default_context() -> Context {
    Context::new().with_http_open(ReqwestHttpOpen::default())
}
