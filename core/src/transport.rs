use crate::{PreparedRequest, RawResponse, Result};
use std::fmt::Debug;
use std::time::Duration;

/// HttpOpen is used to perform the HTTP exchange for a prepared request.
///
/// This is the transport boundary of the pipeline: implementations own the
/// socket/TLS layer, connection reuse and DNS. The pipeline dispatches each
/// call exactly once through this trait and never retries.
///
/// ## Error contract
///
/// Protocol errors are data, transport errors are failures:
///
/// - a response with any HTTP status, 4xx/5xx included, must come back as an
///   ordinary [`RawResponse`] so it can flow through wrapper resolution;
/// - only transport faults (connection refused, DNS failure, timeout) may be
///   returned as `Err`, and they propagate to the caller as fatal.
#[async_trait::async_trait]
pub trait HttpOpen: Debug + Send + Sync + 'static {
    /// Dispatch the prepared request, bounded by the timeout when given.
    async fn open(&self, req: PreparedRequest, timeout: Option<Duration>) -> Result<RawResponse>;
}
