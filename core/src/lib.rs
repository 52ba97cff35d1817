//! Core components for declaring API calls.
//!
//! This crate turns "this operation produces a mapping of parameters" into a
//! fully-formed HTTP request, optionally signs it, dispatches it through a
//! pluggable transport, and hands back a typed, lazily-decoded response
//! wrapper.
//!
//! ## Overview
//!
//! The pipeline is built from a few small pieces:
//!
//! - **[`Params`]**: insertion-ordered request parameters and the query
//!   encoder
//! - **[`Endpoint`]**: immutable declaration of one call site (path, method,
//!   timeout, wrapper override)
//! - **[`Context`]**: container for the transport capability ([`HttpOpen`])
//! - **[`Signer`]**: appends `ClientId` and `Signature` to a fully-built
//!   request, delegating the signature itself to a [`SignPayload`] primitive
//! - **[`Client`]**: the facade composing all of the above, with a
//!   declarative surface ([`Client::invoke`]) and an imperative one
//!   ([`Client::fetch`])
//! - **[`ResponseView`]** and its wrappers ([`BaseResponse`],
//!   [`JsonResponse`]): status classification plus lazily-cached content and
//!   decoding
//!
//! ## Example
//!
//! ```no_run
//! use apidecl_core::{Client, Context, Endpoint, Params, Signer, SigningKey, HmacSha256, WrapJson};
//! use std::time::Duration;
//!
//! # async fn example() -> apidecl_core::Result<()> {
//! // Wire in a transport, e.g. ReqwestHttpOpen from apidecl-http-open-reqwest.
//! let ctx = Context::new();
//!
//! let client = Client::new(ctx, "http://www.example.com")
//!     .with_default_wrapper(WrapJson)
//!     .with_signer(Signer::new(
//!         "my-client-id",
//!         SigningKey::from("my-secret-key"),
//!         HmacSha256,
//!     ));
//!
//! // Declarative: the endpoint is declared once, the operation produces the
//! // data per call.
//! let do_multiple = Endpoint::get("/do-multiple/").with_timeout(Duration::from_secs(3));
//! let mut response = client
//!     .invoke(&do_multiple, || Params::new().with("times", vec![5, 3]))
//!     .await?;
//!
//! assert!(response.is_success());
//! println!("{}", response.decoded().await?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error model
//!
//! Protocol errors are data: a 4xx/5xx response flows through the same
//! wrapper resolution as a success, and callers inspect
//! [`ResponseView::is_success`]. Transport faults (connect, DNS, timeout) are
//! failures and propagate as [`Error`] with kind
//! [`ErrorKind::TransportFailed`]. Decode faults surface lazily, at the point
//! [`ResponseView::decoded`] is called.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod params;
pub use params::{ParamValue, Params};
mod request;
pub use request::PreparedRequest;
mod endpoint;
pub use endpoint::Endpoint;
mod response;
pub use response::{
    BaseResponse, JsonResponse, RawResponse, ReadBody, ResponseView, StaticBody, WrapBase,
    WrapJson, WrapResponse,
};
mod transport;
pub use transport::HttpOpen;
mod context;
pub use context::{Context, NoopHttpOpen};
mod sign;
pub use sign::{
    parse_payload, HmacSha256, Payload, SignPayload, Signer, SigningKey, CLIENT_ID_PARAM,
    SIGNATURE_PARAM,
};
mod client;
pub use client::Client;

// HTTP vocabulary types used across the public API.
pub use http::{Method, StatusCode};
