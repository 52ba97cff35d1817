//! Signing subsystem: canonical URL and payload construction plus the
//! external signing boundary.

use crate::hash::base64url_hmac_sha256;
use crate::utils::Redact;
use crate::{Error, PreparedRequest, Result};
use log::debug;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Query parameter carrying the public client identifier.
pub const CLIENT_ID_PARAM: &str = "ClientId";

/// Query parameter carrying the request signature. Always appended last.
pub const SIGNATURE_PARAM: &str = "Signature";

/// Canonical payload view of a request body: every key maps to the ordered
/// list of its values, even for single occurrences.
pub type Payload = Vec<(String, Vec<String>)>;

/// SignPayload computes a signature over a canonical URL and payload.
///
/// This is the external signing boundary: the pipeline treats it as an opaque
/// deterministic function of its three inputs. The same key, URL and payload
/// must always produce the same signature string, so an independent verifier
/// can recompute it.
pub trait SignPayload: Debug + Send + Sync + 'static {
    /// Compute the signature string.
    fn sign_payload(
        &self,
        key: &[u8],
        canonical_url: &str,
        payload: Option<&Payload>,
    ) -> Result<String>;
}

/// Secret key material handed to the signing primitive.
///
/// Used only as signer input, never transmitted. `Debug` output is redacted.
#[derive(Clone, Default)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Create a signing key from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for SigningKey {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for SigningKey {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let hex = hex::encode(&self.0);
        f.debug_tuple("SigningKey")
            .field(&Redact::from(&hex))
            .finish()
    }
}

/// Signer appends the client identifier and request signature to a prepared
/// request.
///
/// Signing always operates on the fully-built [`PreparedRequest`], never on
/// raw caller parameters, and runs strictly as the last step before dispatch:
/// `ClientId` is inserted first, then the signature over the resulting URL and
/// payload is appended as the final query parameter. Reordering either step
/// would invalidate the signature.
#[derive(Debug, Clone)]
pub struct Signer {
    client_id: String,
    key: SigningKey,
    algo: Arc<dyn SignPayload>,
}

impl Signer {
    /// Create a signer from a client identifier, a key and a signing
    /// primitive.
    pub fn new(client_id: impl Into<String>, key: SigningKey, algo: impl SignPayload) -> Self {
        Self {
            client_id: client_id.into(),
            key,
            algo: Arc::new(algo),
        }
    }

    /// The public client identifier embedded in signed URLs.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Sign the prepared request in place.
    ///
    /// The body, when present, is reparsed into the key to list-of-values
    /// mapping the primitive expects; an absent body signs as a null payload,
    /// never as an empty mapping.
    pub fn sign(&self, req: &mut PreparedRequest) -> Result<()> {
        req.append_query(CLIENT_ID_PARAM, &self.client_id);

        let payload = req.body.as_deref().map(parse_payload).transpose()?;
        let signature = self
            .algo
            .sign_payload(self.key.as_bytes(), &req.url, payload.as_ref())?;
        debug!("signed request for client {}: {}", self.client_id, req.url);

        req.append_query(SIGNATURE_PARAM, &signature);
        Ok(())
    }
}

/// Reparse a form-encoded body into the canonical payload mapping.
///
/// Every value becomes a one-or-more-element list; repeated keys extend the
/// existing list in occurrence order. A body that is not `key=value` encoded
/// (the signing path does not support binary or multipart payloads) is a
/// `PayloadUnsupported` error.
pub fn parse_payload(body: &str) -> Result<Payload> {
    for segment in body.split('&') {
        if !segment.contains('=') {
            return Err(Error::payload_unsupported(format!(
                "request body is not key=value encoded near {segment:?}"
            )));
        }
    }

    let mut payload: Payload = Vec::new();
    for (key, value) in form_urlencoded::parse(body.as_bytes()) {
        match payload.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value.into_owned()),
            None => payload.push((key.into_owned(), vec![value.into_owned()])),
        }
    }
    Ok(payload)
}

/// Default signing primitive: HMAC-SHA256 with URL-safe base64 output.
///
/// The signed content is the canonical URL followed by the payload re-encoded
/// with keys sorted (a key's values keep their occurrence order). A null
/// payload signs the canonical URL alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256;

impl SignPayload for HmacSha256 {
    fn sign_payload(
        &self,
        key: &[u8],
        canonical_url: &str,
        payload: Option<&Payload>,
    ) -> Result<String> {
        let mut content = canonical_url.to_string();
        if let Some(payload) = payload {
            content.push_str(&canonical_payload(payload));
        }
        Ok(base64url_hmac_sha256(key, content.as_bytes()))
    }
}

fn canonical_payload(payload: &Payload) -> String {
    let mut pairs: Vec<&(String, Vec<String>)> = payload.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in pairs {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}
