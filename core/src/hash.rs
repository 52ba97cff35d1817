//! Hash related utils.

use base64::prelude::BASE64_URL_SAFE;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;

/// URL-safe base64 encode.
pub fn base64url_encode(content: &[u8]) -> String {
    BASE64_URL_SAFE.encode(content)
}

/// HMAC with SHA256 hash.
pub fn hmac_sha256(key: &[u8], content: &[u8]) -> Vec<u8> {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    h.finalize().into_bytes().to_vec()
}

/// URL-safe base64 encoded HMAC with SHA256 hash.
///
/// Use this function instead of `base64url_encode(&hmac_sha256(key, content))`
/// can reduce extra copy.
pub fn base64url_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    base64url_encode(&h.finalize().into_bytes())
}
