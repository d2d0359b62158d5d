//! Stateless reveal tokens.
//!
//! A token is the URL-safe, unpadded base64 encoding of the JSON form of a
//! [`RevealRecord`]. It carries no server-side state; holding the token is
//! what grants access to the single pairing inside it.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::draw::RevealRecord;

/// Encode `record` into a token safe to embed in a URL path segment.
pub fn encode(record: &RevealRecord) -> String {
  // Serialising two owned strings cannot fail.
  let json = serde_json::to_vec(record).unwrap_or_default();
  URL_SAFE_NO_PAD.encode(json)
}

/// Decode a token produced by [`encode`].
///
/// Total over all inputs: anything malformed, truncated, padded, or not a
/// record yields `None`.
pub fn decode(token: &str) -> Option<RevealRecord> {
  let bytes = URL_SAFE_NO_PAD.decode(token).ok()?;
  serde_json::from_slice(&bytes).ok()
}
