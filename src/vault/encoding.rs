//! Reversible at-rest encoding for stored secrets.
//!
//! Secrets are kept in the `credentials` table as standard base64 of
//! their UTF-8 bytes. This only keeps plaintext out of the column; it is
//! keyless and provides no confidentiality.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::{Zeroize, Zeroizing};

/// Encode a plaintext secret into its stored token.
pub fn encode_secret(plaintext: &str) -> String {
    BASE64.encode(plaintext.as_bytes())
}

/// Decode a stored token back to the plaintext secret.
///
/// Returns a description of the failure if the token is not base64 or
/// does not hold UTF-8.
pub fn decode_secret(token: &str) -> std::result::Result<Zeroizing<String>, String> {
    let bytes = BASE64
        .decode(token)
        .map_err(|e| format!("invalid base64: {e}"))?;

    String::from_utf8(bytes).map(Zeroizing::new).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        "secret is not valid UTF-8".to_string()
    })
}
