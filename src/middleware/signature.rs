//! Webhook signature verification
//!
//! LINE signs every delivery with `x-line-signature`, the base64 encoded
//! HMAC-SHA256 of the raw request body keyed by the channel secret.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;
use crate::utils::errors::{TodoBuddyError, Result};

pub const SIGNATURE_HEADER: &str = "x-line-signature";

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct SignatureVerifier {
    channel_secret: String,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier").finish_non_exhaustive()
    }
}

impl SignatureVerifier {
    pub fn new(channel_secret: impl Into<String>) -> Self {
        Self { channel_secret: channel_secret.into() }
    }

    /// Signature the platform would send for `body`
    pub fn sign(&self, body: &[u8]) -> Result<String> {
        Ok(STANDARD.encode(self.mac(body)?.finalize().into_bytes()))
    }

    /// Check a delivery's signature in constant time
    pub fn verify(&self, body: &[u8], signature: &str) -> Result<()> {
        let expected = STANDARD.decode(signature.trim()).map_err(|_| {
            warn!("Webhook signature is not valid base64");
            TodoBuddyError::Authentication("malformed signature".to_string())
        })?;

        self.mac(body)?.verify_slice(&expected).map_err(|_| {
            warn!(body_len = body.len(), "Webhook signature mismatch");
            TodoBuddyError::Authentication("signature mismatch".to_string())
        })
    }

    fn mac(&self, body: &[u8]) -> Result<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(self.channel_secret.as_bytes())
            .map_err(|e| TodoBuddyError::Config(format!("Unusable channel secret: {}", e)))?;
        mac.update(body);
        Ok(mac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_known_signature() {
        let verifier = SignatureVerifier::new("secret");
        let body = br#"{"events":[]}"#;
        let signature = "pkK1lVPJPiJ+wPLziRD79xIxohl8AImYM8AEeM7IbzQ=";

        assert_eq!(verifier.sign(body).unwrap(), signature);
        assert!(verifier.verify(body, signature).is_ok());
    }

    #[test]
    fn test_tampered_body_is_rejected() {
        let verifier = SignatureVerifier::new("secret");
        let signature = verifier.sign(br#"{"events":[]}"#).unwrap();

        assert_matches!(
            verifier.verify(br#"{"events":[{}]}"#, &signature),
            Err(TodoBuddyError::Authentication(_))
        );
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let body = br#"{"events":[]}"#;
        let signature = SignatureVerifier::new("other").sign(body).unwrap();

        assert!(SignatureVerifier::new("secret").verify(body, &signature).is_err());
    }

    #[test]
    fn test_garbage_signature_is_rejected() {
        let verifier = SignatureVerifier::new("secret");
        assert_matches!(verifier.verify(b"{}", "%%%"), Err(TodoBuddyError::Authentication(_)));
        assert_matches!(verifier.verify(b"{}", ""), Err(TodoBuddyError::Authentication(_)));
    }
}
