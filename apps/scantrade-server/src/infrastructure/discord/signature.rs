//! Ed25519 request-signature verification for Discord interactions.

use ed25519_dalek::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH, Signature, Verifier, VerifyingKey};

use crate::application::ports::{SignatureError, SignatureVerifier};

/// Invalid public key.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid Ed25519 public key: {0}")]
pub struct PublicKeyError(String);

/// Verifies signatures over `timestamp ‖ body` with a fixed public key.
#[derive(Debug, Clone)]
pub struct Ed25519Verifier {
    key: VerifyingKey,
}

impl Ed25519Verifier {
    /// Build from a 64-character hex public key.
    ///
    /// # Errors
    ///
    /// Returns [`PublicKeyError`] if the key is not valid hex, has the wrong
    /// length, or is not a valid curve point.
    pub fn from_hex(public_key: &str) -> Result<Self, PublicKeyError> {
        let bytes = hex::decode(public_key.trim()).map_err(|e| PublicKeyError(e.to_string()))?;
        let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes
            .try_into()
            .map_err(|_| PublicKeyError(format!("expected {PUBLIC_KEY_LENGTH} bytes")))?;
        let key = VerifyingKey::from_bytes(&bytes).map_err(|e| PublicKeyError(e.to_string()))?;
        Ok(Self { key })
    }
}

impl SignatureVerifier for Ed25519Verifier {
    fn verify(
        &self,
        signature: &str,
        timestamp: &str,
        body: &[u8],
    ) -> Result<(), SignatureError> {
        let raw = hex::decode(signature.trim()).map_err(|_| SignatureError::Malformed)?;
        let raw: [u8; SIGNATURE_LENGTH] =
            raw.try_into().map_err(|_| SignatureError::Malformed)?;
        let signature = Signature::from_bytes(&raw);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key
            .verify(&message, &signature)
            .map_err(|_| SignatureError::Mismatch)
    }
}
