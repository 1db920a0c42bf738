//! Signature Verifier Port (Driven Port)
//!
//! Validates inbound interaction requests before any payload is trusted.

/// Signature verification failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// Signature header is not valid hex or has the wrong length.
    #[error("Malformed signature")]
    Malformed,

    /// Signature does not match the message.
    #[error("Signature mismatch")]
    Mismatch,
}

/// Port for request-signature checks.
pub trait SignatureVerifier: Send + Sync {
    /// Verify `signature` over `timestamp ‖ body`.
    fn verify(&self, signature: &str, timestamp: &str, body: &[u8])
    -> Result<(), SignatureError>;
}
