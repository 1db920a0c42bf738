//! Handle Interaction Use Case

use std::sync::Arc;

use crate::application::ports::SignatureVerifier;
use crate::domain::interaction::{Interaction, InteractionResponse};

/// Interaction rejection. Both variants render as plain text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    /// Missing headers, no configured key, or a bad signature.
    #[error("Bad request signature")]
    BadSignature,

    /// Verified, but not a PING (or not JSON).
    #[error("Unknown interaction type")]
    UnknownType,
}

/// Verifies and answers inbound interactions.
pub struct HandleInteractionUseCase {
    verifier: Option<Arc<dyn SignatureVerifier>>,
}

impl HandleInteractionUseCase {
    /// `verifier` is `None` when no public key is configured; every request
    /// is then rejected.
    pub fn new(verifier: Option<Arc<dyn SignatureVerifier>>) -> Self {
        Self { verifier }
    }

    /// Verify the signature, then answer PING with PONG.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::BadSignature`] before the body is parsed,
    /// and [`InteractionError::UnknownType`] for anything that is not a PING.
    pub fn execute(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
    ) -> Result<InteractionResponse, InteractionError> {
        let (Some(verifier), Some(signature), Some(timestamp)) =
            (self.verifier.as_ref(), signature, timestamp)
        else {
            return Err(InteractionError::BadSignature);
        };

        if let Err(e) = verifier.verify(signature, timestamp, body) {
            tracing::warn!(error = %e, "Rejected interaction signature");
            return Err(InteractionError::BadSignature);
        }

        match serde_json::from_slice::<Interaction>(body) {
            Ok(interaction) if interaction.is_ping() => Ok(InteractionResponse::pong()),
            Ok(interaction) => {
                tracing::debug!(kind = interaction.kind, "Unhandled interaction type");
                Err(InteractionError::UnknownType)
            }
            Err(_) => Err(InteractionError::UnknownType),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SignatureError;

    struct FixedVerifier(bool);

    impl SignatureVerifier for FixedVerifier {
        fn verify(&self, _: &str, _: &str, _: &[u8]) -> Result<(), SignatureError> {
            if self.0 {
                Ok(())
            } else {
                Err(SignatureError::Mismatch)
            }
        }
    }

    fn use_case(valid: bool) -> HandleInteractionUseCase {
        HandleInteractionUseCase::new(Some(Arc::new(FixedVerifier(valid))))
    }

    #[test]
    fn ping_gets_pong() {
        let response = use_case(true)
            .execute(Some("sig"), Some("1"), br#"{"type":1}"#)
            .unwrap();
        assert_eq!(response, InteractionResponse::pong());
    }

    #[test]
    fn bad_signature_rejected_before_parsing() {
        let err = use_case(false)
            .execute(Some("sig"), Some("1"), b"not json")
            .unwrap_err();
        assert_eq!(err, InteractionError::BadSignature);
    }

    #[test]
    fn missing_headers_rejected() {
        assert_eq!(
            use_case(true).execute(None, Some("1"), b"{}").unwrap_err(),
            InteractionError::BadSignature
        );
        assert_eq!(
            use_case(true).execute(Some("sig"), None, b"{}").unwrap_err(),
            InteractionError::BadSignature
        );
    }

    #[test]
    fn unconfigured_key_rejects_everything() {
        let err = HandleInteractionUseCase::new(None)
            .execute(Some("sig"), Some("1"), br#"{"type":1}"#)
            .unwrap_err();
        assert_eq!(err, InteractionError::BadSignature);
    }

    #[test]
    fn non_ping_is_unknown() {
        let err = use_case(true)
            .execute(Some("sig"), Some("1"), br#"{"type":2}"#)
            .unwrap_err();
        assert_eq!(err, InteractionError::UnknownType);

        let err = use_case(true)
            .execute(Some("sig"), Some("1"), b"{broken")
            .unwrap_err();
        assert_eq!(err, InteractionError::UnknownType);
    }
}
