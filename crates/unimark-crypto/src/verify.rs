//! The full extract → decompress → parse → resolve → verify pipeline
//! (component E's verification state machine, §4.5).

use unimark_payload::{Metadata, PayloadError};

use crate::envelope::{open_envelope, verify_signature};
use crate::error::CryptoError;
use crate::signing::EnvelopeVerifier;

/// The specific reason a verification attempt did not reach `Verified`.
/// Mirrors the state machine transitions in §4.5: any of them can shunt to
/// `Failed(kind)` instead of advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyFailureKind {
    /// DEFLATE or structural parse failure while opening the envelope.
    CorruptEnvelope,
    /// Envelope version byte is not supported.
    UnsupportedVersion,
    /// Canonical payload lacked a `signer_id`.
    MissingSignerId,
    /// `resolver(signer_id)` returned `None`.
    UnknownSigner,
    /// Ed25519 signature check failed.
    BadSignature,
}

/// `resolver(signer_id) -> public_key | none`, injected by the caller.
/// Implemented for any `Fn(&str) -> Option<[u8; 32]>` closure.
pub trait SignerResolver {
    fn resolve(&self, signer_id: &str) -> Option<[u8; 32]>;
}

impl<F> SignerResolver for F
where
    F: Fn(&str) -> Option<[u8; 32]>,
{
    fn resolve(&self, signer_id: &str) -> Option<[u8; 32]> {
        self(signer_id)
    }
}

/// Runs the full verification pipeline over embedded envelope bytes
/// (already extracted from the carrier by the codec).
///
/// `Ok` carries the parsed metadata; the signer_id has been resolved and
/// the signature checked. `Err` never panics or propagates a lower-level
/// error type — every failure collapses to one [`VerifyFailureKind`].
pub fn verify_envelope(
    envelope_bytes: &[u8],
    resolver: &dyn SignerResolver,
    verifier: &dyn EnvelopeVerifier,
) -> Result<Metadata, VerifyFailureKind> {
    let raw = open_envelope(envelope_bytes).map_err(|e| match e {
        CryptoError::UnsupportedVersion(v) => {
            let _ = v;
            VerifyFailureKind::UnsupportedVersion
        }
        _ => VerifyFailureKind::CorruptEnvelope,
    })?;

    let signer_id = Metadata::peek_signer_id(&raw.payload).map_err(|e| match e {
        PayloadError::MissingSignerId => VerifyFailureKind::MissingSignerId,
        _ => VerifyFailureKind::CorruptEnvelope,
    })?;

    let pubkey = resolver
        .resolve(&signer_id)
        .ok_or(VerifyFailureKind::UnknownSigner)?;

    let signature_ok =
        verify_signature(&raw, pubkey, verifier).map_err(|_| VerifyFailureKind::BadSignature)?;
    if !signature_ok {
        return Err(VerifyFailureKind::BadSignature);
    }

    Metadata::from_canonical(raw.format, &raw.payload).map_err(|_| VerifyFailureKind::CorruptEnvelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::build_envelope;
    use crate::signing::{Ed25519EnvelopeSigner, Ed25519EnvelopeVerifier};
    use unimark_payload::BasicPayload;
    use serde_json::{json, Map};

    fn sample_metadata() -> Metadata {
        Metadata::Basic(BasicPayload {
            signer_id: "k1".into(),
            timestamp: json!(1714832824),
            model_id: Some("gpt-4".into()),
            generation_id: None,
            custom: Map::new(),
        })
    }

    #[test]
    fn full_pipeline_verifies_a_correctly_signed_envelope() {
        let signer = Ed25519EnvelopeSigner::from_secret([0x42; 32]);
        let metadata = sample_metadata();
        let payload_bytes = metadata.canonicalize().unwrap();
        let envelope_bytes = build_envelope(metadata.format_tag(), &payload_bytes, &signer).unwrap();

        let pubkey = signer.public_key();
        let resolver = move |id: &str| if id == "k1" { Some(pubkey) } else { None };
        let verifier = Ed25519EnvelopeVerifier;

        let verified = verify_envelope(&envelope_bytes, &resolver, &verifier).unwrap();
        assert_eq!(verified, metadata);
    }

    #[test]
    fn unknown_signer_is_reported_distinctly() {
        let signer = Ed25519EnvelopeSigner::from_secret([0x11; 32]);
        let metadata = sample_metadata();
        let payload_bytes = metadata.canonicalize().unwrap();
        let envelope_bytes = build_envelope(metadata.format_tag(), &payload_bytes, &signer).unwrap();

        let resolver = |_: &str| None;
        let verifier = Ed25519EnvelopeVerifier;

        let err = verify_envelope(&envelope_bytes, &resolver, &verifier).unwrap_err();
        assert_eq!(err, VerifyFailureKind::UnknownSigner);
    }

    #[test]
    fn bad_signature_is_reported_when_resolver_returns_the_wrong_key() {
        let signer = Ed25519EnvelopeSigner::from_secret([0x11; 32]);
        let metadata = sample_metadata();
        let payload_bytes = metadata.canonicalize().unwrap();
        let envelope_bytes = build_envelope(metadata.format_tag(), &payload_bytes, &signer).unwrap();

        let wrong_pubkey = Ed25519EnvelopeSigner::from_secret([0x22; 32]).public_key();
        let resolver = move |_: &str| Some(wrong_pubkey);
        let verifier = Ed25519EnvelopeVerifier;

        let err = verify_envelope(&envelope_bytes, &resolver, &verifier).unwrap_err();
        assert_eq!(err, VerifyFailureKind::BadSignature);
    }

    #[test]
    fn corrupt_envelope_bytes_are_reported_without_panicking() {
        let resolver = |_: &str| None;
        let verifier = Ed25519EnvelopeVerifier;
        let err = verify_envelope(b"not an envelope", &resolver, &verifier).unwrap_err();
        assert_eq!(err, VerifyFailureKind::CorruptEnvelope);
    }

    #[test]
    fn a_payload_that_is_not_json_at_all_is_reported_as_corrupt_not_missing_signer() {
        let signer = Ed25519EnvelopeSigner::from_secret([0x33; 32]);
        let envelope_bytes = build_envelope(0, b"not json at all", &signer).unwrap();

        let resolver = |_: &str| None;
        let verifier = Ed25519EnvelopeVerifier;

        let err = verify_envelope(&envelope_bytes, &resolver, &verifier).unwrap_err();
        assert_eq!(err, VerifyFailureKind::CorruptEnvelope);
    }

    #[test]
    fn valid_json_missing_signer_id_is_reported_distinctly_from_corrupt() {
        let signer = Ed25519EnvelopeSigner::from_secret([0x44; 32]);
        let payload_bytes = serde_json::to_vec(&json!({"timestamp": "2024-05-04T14:27:04Z"})).unwrap();
        let envelope_bytes = build_envelope(0, &payload_bytes, &signer).unwrap();

        let resolver = |_: &str| None;
        let verifier = Ed25519EnvelopeVerifier;

        let err = verify_envelope(&envelope_bytes, &resolver, &verifier).unwrap_err();
        assert_eq!(err, VerifyFailureKind::MissingSignerId);
    }
}
