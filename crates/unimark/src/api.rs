//! High-level one-shot embed/extract/verify (component F).

use unimark_codec::embed_bytes;
use unimark_crypto::{
    build_envelope, decompress, parse as parse_envelope, verify_envelope, Ed25519EnvelopeVerifier,
    EnvelopeSigner, SignerResolver, VerifyFailureKind,
};
use unimark_payload::Metadata;

use crate::error::UnimarkError;
use crate::options::EmbedOptions;

/// The outcome of [`verify`]: never raises for verification-class failures,
/// per §7's policy — callers inspect `verified` and `failure_kind` instead
/// of matching on a `Result`.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyOutcome {
    pub verified: bool,
    pub metadata: Option<Metadata>,
    pub failure_kind: Option<VerifyFailureKind>,
}

/// Canonicalizes and signs `metadata`, then embeds the resulting envelope
/// into `carrier` at positions chosen by `options`.
pub fn embed(
    carrier: &str,
    metadata: &Metadata,
    signer: &dyn EnvelopeSigner,
    options: EmbedOptions,
) -> Result<String, UnimarkError> {
    let payload_bytes = metadata.canonicalize()?;
    let envelope_bytes = build_envelope(metadata.format_tag(), &payload_bytes, signer)?;
    let marked = embed_bytes(
        carrier,
        &envelope_bytes,
        options.target_mode,
        options.distribute_across_targets,
    )?;
    tracing::debug!(
        carrier_chars = carrier.chars().count(),
        envelope_bytes = envelope_bytes.len(),
        target_mode = options.target_mode.as_str(),
        "embedded envelope into carrier"
    );
    Ok(marked)
}

/// Recovers the metadata from `text` without checking the signature.
///
/// This is explicitly a *lossy diagnostic*: malformed, unsigned, or absent
/// embedded data all collapse to `None`. Never use this for a trust
/// decision — use [`verify`].
pub fn extract(text: &str) -> Option<Metadata> {
    let envelope_bytes = unimark_codec::extract_bytes(text);
    if envelope_bytes.is_empty() {
        return None;
    }
    let decompressed = decompress(&envelope_bytes).ok()?;
    let raw = parse_envelope(&decompressed).ok()?;
    Metadata::from_canonical(raw.format, &raw.payload).ok()
}

/// Runs the full §4.5 verification pipeline: extract, decompress, parse,
/// resolve `signer_id` through `resolver`, then check the Ed25519
/// signature. Never raises — failures are reported through
/// [`VerifyOutcome::failure_kind`].
pub fn verify(text: &str, resolver: &dyn SignerResolver) -> VerifyOutcome {
    let envelope_bytes = unimark_codec::extract_bytes(text);
    if envelope_bytes.is_empty() {
        tracing::warn!("verify called on text with no embedded selectors");
        return VerifyOutcome {
            verified: false,
            metadata: None,
            failure_kind: Some(VerifyFailureKind::CorruptEnvelope),
        };
    }

    let verifier = Ed25519EnvelopeVerifier;
    match verify_envelope(&envelope_bytes, resolver, &verifier) {
        Ok(metadata) => {
            tracing::debug!("envelope verified");
            VerifyOutcome {
                verified: true,
                metadata: Some(metadata),
                failure_kind: None,
            }
        }
        Err(kind) => {
            tracing::warn!(?kind, "envelope verification failed");
            VerifyOutcome {
                verified: false,
                metadata: None,
                failure_kind: Some(kind),
            }
        }
    }
}
