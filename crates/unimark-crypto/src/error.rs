use thiserror::Error;

/// Errors returned by envelope assembly, signing, and verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The underlying Ed25519 primitive rejected the signing inputs.
    #[error("signing failed: {0}")]
    SigningFailed(String),
    /// DEFLATE decompression or envelope header parsing failed.
    #[error("corrupt envelope: {0}")]
    CorruptEnvelope(String),
    /// Envelope `version` byte is not one this implementation understands.
    #[error("unsupported envelope version {0}")]
    UnsupportedVersion(u8),
    /// Ed25519 signature check failed.
    #[error("bad signature")]
    BadSignature,
}
