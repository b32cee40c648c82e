use thiserror::Error;

use unimark_codec::CodecError;
use unimark_crypto::CryptoError;
use unimark_payload::PayloadError;

/// Top-level error for embedding-time contract violations and stream-session
/// misuse. Verification-class failures do not use this type — see
/// [`crate::VerifyOutcome`], which never raises.
#[derive(Debug, Error)]
pub enum UnimarkError {
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    /// `process_chunk` was called after the session had already finalized.
    #[error("stream session already finalized")]
    AlreadyFinalized,
}
