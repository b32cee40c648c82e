//! Envelope assembly, DEFLATE framing, and Ed25519 signing/verification
//! (component E).

pub mod envelope;
pub mod error;
pub mod signing;
pub mod verify;

pub use envelope::{
    assemble, build_envelope, compress, decompress, open_envelope, parse, signing_message,
    verify_signature, RawEnvelope, CURRENT_VERSION,
};
pub use error::CryptoError;
pub use signing::{Ed25519EnvelopeSigner, Ed25519EnvelopeVerifier, EnvelopeSigner, EnvelopeVerifier};
pub use verify::{verify_envelope, SignerResolver, VerifyFailureKind};
