//! Ed25519 signing/verification backend (component E, sign/verify steps).

use ed25519_dalek::{Signature, Signer as DalekSignerTrait, SigningKey, Verifier as DalekVerifierTrait, VerifyingKey};

use crate::error::CryptoError;

/// Trait for envelope-signing backends. The core is Ed25519-only per the
/// authoritative design; an implementer MAY add another backend as a
/// separate type, but it MUST NOT be accepted by [`crate::envelope::verify_signature`].
pub trait EnvelopeSigner {
    /// Signs `msg` and returns a 64-byte signature.
    fn sign(&self, msg: &[u8]) -> Result<[u8; 64], CryptoError>;
    /// Returns the signer's raw 32-byte public key.
    fn public_key(&self) -> [u8; 32];
}

/// Trait for envelope signature verification backends.
pub trait EnvelopeVerifier {
    /// Verifies a signature against `(pubkey, msg)`. Returns `Ok(false)`
    /// rather than erroring for an ordinary signature mismatch; errors are
    /// reserved for malformed key/signature bytes.
    fn verify(&self, pubkey: [u8; 32], msg: &[u8], sig: [u8; 64]) -> Result<bool, CryptoError>;
}

/// Ed25519 signer backed by `ed25519-dalek`.
#[derive(Debug, Clone)]
pub struct Ed25519EnvelopeSigner {
    signing_key: SigningKey,
}

impl Ed25519EnvelopeSigner {
    /// Creates a signer from a 32-byte secret key.
    pub fn from_secret(secret: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&secret),
        }
    }
}

impl EnvelopeSigner for Ed25519EnvelopeSigner {
    fn sign(&self, msg: &[u8]) -> Result<[u8; 64], CryptoError> {
        Ok(self.signing_key.sign(msg).to_bytes())
    }

    fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }
}

/// Stateless Ed25519 verifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519EnvelopeVerifier;

impl EnvelopeVerifier for Ed25519EnvelopeVerifier {
    fn verify(&self, pubkey: [u8; 32], msg: &[u8], sig: [u8; 64]) -> Result<bool, CryptoError> {
        let verifying_key = VerifyingKey::from_bytes(&pubkey)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        let signature = Signature::from_bytes(&sig);
        Ok(verifying_key.verify(msg, &signature).is_ok())
    }
}
