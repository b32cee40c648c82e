//! Envelope assembly, DEFLATE framing, and sign/verify orchestration
//! (component E).

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::error::CryptoError;
use crate::signing::{EnvelopeSigner, EnvelopeVerifier};

/// The only envelope version this implementation understands.
pub const CURRENT_VERSION: u8 = 1;

const HEADER_LEN: usize = 1 + 1 + 4;
const SIGNATURE_LEN: usize = 64;

/// The envelope record: version tag, format tag, canonical payload bytes,
/// and the Ed25519 signature over `[version][format][payload]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEnvelope {
    pub version: u8,
    pub format: u8,
    pub payload: Vec<u8>,
    pub signature: [u8; SIGNATURE_LEN],
}

/// Builds the exact byte string that gets signed: `version || format || payload`.
pub fn signing_message(version: u8, format: u8, payload: &[u8]) -> Vec<u8> {
    let mut msg = Vec::with_capacity(2 + payload.len());
    msg.push(version);
    msg.push(format);
    msg.extend_from_slice(payload);
    msg
}

/// Serializes an envelope to its uncompressed wire layout:
/// `[version:1][format:1][len(payload):4 BE][payload][signature:64]`.
pub fn assemble(envelope: &RawEnvelope) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + envelope.payload.len() + SIGNATURE_LEN);
    out.push(envelope.version);
    out.push(envelope.format);
    out.extend_from_slice(&(envelope.payload.len() as u32).to_be_bytes());
    out.extend_from_slice(&envelope.payload);
    out.extend_from_slice(&envelope.signature);
    out
}

/// Parses the uncompressed wire layout back into a [`RawEnvelope`]. Does
/// not check the version against [`CURRENT_VERSION`]; callers that care use
/// [`open_envelope`].
pub fn parse(bytes: &[u8]) -> Result<RawEnvelope, CryptoError> {
    if bytes.len() < HEADER_LEN + SIGNATURE_LEN {
        return Err(CryptoError::CorruptEnvelope("envelope too short".into()));
    }
    let version = bytes[0];
    let format = bytes[1];
    let payload_len = u32::from_be_bytes(bytes[2..6].try_into().unwrap()) as usize;
    if bytes.len() != HEADER_LEN + payload_len + SIGNATURE_LEN {
        return Err(CryptoError::CorruptEnvelope(
            "payload length field does not match envelope size".into(),
        ));
    }
    let payload = bytes[HEADER_LEN..HEADER_LEN + payload_len].to_vec();
    let mut signature = [0_u8; SIGNATURE_LEN];
    signature.copy_from_slice(&bytes[HEADER_LEN + payload_len..]);
    Ok(RawEnvelope {
        version,
        format,
        payload,
        signature,
    })
}

/// DEFLATE-compresses bytes for embedding.
pub fn compress(bytes: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .map_err(|e| CryptoError::CorruptEnvelope(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| CryptoError::CorruptEnvelope(e.to_string()))
}

/// DEFLATE-decompresses bytes extracted from a carrier.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut decoder = DeflateDecoder::new(bytes);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| CryptoError::CorruptEnvelope(e.to_string()))?;
    Ok(out)
}

/// Signs `payload` under `format` with `signer` and returns the final
/// DEFLATE-compressed bytes ready to hand to the selector codec.
pub fn build_envelope(
    format: u8,
    payload: &[u8],
    signer: &dyn EnvelopeSigner,
) -> Result<Vec<u8>, CryptoError> {
    let message = signing_message(CURRENT_VERSION, format, payload);
    let signature = signer.sign(&message)?;
    let raw = RawEnvelope {
        version: CURRENT_VERSION,
        format,
        payload: payload.to_vec(),
        signature,
    };
    compress(&assemble(&raw))
}

/// Decompresses and parses envelope bytes, checking the version is
/// supported. Does not check the signature — that is a separate step so
/// callers can distinguish [`CryptoError::CorruptEnvelope`] /
/// [`CryptoError::UnsupportedVersion`] from a signature failure.
pub fn open_envelope(bytes: &[u8]) -> Result<RawEnvelope, CryptoError> {
    let decompressed = decompress(bytes)?;
    let raw = parse(&decompressed)?;
    if raw.version != CURRENT_VERSION {
        return Err(CryptoError::UnsupportedVersion(raw.version));
    }
    Ok(raw)
}

/// Verifies an already-parsed envelope's signature against `pubkey`.
pub fn verify_signature(
    raw: &RawEnvelope,
    pubkey: [u8; 32],
    verifier: &dyn EnvelopeVerifier,
) -> Result<bool, CryptoError> {
    let message = signing_message(raw.version, raw.format, &raw.payload);
    verifier.verify(pubkey, &message, raw.signature)
}
