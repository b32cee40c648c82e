//! Invisible, signed, tamper-evident metadata watermarking for plain text,
//! via Unicode variation selectors.
//!
//! Glues the lower layers together: [`unimark_core`] (byte ⇄ selector
//! bijection), [`unimark_codec`] (target locating and interleaving),
//! [`unimark_payload`] (canonical metadata serialization), and
//! [`unimark_crypto`] (Ed25519 envelope signing/verification). [`embed`],
//! [`extract`], and [`verify`] are the one-shot API; [`StreamSession`] is
//! the chunked analogue.

pub mod api;
pub mod error;
pub mod options;
pub mod stream;

pub use api::{embed, extract, verify, VerifyOutcome};
pub use error::UnimarkError;
pub use options::{EmbedOptions, EmbedOptionsBuilder};
pub use stream::{StreamInfo, StreamSession};

pub use unimark_codec::TargetMode;
pub use unimark_crypto::{Ed25519EnvelopeSigner, Ed25519EnvelopeVerifier, SignerResolver, VerifyFailureKind};
pub use unimark_payload::{BasicPayload, ManifestPayload, Metadata};
