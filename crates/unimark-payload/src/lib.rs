//! Metadata payload types and deterministic canonical serialization
//! (component D).

pub mod error;
pub mod payload;
pub mod timestamp;

pub use error::PayloadError;
pub use payload::{
    BasicPayload, ManifestPayload, Metadata, BASIC_RESERVED_FIELDS, MANIFEST_RESERVED_FIELDS,
};
pub use timestamp::normalize_timestamp;
