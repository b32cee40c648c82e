use thiserror::Error;

/// Errors raised while building or canonicalizing a metadata payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// `signer_id` or `timestamp` was absent.
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),
    /// A `custom`/`custom_claims` key shadowed a reserved top-level name.
    #[error("custom field {0:?} collides with a reserved field name")]
    FieldCollision(String),
    /// The envelope's canonical payload lacked a `signer_id` on parse.
    #[error("envelope payload has no signer_id")]
    MissingSignerId,
    /// Canonical payload bytes did not parse as a well-formed payload.
    #[error("corrupt payload: {0}")]
    CorruptPayload(String),
    /// A `timestamp` field was neither a number nor a valid ISO-8601 string.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
