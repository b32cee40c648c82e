use thiserror::Error;

/// Errors returned by target-scanning and embed/extract operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Carrier has fewer eligible target positions than bytes to embed.
    #[error("insufficient targets: need {needed}, carrier has {available}")]
    InsufficientTargets { needed: usize, available: usize },
    /// `target` string did not name a recognized [`crate::target::TargetMode`].
    #[error("invalid target mode: {0:?}")]
    InvalidTargetMode(String),
    /// Carrier already contains variation selector characters.
    #[error("carrier already contains variation selectors")]
    CarrierHasSelectors,
}
