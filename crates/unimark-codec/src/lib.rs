//! Target scanning and selector interleaving over carrier text (components B
//! and C). Built directly on [`unimark_core`]'s byte/selector bijection.

pub mod embed;
pub mod error;
pub mod target;

pub use embed::{distribute_indices, embed_at_targets, embed_bytes, extract_bytes, strip_selectors};
pub use error::CodecError;
pub use target::{carrier_has_selectors, find_targets, settled_targets, TargetMode};
