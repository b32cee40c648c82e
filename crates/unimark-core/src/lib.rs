//! Variation-selector byte codec shared across the `unimark` crates.
//!
//! Defines the bijection between a byte `0..=255` and one of the 256 Unicode
//! variation selector code points. This is the innermost primitive: every
//! higher layer (target scanning, embedding, the envelope codec) builds on
//! top of [`byte_to_selector`] and [`selector_to_byte`] without knowing
//! anything about carrier text, targets, or signatures.

pub mod selector;

pub use selector::{byte_to_selector, is_selector, selector_to_byte};
