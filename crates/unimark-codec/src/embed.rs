//! Selector interleaving and extraction (component C).

use unimark_core::{byte_to_selector, is_selector, selector_to_byte};

use crate::error::CodecError;
use crate::target::{carrier_has_selectors, find_targets, TargetMode};

/// Embeds `payload` into `carrier` at positions chosen by `mode`.
///
/// When `distribute` is `true`, payload bytes are spread evenly across every
/// eligible target (`⌊k·|targets|/|payload|⌋`, matching [`distribute_indices`]);
/// when `false`, the first `payload.len()` targets in order are used. Fails
/// with [`CodecError::CarrierHasSelectors`] if `carrier` already carries
/// selectors, or [`CodecError::InsufficientTargets`] if there are fewer
/// eligible targets than payload bytes.
pub fn embed_bytes(
    carrier: &str,
    payload: &[u8],
    mode: TargetMode,
    distribute: bool,
) -> Result<String, CodecError> {
    if carrier_has_selectors(carrier) {
        return Err(CodecError::CarrierHasSelectors);
    }

    let targets = find_targets(carrier, mode, None);
    if targets.len() < payload.len() {
        return Err(CodecError::InsufficientTargets {
            needed: payload.len(),
            available: targets.len(),
        });
    }

    let chosen: Vec<usize> = if distribute {
        distribute_indices(payload.len(), targets.len())
            .into_iter()
            .map(|i| targets[i])
            .collect()
    } else {
        targets[..payload.len()].to_vec()
    };

    Ok(embed_at_targets(carrier, &chosen, payload))
}

/// Computes, for a payload of `len` bytes spread across `available` targets,
/// the target index that should host byte `k`: `⌊k·available/len⌋`.
pub fn distribute_indices(len: usize, available: usize) -> Vec<usize> {
    (0..len).map(|k| k * available / len).collect()
}

/// Writes each `payload[k]` as a selector immediately after the scalar at
/// `target_positions[k]`, for every `k`. `target_positions` must be sorted
/// ascending and have at least `payload.len()` entries; only the first
/// `payload.len()` are used.
///
/// This is the low-level primitive the streaming embedder also uses, since
/// it operates on a caller-supplied target list rather than rescanning.
pub fn embed_at_targets(text: &str, target_positions: &[usize], payload: &[u8]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + payload.len() * 4);

    let mut next_byte = 0usize;
    for (i, &c) in chars.iter().enumerate() {
        out.push(c);
        if next_byte < payload.len() && target_positions.get(next_byte) == Some(&i) {
            out.push(byte_to_selector(payload[next_byte]));
            next_byte += 1;
        }
    }

    out
}

/// Extracts every embedded payload byte from `text`, in the order the
/// corresponding selectors appear. Never fails: text with no selectors
/// yields an empty vector.
pub fn extract_bytes(text: &str) -> Vec<u8> {
    text.chars().filter_map(selector_to_byte).collect()
}

/// Strips every variation selector out of `text`, recovering the original
/// carrier exactly as it was before embedding.
pub fn strip_selectors(text: &str) -> String {
    text.chars().filter(|&c| !is_selector(c)).collect()
}
