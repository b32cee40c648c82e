//! Streaming state machine (component G): a chunked analogue of [`crate::embed`]
//! with buffering and target accounting.
//!
//! Sessions are caller-owned: a [`StreamSession`] has no registry entry and
//! no `stream_id` lookup. Its lifetime is exactly the lifetime of the
//! handle the caller holds, eliminating the `UnknownStream` error class and
//! any registry-eviction concern for ordinary use.

use unimark_codec::{
    carrier_has_selectors, embed_at_targets, find_targets, settled_targets, CodecError, TargetMode,
};
use unimark_crypto::{build_envelope, EnvelopeSigner};
use unimark_payload::Metadata;

use crate::error::UnimarkError;

/// A snapshot of a [`StreamSession`]'s bookkeeping, returned by
/// [`StreamSession::info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    pub target_mode: TargetMode,
    pub first_only: bool,
    pub emitted: usize,
    pub drained: bool,
    /// Set once [`StreamSession::finalize`] had to flush a buffer that
    /// still held envelope bytes unembedded. A caller may still have a
    /// well-formed prefix; this is a warning, not a failure.
    pub incomplete_embed: bool,
}

/// Chunked, stateful counterpart to [`crate::embed`]. See the module docs
/// for ownership; see [`StreamSession::process_chunk`] for the per-chunk
/// contract.
#[derive(Debug)]
pub struct StreamSession {
    envelope_bytes: Vec<u8>,
    target_mode: TargetMode,
    first_only: bool,
    buffer: String,
    emitted: usize,
    drained: bool,
    incomplete_embed: bool,
    finalized: bool,
    last_emitted_char: Option<char>,
}

impl StreamSession {
    /// Canonicalizes and signs `metadata` up front, then opens a session
    /// ready to accept chunks.
    pub fn init(
        metadata: &Metadata,
        target_mode: TargetMode,
        first_only: bool,
        signer: &dyn EnvelopeSigner,
    ) -> Result<Self, UnimarkError> {
        let payload_bytes = metadata.canonicalize()?;
        let envelope_bytes = build_envelope(metadata.format_tag(), &payload_bytes, signer)?;
        tracing::debug!(
            envelope_bytes = envelope_bytes.len(),
            target_mode = target_mode.as_str(),
            first_only,
            "opened streaming session"
        );
        Ok(Self {
            envelope_bytes,
            target_mode,
            first_only,
            buffer: String::new(),
            emitted: 0,
            drained: false,
            incomplete_embed: false,
            finalized: false,
            last_emitted_char: None,
        })
    }

    /// Feeds one chunk of carrier text through the session.
    ///
    /// `is_first` is accepted for symmetry with `is_last` but is purely
    /// advisory: it has no effect on correctness or output. `is_last` is
    /// advisory-with-teeth: setting it forces the same flush
    /// [`StreamSession::finalize`] would perform, after which the session
    /// is finalized and any further call returns [`UnimarkError::AlreadyFinalized`].
    ///
    /// Fails with [`UnimarkError::Codec`]`(`[`CodecError::CarrierHasSelectors`]`)`
    /// the first time `chunk` contains a pre-existing variation selector, the
    /// same rejection one-shot [`crate::embed`] applies to the whole carrier
    /// up front.
    pub fn process_chunk(
        &mut self,
        chunk: &str,
        is_first: bool,
        is_last: bool,
    ) -> Result<String, UnimarkError> {
        let _ = is_first;
        if self.finalized {
            return Err(UnimarkError::AlreadyFinalized);
        }

        if carrier_has_selectors(chunk) {
            return Err(UnimarkError::Codec(CodecError::CarrierHasSelectors));
        }

        if self.drained {
            let out = chunk.to_string();
            if is_last {
                self.finalized = true;
            }
            return Ok(out);
        }

        self.buffer.push_str(chunk);
        let mut out = self.advance(is_last);

        if is_last {
            out.push_str(&self.flush_if_incomplete());
            self.finalized = true;
        }
        Ok(out)
    }

    /// Flushes any remaining buffered text. If the envelope was not fully
    /// embedded yet, emits the buffer unmodified and sets
    /// [`StreamInfo::incomplete_embed`] — this never fails, since a caller
    /// may still have a well-formed signed prefix.
    pub fn finalize(&mut self) -> Result<String, UnimarkError> {
        if self.finalized {
            return Err(UnimarkError::AlreadyFinalized);
        }
        let mut out = if self.drained {
            String::new()
        } else {
            self.advance(true)
        };
        out.push_str(&self.flush_if_incomplete());
        self.finalized = true;
        Ok(out)
    }

    /// Debug/monitoring snapshot of this session's bookkeeping.
    pub fn info(&self) -> StreamInfo {
        StreamInfo {
            target_mode: self.target_mode,
            first_only: self.first_only,
            emitted: self.emitted,
            drained: self.drained,
            incomplete_embed: self.incomplete_embed,
        }
    }

    fn flush_if_incomplete(&mut self) -> String {
        if self.drained {
            return String::new();
        }
        tracing::warn!(
            emitted = self.emitted,
            envelope_len = self.envelope_bytes.len(),
            "finalizing stream session with envelope only partially embedded"
        );
        self.incomplete_embed = true;
        self.drained = true;
        std::mem::take(&mut self.buffer)
    }

    /// Runs one round of the algorithm in §4.7 against the current buffer:
    /// completion check, then (if not complete) either a partial emit or a
    /// full retain, depending on `first_only`.
    fn advance(&mut self, is_last: bool) -> String {
        let remaining = self.envelope_bytes.len() - self.emitted;
        if remaining == 0 {
            self.drained = true;
            let out = std::mem::take(&mut self.buffer);
            if let Some(c) = out.chars().last() {
                self.last_emitted_char = Some(c);
            }
            return out;
        }

        let preceding = self.last_emitted_char;
        // At end of stream no more text can arrive, so every target in the
        // buffer is settled; otherwise withhold targets whose eligibility
        // still depends on a character that has not arrived yet.
        let targets = if is_last {
            find_targets(&self.buffer, self.target_mode, preceding)
        } else {
            settled_targets(&self.buffer, self.target_mode, preceding)
        };

        if targets.len() >= remaining {
            let bytes_to_embed = &self.envelope_bytes[self.emitted..];
            let chosen = &targets[..remaining];
            let out = embed_at_targets(&self.buffer, chosen, bytes_to_embed);
            self.emitted = self.envelope_bytes.len();
            self.drained = true;
            self.last_emitted_char = self.buffer.chars().last();
            self.buffer.clear();
            return out;
        }

        if self.first_only || targets.is_empty() {
            return String::new();
        }

        // Partial emit: embed what fits, emit up to the safe boundary
        // (just past the last embedded target), retain the rest.
        let n = targets.len();
        let bytes_to_embed = self.envelope_bytes[self.emitted..self.emitted + n].to_vec();
        let chars: Vec<char> = self.buffer.chars().collect();
        let holdback = if is_last { 0 } else { self.target_mode.lookahead_holdback() };
        let boundary = chars.len().saturating_sub(holdback);

        let emit_text: String = chars[..boundary].iter().collect();
        let retain_text: String = chars[boundary..].iter().collect();

        let out = embed_at_targets(&emit_text, &targets, &bytes_to_embed);
        self.emitted += n;
        if let Some(c) = emit_text.chars().last() {
            self.last_emitted_char = Some(c);
        }
        self.buffer = retain_text;
        out
    }
}
