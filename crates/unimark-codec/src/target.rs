//! Target locator (component B): which carrier positions may host a selector.

use std::str::FromStr;
use unicode_general_category::{get_general_category, GeneralCategory};
use unimark_core::is_selector;

use crate::error::CodecError;

/// Policy selecting which carrier characters are eligible targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetMode {
    /// Any Unicode whitespace scalar.
    Whitespace,
    /// Any scalar in Unicode general category `P*`.
    Punctuation,
    /// An alphabetic scalar whose predecessor is absent or non-alphabetic.
    FirstLetter,
    /// An alphabetic scalar whose successor is absent or non-alphabetic.
    LastLetter,
    /// Every scalar that is not itself a variation selector.
    AllCharacters,
    /// No eligible positions. Diagnostic only.
    None,
}

impl FromStr for TargetMode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whitespace" => Ok(Self::Whitespace),
            "punctuation" => Ok(Self::Punctuation),
            "first_letter" => Ok(Self::FirstLetter),
            "last_letter" => Ok(Self::LastLetter),
            "all_characters" => Ok(Self::AllCharacters),
            "none" => Ok(Self::None),
            other => Err(CodecError::InvalidTargetMode(other.to_string())),
        }
    }
}

impl TargetMode {
    /// Wire/config name of this mode, the inverse of [`TargetMode::from_str`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Punctuation => "punctuation",
            Self::FirstLetter => "first_letter",
            Self::LastLetter => "last_letter",
            Self::AllCharacters => "all_characters",
            Self::None => "none",
        }
    }

    /// How many trailing scalars of a growing buffer cannot yet be classified
    /// because their eligibility depends on a successor scalar that may not
    /// have arrived. Only [`TargetMode::LastLetter`] has this dependency;
    /// every other mode classifies a scalar using only itself and/or its
    /// predecessor, both of which are already known once buffered.
    pub(crate) fn lookahead_holdback(self) -> usize {
        match self {
            Self::LastLetter => 1,
            _ => 0,
        }
    }
}

fn is_unicode_whitespace(c: char) -> bool {
    c.is_whitespace()
}

fn is_punctuation(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

/// Finds eligible target positions in `text`, as zero-based Unicode scalar
/// indices in strictly ascending order.
///
/// `preceding` is the scalar that immediately precedes `text` in the logical
/// carrier, if any — it matters only for [`TargetMode::FirstLetter`], and
/// lets a streaming caller scan a buffer that does not start at the
/// beginning of the carrier without losing that context. One-shot callers
/// pass `None`.
pub fn find_targets(text: &str, mode: TargetMode, preceding: Option<char>) -> Vec<usize> {
    if mode == TargetMode::None {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut targets = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        if is_selector(c) {
            continue;
        }
        let eligible = match mode {
            TargetMode::Whitespace => is_unicode_whitespace(c),
            TargetMode::Punctuation => is_punctuation(c),
            TargetMode::AllCharacters => true,
            TargetMode::FirstLetter => {
                let prev = if i == 0 { preceding } else { Some(chars[i - 1]) };
                c.is_alphabetic() && !prev.is_some_and(char::is_alphabetic)
            }
            TargetMode::LastLetter => {
                let next = chars.get(i + 1).copied();
                c.is_alphabetic() && !next.is_some_and(char::is_alphabetic)
            }
            TargetMode::None => unreachable!("handled above"),
        };
        if eligible {
            targets.push(i);
        }
    }

    targets
}

/// Drops targets near the end of `text` whose eligibility could still change
/// once more text is appended (see [`TargetMode::lookahead_holdback`]).
/// Used only by the streaming embedder; one-shot embedding always scans a
/// complete, final carrier and has no unsettled tail.
pub fn settled_targets(text: &str, mode: TargetMode, preceding: Option<char>) -> Vec<usize> {
    let holdback = mode.lookahead_holdback();
    if holdback == 0 {
        return find_targets(text, mode, preceding);
    }
    let boundary = text.chars().count().saturating_sub(holdback);
    find_targets(text, mode, preceding)
        .into_iter()
        .filter(|&i| i < boundary)
        .collect()
}

/// Returns whether any scalar in `text` is a variation selector.
pub fn carrier_has_selectors(text: &str) -> bool {
    text.chars().any(is_selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_mode_finds_every_space() {
        let targets = find_targets("Hello world. Foo bar.", TargetMode::Whitespace, None);
        // Indices of the two spaces: "Hello[5] world.[12] Foo[16] bar."
        assert_eq!(targets, vec![5, 12, 16]);
    }

    #[test]
    fn punctuation_mode_finds_periods() {
        let targets = find_targets("Hi. Bye.", TargetMode::Punctuation, None);
        assert_eq!(targets, vec![2, 7]);
    }

    #[test]
    fn first_letter_mode_finds_word_starts() {
        let targets = find_targets("ab cd", TargetMode::FirstLetter, None);
        assert_eq!(targets, vec![0, 3]);
    }

    #[test]
    fn last_letter_mode_finds_word_ends() {
        let targets = find_targets("ab cd", TargetMode::LastLetter, None);
        assert_eq!(targets, vec![1, 4]);
    }

    #[test]
    fn all_characters_mode_finds_everything_but_selectors() {
        let text = format!("a{}b", unimark_core::byte_to_selector(3));
        let targets = find_targets(&text, TargetMode::AllCharacters, None);
        assert_eq!(targets, vec![0, 2]);
    }

    #[test]
    fn none_mode_is_always_empty() {
        assert!(find_targets("anything at all!", TargetMode::None, None).is_empty());
    }

    #[test]
    fn existing_selectors_are_never_targets() {
        let text = format!("a {} b", unimark_core::byte_to_selector(9));
        let targets = find_targets(&text, TargetMode::Whitespace, None);
        // Only the two real spaces, not the selector character itself.
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn first_letter_respects_preceding_context_across_a_boundary() {
        // Without context, 'c' looks like a word start.
        let no_ctx = find_targets("cd", TargetMode::FirstLetter, None);
        assert_eq!(no_ctx, vec![0]);
        // With an alphabetic predecessor from a previous chunk, it is not.
        let with_ctx = find_targets("cd", TargetMode::FirstLetter, Some('b'));
        assert!(with_ctx.is_empty());
    }

    #[test]
    fn settled_targets_drops_unsettled_tail_for_last_letter() {
        let full = find_targets("ab", TargetMode::LastLetter, None);
        assert_eq!(full, vec![1]);
        // The trailing 'b' might not actually end a word once more text
        // arrives, so a streaming scan must withhold it.
        let settled = settled_targets("ab", TargetMode::LastLetter, None);
        assert!(settled.is_empty());
    }

    #[test]
    fn settled_targets_is_unchanged_for_non_lookahead_modes() {
        let settled = settled_targets("Hello world", TargetMode::Whitespace, None);
        let full = find_targets("Hello world", TargetMode::Whitespace, None);
        assert_eq!(settled, full);
    }

    #[test]
    fn mode_round_trips_through_str() {
        for mode in [
            TargetMode::Whitespace,
            TargetMode::Punctuation,
            TargetMode::FirstLetter,
            TargetMode::LastLetter,
            TargetMode::AllCharacters,
            TargetMode::None,
        ] {
            assert_eq!(mode.as_str().parse::<TargetMode>().unwrap(), mode);
        }
    }

    #[test]
    fn unrecognized_mode_string_is_rejected() {
        assert!("diagonal".parse::<TargetMode>().is_err());
    }

    #[test]
    fn carrier_has_selectors_detects_presence() {
        assert!(!carrier_has_selectors("plain text"));
        let text = format!("x{}", unimark_core::byte_to_selector(0));
        assert!(carrier_has_selectors(&text));
    }
}
