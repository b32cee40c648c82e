use unimark_codec::TargetMode;

/// Options controlling where and how envelope bytes are interleaved with a
/// carrier. Shared by the one-shot and streaming embedders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedOptions {
    pub target_mode: TargetMode,
    pub distribute_across_targets: bool,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            target_mode: TargetMode::Whitespace,
            distribute_across_targets: false,
        }
    }
}

impl EmbedOptions {
    /// Starts a fluent builder seeded with the defaults.
    pub fn builder() -> EmbedOptionsBuilder {
        EmbedOptionsBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct EmbedOptionsBuilder {
    opts: EmbedOptions,
}

impl EmbedOptionsBuilder {
    pub fn target_mode(mut self, mode: TargetMode) -> Self {
        self.opts.target_mode = mode;
        self
    }

    pub fn distribute_across_targets(mut self, distribute: bool) -> Self {
        self.opts.distribute_across_targets = distribute;
        self
    }

    pub fn build(self) -> EmbedOptions {
        self.opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_spec_default_mode() {
        let opts = EmbedOptions::default();
        assert_eq!(opts.target_mode, TargetMode::Whitespace);
        assert!(!opts.distribute_across_targets);
    }

    #[test]
    fn builder_overrides_defaults() {
        let opts = EmbedOptions::builder()
            .target_mode(TargetMode::AllCharacters)
            .distribute_across_targets(true)
            .build();
        assert_eq!(opts.target_mode, TargetMode::AllCharacters);
        assert!(opts.distribute_across_targets);
    }
}
