//! Parser configuration.

use serde::{Deserialize, Serialize};

/// What to do with a depth-0 line that has content but no `:`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BareLinePolicy {
    /// Fail with a structural error.
    #[default]
    Reject,
    /// Keep the trimmed line as a key with an empty value.
    ///
    /// Indented lines that have no owning record are dropped.
    Tolerate,
}

/// How far a failure inside a `card` or `keyword` record reaches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordErrorPolicy {
    /// Drop the failing record, log it, and keep decoding its siblings.
    #[default]
    Skip,
    /// Abort the whole decode.
    Propagate,
}

/// Parser configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Maximum nesting depth below the root block.
    /// Deeper input fails with a structural error instead of recursing.
    pub max_depth: usize,

    /// Handling of depth-0 lines without a separator.
    pub bare_lines: BareLinePolicy,

    /// Scope of failures inside `card` and `keyword` records.
    pub record_errors: RecordErrorPolicy,

    /// Titles whose value is always kept as raw text, even when it is
    /// indented like a block (script bodies are full of colons).
    pub verbatim_titles: Vec<String>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            bare_lines: BareLinePolicy::Reject,
            record_errors: RecordErrorPolicy::Skip,
            verbatim_titles: vec!["script".to_string(), "init script".to_string()],
        }
    }
}

impl ParseConfig {
    /// Set the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the bare line policy.
    #[must_use]
    pub fn with_bare_lines(mut self, policy: BareLinePolicy) -> Self {
        self.bare_lines = policy;
        self
    }

    /// Set the record failure policy.
    #[must_use]
    pub fn with_record_errors(mut self, policy: RecordErrorPolicy) -> Self {
        self.record_errors = policy;
        self
    }

    /// Add a title whose value is kept verbatim.
    #[must_use]
    pub fn with_verbatim_title(mut self, title: impl Into<String>) -> Self {
        self.verbatim_titles.push(title.into());
        self
    }

    /// Every value is decoded structurally; no verbatim titles.
    #[must_use]
    pub fn without_verbatim_titles(mut self) -> Self {
        self.verbatim_titles.clear();
        self
    }

    /// Reject malformed lines and let any record failure abort the decode.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
            .with_bare_lines(BareLinePolicy::Reject)
            .with_record_errors(RecordErrorPolicy::Propagate)
    }

    /// Tolerate malformed lines and skip failing records.
    #[must_use]
    pub fn lenient() -> Self {
        Self::default()
            .with_bare_lines(BareLinePolicy::Tolerate)
            .with_record_errors(RecordErrorPolicy::Skip)
    }

    pub(crate) fn is_verbatim(&self, title: &str) -> bool {
        self.verbatim_titles.iter().any(|t| t == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParseConfig::default();
        assert_eq!(config.max_depth, 32);
        assert_eq!(config.bare_lines, BareLinePolicy::Reject);
        assert_eq!(config.record_errors, RecordErrorPolicy::Skip);
        assert!(config.is_verbatim("init script"));
        assert!(!config.is_verbatim("styling"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ParseConfig::default()
            .with_max_depth(4)
            .with_bare_lines(BareLinePolicy::Tolerate)
            .without_verbatim_titles()
            .with_verbatim_title("rule text");

        assert_eq!(config.max_depth, 4);
        assert_eq!(config.bare_lines, BareLinePolicy::Tolerate);
        assert_eq!(config.verbatim_titles, vec!["rule text".to_string()]);
    }

    #[test]
    fn test_presets() {
        assert_eq!(ParseConfig::strict().record_errors, RecordErrorPolicy::Propagate);
        assert_eq!(ParseConfig::lenient().bare_lines, BareLinePolicy::Tolerate);
    }

    #[test]
    fn test_serialization() {
        let config = ParseConfig::lenient().with_max_depth(8);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ParseConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
