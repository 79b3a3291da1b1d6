//! Error types for text decoding and package loading.
//!
//! Decoding errors come in two kinds:
//!
//! - **Structural**: the text does not have the shape of a record set
//!   (a depth-0 line without `:`, an indented line with no owner,
//!   nesting deeper than the configured maximum).
//! - **Format**: a value tagged as a fixed type (a color literal, a card
//!   timestamp) does not match its literal grammar.
//!
//! Missing or mismatched fields are never errors; lookups return `None`.

use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Coarse classification of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text is not shaped like a record set.
    Structural,
    /// A typed literal failed to match its grammar.
    Format,
}

/// A decode failure, carrying the 1-based source line and offending text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A depth-0 line has content but no `:` separator.
    #[error("line {line}: expected `title: value`, found {text:?}")]
    MissingSeparator { line: usize, text: String },

    /// An indented line appears before any record that could own it.
    #[error("line {line}: indented line has no owning record: {text:?}")]
    OrphanIndent { line: usize, text: String },

    /// Nesting is deeper than `ParseConfig::max_depth`.
    #[error("line {line}: nesting exceeds the maximum depth of {max}")]
    DepthExceeded { line: usize, max: usize },

    /// A field that must hold an indented block holds a flat value.
    #[error("line {line}: `{title}` expects an indented block, found {text:?}")]
    ExpectedBlock {
        line: usize,
        title: String,
        text: String,
    },

    /// An `rgb(...)` literal is malformed or has an out-of-range channel.
    #[error("line {line}: invalid color {text:?}: {reason}")]
    InvalidColor {
        line: usize,
        text: String,
        reason: &'static str,
    },

    /// A card timestamp does not match `YYYY-MM-DD HH:MM:SS`.
    #[error("line {line}: invalid timestamp for `{field}`: {text:?}")]
    InvalidTimestamp {
        line: usize,
        field: String,
        text: String,
    },
}

impl ParseError {
    /// Which family of failure this is.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::MissingSeparator { .. }
            | ParseError::OrphanIndent { .. }
            | ParseError::DepthExceeded { .. }
            | ParseError::ExpectedBlock { .. } => ErrorKind::Structural,
            ParseError::InvalidColor { .. } | ParseError::InvalidTimestamp { .. } => {
                ErrorKind::Format
            }
        }
    }

    /// 1-based line the failure was detected on.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingSeparator { line, .. }
            | ParseError::OrphanIndent { line, .. }
            | ParseError::DepthExceeded { line, .. }
            | ParseError::ExpectedBlock { line, .. }
            | ParseError::InvalidColor { line, .. }
            | ParseError::InvalidTimestamp { line, .. } => *line,
        }
    }

    /// Is this a structural failure?
    #[must_use]
    pub fn is_structural(&self) -> bool {
        self.kind() == ErrorKind::Structural
    }
}

/// A failure while reading a package from a container.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A required entry is not present in the container.
    #[error("package has no `{0}` entry")]
    MissingEntry(String),

    /// Reading an entry (or listing entries) failed.
    #[error("failed to read `{entry}`: {source}")]
    Io {
        entry: String,
        #[source]
        source: io::Error,
    },

    /// A text entry is not valid UTF-8.
    #[error("entry `{entry}` is not valid UTF-8")]
    InvalidText {
        entry: String,
        #[source]
        source: FromUtf8Error,
    },

    /// A text entry failed to decode.
    #[error("failed to parse `{entry}`: {source}")]
    Parse {
        entry: String,
        #[source]
        source: ParseError,
    },

    /// A required root field is missing or does not hold text.
    #[error("missing or non-text field `{0}`")]
    MissingField(&'static str),
}

/// Result alias for text decoding.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result alias for package loading.
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let structural = ParseError::MissingSeparator {
            line: 3,
            text: "oops".into(),
        };
        assert_eq!(structural.kind(), ErrorKind::Structural);
        assert!(structural.is_structural());
        assert_eq!(structural.line(), 3);

        let format = ParseError::InvalidColor {
            line: 7,
            text: "rgb(1,2)".into(),
            reason: "expected three channels",
        };
        assert_eq!(format.kind(), ErrorKind::Format);
        assert_eq!(format.line(), 7);
    }

    #[test]
    fn test_display_mentions_position_and_text() {
        let err = ParseError::InvalidTimestamp {
            line: 12,
            field: "time created".into(),
            text: "yesterday".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 12"));
        assert!(msg.contains("time created"));
        assert!(msg.contains("yesterday"));
    }

    #[test]
    fn test_load_error_wraps_parse_error() {
        let err = LoadError::Parse {
            entry: "set".into(),
            source: ParseError::DepthExceeded { line: 1, max: 4 },
        };
        assert!(err.to_string().contains("`set`"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
