//! Keyword records.
//!
//! Keywords have a closed set of fields. Unknown titles are dropped rather
//! than kept, unlike cards, whose field set is open.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::ParseResult;
use crate::parser::Parser;
use crate::text::split;

/// A decoded `keyword` block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRecord {
    /// The keyword itself, possibly with parameters (`Cycling <atom-param>`).
    pub keyword: Option<String>,

    /// The `match` field: the pattern that finds the keyword in card text.
    #[serde(rename = "match")]
    pub pattern: Option<String>,

    /// The keyword mode (`core`, `expert`, `custom`, ...).
    pub mode: Option<String>,

    /// Reminder text.
    pub reminder: Option<String>,
}

impl KeywordRecord {
    /// Create a keyword record with just its keyword set.
    #[must_use]
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Self::default()
        }
    }

    /// Decode a de-indented keyword body.
    pub(crate) fn decode(
        parser: &mut Parser,
        text: &str,
        first_line: usize,
        depth: usize,
    ) -> ParseResult<Self> {
        parser.enter(first_line, depth)?;

        let mut keyword = KeywordRecord::default();
        for record in split(text, first_line, parser.config().bare_lines)? {
            let slot = match record.title.as_str() {
                "keyword" if !record.bare => &mut keyword.keyword,
                "match" if !record.bare => &mut keyword.pattern,
                "mode" if !record.bare => &mut keyword.mode,
                "reminder" if !record.bare => &mut keyword.reminder,
                other => {
                    trace!(title = other, line = record.line, "ignoring keyword field");
                    continue;
                }
            };
            *slot = Some(record.value);
        }
        Ok(keyword)
    }
}
