//! Recursive structure builder.
//!
//! Turns a block of text into a [`Store`]. Each record's value is either
//! classified as a scalar or, when it is itself a block, decoded by title:
//!
//! - `card`: [`CardRecord`]
//! - `keyword`: [`KeywordRecord`]
//! - anything else: a nested [`Store`]
//!
//! Recursion always works on the value of a single record, which is shorter
//! than its parent and one level less indented. Depth is still capped by
//! [`ParseConfig::max_depth`] so corrupt input cannot exhaust the stack.

use tracing::{debug, trace, warn};

use crate::core::{ParseConfig, ParseError, ParseResult, RecordErrorPolicy, Store, Value};
use crate::records::{CardRecord, KeywordRecord, CARD, KEYWORD};
use crate::text::{classify, normalize, outdent, split, RawRecord};

/// Decoder for the set text format.
///
/// A parser holds its configuration and the failures it scoped out while
/// decoding. It carries no other state between calls.
///
/// ## Example
///
/// ```
/// use mse_set::{Color, ParseConfig, Parser, Store};
///
/// let text = "game: magic\nstyling:\n\tborder color: rgb(0,0,0)\n";
/// let store = Parser::new(ParseConfig::default()).parse(text).unwrap();
///
/// let styling = store.get_first::<Store>("styling").unwrap();
/// assert_eq!(styling.get_first::<Color>("border color"), Some(&Color::new(0, 0, 0)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Parser {
    config: ParseConfig,
    skipped: Vec<ParseError>,
}

impl Parser {
    /// Create a parser with the given configuration.
    #[must_use]
    pub fn new(config: ParseConfig) -> Self {
        Self {
            config,
            skipped: Vec::new(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Decode a whole document, such as the `set` entry of a package.
    pub fn parse(&mut self, text: &str) -> ParseResult<Store> {
        let text = normalize(text);
        let store = self.block(&text, 1, 0)?;
        debug!(
            entries = store.len(),
            skipped = self.skipped.len(),
            "decoded document"
        );
        Ok(store)
    }

    /// Decode a card body as it appears under its `card:` header.
    ///
    /// Lines may carry the record's one tab of indentation; it is removed
    /// before decoding.
    pub fn parse_card(&mut self, body: &str) -> ParseResult<CardRecord> {
        let body = outdent(&normalize(body));
        CardRecord::decode(self, &body, 1, 0)
    }

    /// Decode a keyword body as it appears under its `keyword:` header.
    pub fn parse_keyword(&mut self, body: &str) -> ParseResult<KeywordRecord> {
        let body = outdent(&normalize(body));
        KeywordRecord::decode(self, &body, 1, 0)
    }

    /// Record failures that were skipped under [`RecordErrorPolicy::Skip`].
    #[must_use]
    pub fn skipped(&self) -> &[ParseError] {
        &self.skipped
    }

    /// Take the skipped failures, leaving the list empty.
    pub fn take_skipped(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.skipped)
    }

    /// Fail if `depth` is beyond the configured maximum.
    pub(crate) fn enter(&self, line: usize, depth: usize) -> ParseResult<()> {
        if depth > self.config.max_depth {
            return Err(ParseError::DepthExceeded {
                line,
                max: self.config.max_depth,
            });
        }
        Ok(())
    }

    /// Decode a block of records starting at `first_line`.
    pub(crate) fn block(&mut self, text: &str, first_line: usize, depth: usize) -> ParseResult<Store> {
        self.enter(first_line, depth)?;

        let records = split(text, first_line, self.config.bare_lines)?;
        let mut store = Store::with_capacity(records.len());
        for record in records {
            match self.value(&record, depth) {
                Ok(value) => store.push(record.title, value),
                Err(err) if self.is_scoped(&record) => {
                    warn!(
                        title = %record.title,
                        line = record.line,
                        error = %err,
                        "skipping record that failed to decode"
                    );
                    self.skipped.push(err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(store)
    }

    fn value(&mut self, record: &RawRecord, depth: usize) -> ParseResult<Value> {
        if self.config.is_verbatim(&record.title) {
            return Ok(Value::String(record.value.trim().to_string()));
        }
        if !record.nested {
            return classify(&record.value, record.line);
        }

        trace!(title = %record.title, line = record.line, depth, "descending into block");
        let depth = depth + 1;
        match record.title.as_str() {
            CARD => CardRecord::decode(self, &record.value, record.value_line, depth).map(Value::Card),
            KEYWORD => {
                KeywordRecord::decode(self, &record.value, record.value_line, depth).map(Value::Keyword)
            }
            _ => self.block(&record.value, record.value_line, depth).map(Value::Map),
        }
    }

    fn is_scoped(&self, record: &RawRecord) -> bool {
        self.config.record_errors == RecordErrorPolicy::Skip
            && record.nested
            && matches!(record.title.as_str(), CARD | KEYWORD)
    }
}

/// Decode `text` with the default configuration.
pub fn parse(text: &str) -> ParseResult<Store> {
    Parser::new(ParseConfig::default()).parse(text)
}
