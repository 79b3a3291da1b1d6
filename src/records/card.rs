//! Card records.
//!
//! A card has a handful of fields every game shares (notes, timestamps,
//! styling overrides). Everything else is game-specific: the decoder keeps
//! those as text in `fields` under their literal titles, so a card from any
//! game decodes without knowing that game's schema.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ParseError, ParseResult, Store, Timestamp, Value};
use crate::parser::Parser;
use crate::text::{parse_timestamp, split, RawRecord};

pub const STYLING_DATA: &str = "styling data";
pub const NOTES: &str = "notes";
pub const TIME_CREATED: &str = "time created";
pub const TIME_MODIFIED: &str = "time modified";

/// A decoded `card` block.
///
/// ## Example
///
/// ```
/// use mse_set::Parser;
///
/// let card = Parser::default()
///     .parse_card("name: Lightning Bolt\n\tcasting cost: R\n\tnotes: reprint")
///     .unwrap();
///
/// assert_eq!(card.field("name"), Some("Lightning Bolt"));
/// assert_eq!(card.field("casting cost"), Some("R"));
/// assert_eq!(card.notes.as_deref(), Some("reprint"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Free-form notes, verbatim.
    pub notes: Option<String>,

    /// When the card was created.
    pub time_created: Option<Timestamp>,

    /// When the card was last modified.
    pub time_modified: Option<Timestamp>,

    /// Per-card styling overrides.
    pub styling_data: Option<Store>,

    /// Every other field, as text, in source order.
    pub fields: Store,
}

impl CardRecord {
    /// Create an empty card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a game-specific field as text.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get_str(name)
    }

    /// Per-card stylesheet override, if any.
    #[must_use]
    pub fn stylesheet(&self) -> Option<&str> {
        self.field("stylesheet").filter(|s| !s.is_empty())
    }

    /// Name of the package entry holding the card's image, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.field("image").filter(|s| !s.is_empty())
    }

    /// Add a game-specific field (builder pattern).
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(name, Value::String(value.into()));
        self
    }

    /// Decode a de-indented card body.
    pub(crate) fn decode(
        parser: &mut Parser,
        text: &str,
        first_line: usize,
        depth: usize,
    ) -> ParseResult<Self> {
        parser.enter(first_line, depth)?;

        let mut card = CardRecord::new();
        for record in split(text, first_line, parser.config().bare_lines)? {
            if record.bare {
                debug!(line = record.line, "ignoring bare line in card");
                continue;
            }
            match record.title.as_str() {
                STYLING_DATA => card.styling_data = Some(styling(parser, &record, depth)?),
                NOTES => card.notes = Some(record.value),
                TIME_CREATED => card.time_created = Some(timestamp(&record)?),
                TIME_MODIFIED => card.time_modified = Some(timestamp(&record)?),
                _ => card.fields.push(record.title, Value::String(record.value)),
            }
        }
        Ok(card)
    }
}

fn styling(parser: &mut Parser, record: &RawRecord, depth: usize) -> ParseResult<Store> {
    if record.nested {
        return parser.block(&record.value, record.value_line, depth + 1);
    }
    if record.value.trim().is_empty() {
        return Ok(Store::new());
    }
    Err(ParseError::ExpectedBlock {
        line: record.line,
        title: record.title.clone(),
        text: record.value.clone(),
    })
}

fn timestamp(record: &RawRecord) -> ParseResult<Timestamp> {
    parse_timestamp(record.value.trim()).ok_or_else(|| ParseError::InvalidTimestamp {
        line: record.line,
        field: record.title.clone(),
        text: record.value.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BareLinePolicy, Color, ParseConfig};
    use chrono::NaiveDate;

    fn decode(body: &str) -> ParseResult<CardRecord> {
        Parser::default().parse_card(body)
    }

    #[test]
    fn test_fixed_fields() {
        let card = decode("time created: 2020-01-01 00:00:00\n\tnotes: foo").unwrap();
        let expected = NaiveDate::from_ymd_opt(2020, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        assert_eq!(card.time_created, Some(expected));
        assert_eq!(card.time_modified, None);
        assert_eq!(card.notes.as_deref(), Some("foo"));
        assert!(card.fields.is_empty());
        assert!(card.styling_data.is_none());
    }

    #[test]
    fn test_unknown_fields_kept_as_text() {
        let card = decode("name: Bolt\n\tpower: 3\n\tcard color: rgb(1,2,3)").unwrap();
        assert_eq!(card.fields.keys().collect::<Vec<_>>(), vec!["name", "power", "card color"]);
        // Field bag values are never classified.
        assert_eq!(card.field("card color"), Some("rgb(1,2,3)"));
        assert_eq!(card.fields.get_first::<Color>("card color"), None);
    }

    #[test]
    fn test_multiline_field() {
        let card = decode("rule text:\n\t\tFlying\n\t\t\n\t\tHaste").unwrap();
        assert_eq!(card.field("rule text"), Some("Flying\n\nHaste"));
    }

    #[test]
    fn test_styling_data_block() {
        let card = decode("styling data:\n\t\tframe: rgb(9,8,7)\n\t\tfoil: yes\n\tname: x").unwrap();
        let styling = card.styling_data.unwrap();
        assert_eq!(styling.get_first::<Color>("frame"), Some(&Color::new(9, 8, 7)));
        assert_eq!(styling.get_str("foil"), Some("yes"));
        assert_eq!(card.fields.len(), 1);
    }

    #[test]
    fn test_empty_styling_data() {
        let card = decode("styling data:\n\tname: x").unwrap();
        assert_eq!(card.styling_data, Some(Store::new()));
    }

    #[test]
    fn test_flat_styling_data_is_structural() {
        let err = decode("styling data: nope").unwrap_err();
        assert!(matches!(err, ParseError::ExpectedBlock { line: 1, .. }));
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let err = decode("name: x\n\ttime modified: 2020-13-01 00:00:00").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidTimestamp {
                line: 2,
                field: "time modified".into(),
                text: "2020-13-01 00:00:00".into(),
            }
        );
    }

    #[test]
    fn test_leap_second_is_an_error() {
        let err = decode("time created: 2020-01-01 23:59:60\n\tname: x").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidTimestamp {
                line: 1,
                field: "time created".into(),
                text: "2020-01-01 23:59:60".into(),
            }
        );
    }

    #[test]
    fn test_bare_lines() {
        assert!(decode("name: x\n\tstray").is_err());

        let config = ParseConfig::default().with_bare_lines(BareLinePolicy::Tolerate);
        let card = Parser::new(config).parse_card("name: x\n\tstray").unwrap();
        assert_eq!(card.fields.len(), 1);
    }

    #[test]
    fn test_accessors() {
        let card = CardRecord::new()
            .with_field("stylesheet", "m15-planeswalker")
            .with_field("image", "image3")
            .with_field("name", "");
        assert_eq!(card.stylesheet(), Some("m15-planeswalker"));
        assert_eq!(card.image(), Some("image3"));
        assert_eq!(card.field("name"), Some(""));
        assert_eq!(CardRecord::new().image(), None);
    }
}
