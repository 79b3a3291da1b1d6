//! Record splitting.
//!
//! A block of text is a sequence of records. Each record starts at a depth-0
//! line `title: value`; every following line indented by at least one tab
//! belongs to it, with one tab removed:
//!
//! ```text
//! styling:                 -> title "styling", nested
//! 	color: rgb(1,2,3)    -> value line "color: rgb(1,2,3)"
//! 	width: 5             -> value line "width: 5"
//! description:             -> title "description", multi-line text
//! 	First paragraph.
//!
//! 	Second paragraph.
//! ```
//!
//! The splitter runs as a small line-by-line state machine: it holds the
//! record being collected plus a count of blank lines seen since the last
//! content line, which are only kept if more content follows.

use tracing::warn;

use super::line::{lines, Line};
use crate::core::{BareLinePolicy, ParseError, ParseResult};

/// One record of a block, before its value is interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRecord {
    /// Text before the first `:`, trimmed.
    pub title: String,
    /// Inline value and/or continuation lines, one tab removed.
    pub value: String,
    /// The value is itself a block of records.
    pub nested: bool,
    /// The record had no `:` and was kept under [`BareLinePolicy::Tolerate`].
    pub bare: bool,
    /// 1-based line of the title.
    pub line: usize,
    /// 1-based line where `value` starts.
    pub value_line: usize,
}

struct Pending<'a> {
    title: &'a str,
    inline: &'a str,
    bare: bool,
    line: usize,
    body: Vec<&'a str>,
    body_line: usize,
}

impl<'a> Pending<'a> {
    fn finish(self) -> RawRecord {
        let nested = self.inline.is_empty() && is_record_block(&self.body);
        let (value, value_line) = match (self.inline.is_empty(), self.body.is_empty()) {
            (_, true) => (self.inline.to_string(), self.line),
            (true, false) => (self.body.join("\n"), self.body_line),
            (false, false) => (
                format!("{}\n{}", self.inline, self.body.join("\n")),
                self.line,
            ),
        };

        RawRecord {
            title: self.title.to_string(),
            value,
            nested,
            bare: self.bare,
            line: self.line,
            value_line,
        }
    }
}

/// Split normalized text into records.
///
/// `first_line` is the source line number of the first line of `text`.
pub fn split(text: &str, first_line: usize, policy: BareLinePolicy) -> ParseResult<Vec<RawRecord>> {
    let mut records = Vec::new();
    let mut current: Option<Pending<'_>> = None;
    let mut blanks = 0usize;

    for line in lines(text, first_line) {
        if line.is_blank() {
            blanks += 1;
            continue;
        }

        if line.depth == 0 {
            if let Some(done) = current.take() {
                records.push(done.finish());
            }
            blanks = 0;
            current = Some(open(&line, policy)?);
            continue;
        }

        match current.as_mut() {
            Some(pending) => {
                if pending.body.is_empty() {
                    pending.body_line = line.number;
                } else {
                    pending.body.extend(std::iter::repeat("").take(blanks));
                }
                blanks = 0;
                pending.body.push(line.outdented());
            }
            None => match policy {
                BareLinePolicy::Reject => {
                    return Err(ParseError::OrphanIndent {
                        line: line.number,
                        text: line.raw.trim().to_string(),
                    });
                }
                BareLinePolicy::Tolerate => {
                    warn!(line = line.number, "dropping indented line with no owning record");
                }
            },
        }
    }

    if let Some(done) = current.take() {
        records.push(done.finish());
    }
    Ok(records)
}

fn open<'a>(line: &Line<'a>, policy: BareLinePolicy) -> ParseResult<Pending<'a>> {
    let body = line.body();
    match line.separator() {
        Some(at) => Ok(Pending {
            title: body[..at].trim(),
            inline: body[at + 1..].trim(),
            bare: false,
            line: line.number,
            body: Vec::new(),
            body_line: line.number + 1,
        }),
        None => match policy {
            BareLinePolicy::Reject => Err(ParseError::MissingSeparator {
                line: line.number,
                text: body.trim().to_string(),
            }),
            BareLinePolicy::Tolerate => {
                warn!(line = line.number, token = body.trim(), "keeping line without separator as a bare record");
                Ok(Pending {
                    title: body.trim(),
                    inline: "",
                    bare: true,
                    line: line.number,
                    body: Vec::new(),
                    body_line: line.number + 1,
                })
            }
        },
    }
}

/// Check if de-indented continuation lines form a block of records.
///
/// The first content line must sit at depth 0 and every depth-0 line must
/// contain a separator. Anything else (paragraphs of prose, lists) is a
/// multi-line scalar.
///
/// A single line of prose that contains a `:` cannot be told apart from a
/// one-record block and is read as a block: `description:` followed by
/// `\tNote: draft` decodes to a map with key `Note`.
#[must_use]
pub fn is_record_block(body: &[&str]) -> bool {
    let mut content = body
        .iter()
        .enumerate()
        .map(|(i, raw)| Line::new(i + 1, raw))
        .filter(|l| !l.is_blank())
        .peekable();

    match content.peek() {
        Some(first) if first.depth == 0 => {}
        _ => return false,
    }
    content.filter(|l| l.depth == 0).all(|l| l.opens_record())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_ok(text: &str) -> Vec<RawRecord> {
        split(text, 1, BareLinePolicy::Reject).unwrap()
    }

    #[test]
    fn test_flat_records() {
        let records = split_ok("game: magic\nstylesheet: m15\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "game");
        assert_eq!(records[0].value, "magic");
        assert!(!records[0].nested);
        assert_eq!(records[1].line, 2);
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let records = split_ok("rule text: T: Add G.");
        assert_eq!(records[0].title, "rule text");
        assert_eq!(records[0].value, "T: Add G.");
    }

    #[test]
    fn test_nested_block() {
        let records = split_ok("styling:\n\tcolor: rgb(1,2,3)\n\twidth: 5\nnext: 1");
        assert_eq!(records.len(), 2);
        assert!(records[0].nested);
        assert_eq!(records[0].value, "color: rgb(1,2,3)\nwidth: 5");
        assert_eq!(records[0].value_line, 2);
        assert_eq!(records[1].title, "next");
    }

    #[test]
    fn test_multiline_text_keeps_inner_blank_lines() {
        let text = "description:\n\tFirst paragraph.\n\n\tSecond paragraph.\n\n\ngame: magic";
        let records = split_ok(text);
        assert_eq!(records.len(), 2);
        assert!(!records[0].nested);
        assert_eq!(records[0].value, "First paragraph.\n\nSecond paragraph.");
        assert_eq!(records[1].line, 7);
    }

    #[test]
    fn test_deeper_lines_keep_extra_tabs() {
        let records = split_ok("set info:\n\tsymbol:\n\t\tpart: a\n\ttitle: x");
        assert!(records[0].nested);
        assert_eq!(records[0].value, "symbol:\n\tpart: a\ntitle: x");
    }

    #[test]
    fn test_inline_value_with_continuation_is_scalar() {
        let records = split_ok("notes: first\n\tsecond: line");
        assert!(!records[0].nested);
        assert_eq!(records[0].value, "first\nsecond: line");
    }

    #[test]
    fn test_missing_separator_rejected() {
        let err = split("game: magic\nnonsense", 1, BareLinePolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingSeparator {
                line: 2,
                text: "nonsense".into()
            }
        );
    }

    #[test]
    fn test_missing_separator_tolerated() {
        let records = split("game: magic\nnonsense\n\tchild", 1, BareLinePolicy::Tolerate).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[1].bare);
        assert_eq!(records[1].title, "nonsense");
        assert_eq!(records[1].value, "child");
    }

    #[test]
    fn test_orphan_indent() {
        let err = split("\tchild: 1\ngame: magic", 5, BareLinePolicy::Reject).unwrap_err();
        assert!(matches!(err, ParseError::OrphanIndent { line: 5, .. }));

        let records = split("\tchild: 1\ngame: magic", 5, BareLinePolicy::Tolerate).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, 6);
    }

    #[test]
    fn test_is_record_block() {
        assert!(is_record_block(&["a: 1", "\tdeep", "b: 2"]));
        assert!(is_record_block(&["", "a:", "\tb: 1"]));
        assert!(!is_record_block(&["A paragraph.", "", "Another: one"]));
        assert!(!is_record_block(&["\ta: 1", "b: 2"]));
        assert!(!is_record_block(&[]));
        assert!(!is_record_block(&["", ""]));
    }

    #[test]
    fn test_single_line_prose_with_colon_is_a_block() {
        assert!(is_record_block(&["Note: this set is a draft."]));

        let records = split_ok("description:\n\tNote: this set is a draft.");
        assert!(records[0].nested);
        assert_eq!(records[0].value, "Note: this set is a draft.");
    }
}
