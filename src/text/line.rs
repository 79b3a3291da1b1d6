//! Line classification.
//!
//! One tab is one level of nesting. A line's depth is the number of leading
//! tabs; at depth 0 a line opens a record when it contains a `:`.

use std::borrow::Cow;

/// Byte order mark some editors write at the start of UTF-8 text.
const BOM: char = '\u{feff}';

/// One logical line of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number in the source text.
    pub number: usize,
    /// Number of leading tab characters.
    pub depth: usize,
    /// The full line, tabs included, without its line ending.
    pub raw: &'a str,
}

impl<'a> Line<'a> {
    /// Classify a single line.
    #[must_use]
    pub fn new(number: usize, raw: &'a str) -> Self {
        let depth = raw.bytes().take_while(|&b| b == b'\t').count();
        Self { number, depth, raw }
    }

    /// The line with its leading tabs removed.
    #[must_use]
    pub fn body(&self) -> &'a str {
        &self.raw[self.depth..]
    }

    /// Check if the line has no visible content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Byte offset of the `:` separator within [`Line::body`].
    #[must_use]
    pub fn separator(&self) -> Option<usize> {
        self.body().find(':')
    }

    /// Does this line start a new record at the current level?
    #[must_use]
    pub fn opens_record(&self) -> bool {
        self.depth == 0 && !self.is_blank() && self.separator().is_some()
    }

    /// The line with exactly one leading tab removed.
    #[must_use]
    pub fn outdented(&self) -> &'a str {
        if self.depth > 0 {
            &self.raw[1..]
        } else {
            self.raw
        }
    }
}

/// Iterate over the lines of already-normalized text.
///
/// `first_line` is the number given to the first line, so nested blocks
/// can report positions in their parent's coordinates.
pub fn lines(text: &str, first_line: usize) -> impl Iterator<Item = Line<'_>> {
    text.split('\n')
        .enumerate()
        .map(move |(i, raw)| Line::new(first_line + i, raw))
}

/// Drop a leading byte order mark and convert `\r\n` / `\r` to `\n`.
#[must_use]
pub fn normalize(text: &str) -> Cow<'_, str> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Remove one leading tab from every line that has one.
///
/// Used for record bodies taken straight from a file, where every line but
/// possibly the first still carries the record's own indentation.
#[must_use]
pub fn outdent(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, raw) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(raw.strip_prefix('\t').unwrap_or(raw));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_and_body() {
        let line = Line::new(1, "\t\tname: Bolt");
        assert_eq!(line.depth, 2);
        assert_eq!(line.body(), "name: Bolt");
        assert_eq!(line.outdented(), "\tname: Bolt");
        assert!(!line.opens_record());
    }

    #[test]
    fn test_opens_record() {
        assert!(Line::new(1, "game: magic").opens_record());
        assert!(Line::new(1, "styling:").opens_record());
        assert!(!Line::new(1, "just words").opens_record());
        assert!(!Line::new(1, "   ").opens_record());
    }

    #[test]
    fn test_blank_lines() {
        assert!(Line::new(1, "").is_blank());
        assert!(Line::new(1, "\t\t").is_blank());
        assert!(Line::new(1, " \t ").is_blank());
        assert!(!Line::new(1, "\tx").is_blank());
    }

    #[test]
    fn test_lines_numbering() {
        let numbers: Vec<_> = lines("a: 1\nb: 2\n\tc: 3", 10).map(|l| (l.number, l.depth)).collect();
        assert_eq!(numbers, vec![(10, 0), (11, 0), (12, 1)]);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("\u{feff}a: 1\r\nb: 2\rc: 3"), "a: 1\nb: 2\nc: 3");
        assert!(matches!(normalize("a: 1\nb: 2"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_outdent() {
        assert_eq!(outdent("a: 1\n\tb: 2\n\t\tc: 3\n"), "a: 1\nb: 2\n\tc: 3\n");
    }
}
