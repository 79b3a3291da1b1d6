//! Game packages.
//!
//! A game package describes one game (card fields, styles, keywords). Only
//! its header fields and built-in keywords are decoded here; card field
//! definitions stay in [`Game::extra`] untouched.
//!
//! The `game` entry may pull in other entries with `include file: <name>`
//! lines and carries `#` comment lines, both resolved before decoding.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::container::Container;
use super::version::PackageVersion;
use crate::core::{LoadError, LoadResult, ParseConfig, ParseError, Store, Value};
use crate::parser::Parser;
use crate::records::{KeywordRecord, KEYWORD};
use crate::text::Line;

/// Name of the game file entry.
pub const GAME_ENTRY: &str = "game";

/// Suffix of game package names.
pub const GAME_SUFFIX: &str = ".mse-game";

const INCLUDE_DIRECTIVE: &str = "include file:";

/// A decoded game package.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Package name and the `version` field.
    pub version: PackageVersion,

    /// Group the installer lists the package under.
    pub installer_group: Option<String>,

    /// Sort position among installed games.
    pub position_hint: Option<i32>,

    /// Icon image bytes, if the package names one.
    pub icon: Option<Vec<u8>>,

    /// Whether the game supports keywords.
    pub has_keywords: bool,

    /// Built-in keywords, in file order. Empty unless `has_keywords`.
    pub keywords: Vec<KeywordRecord>,

    /// Fields not consumed above.
    pub extra: Store,

    /// Keyword records that failed to decode and were left out.
    #[serde(skip)]
    pub skipped: Vec<ParseError>,
}

impl Game {
    /// Load the game package `name` (e.g. `magic.mse-game`) from a container.
    pub fn load<C: Container + ?Sized>(
        container: &C,
        name: &str,
        config: &ParseConfig,
    ) -> LoadResult<Self> {
        let text = container.read_text(GAME_ENTRY)?;
        let text = expand_includes(container, &text, config.max_depth, 0)?;

        let mut parser = Parser::new(config.clone());
        let mut root = parser.parse(&text).map_err(|source| LoadError::Parse {
            entry: GAME_ENTRY.to_string(),
            source,
        })?;

        let version = root
            .take_first::<String>("version")
            .ok_or(LoadError::MissingField("version"))?;
        let installer_group = root.take_first::<String>("installer group");
        let position_hint = root
            .take_first::<String>("position hint")
            .and_then(|hint| hint.trim().parse().ok());
        let icon = match root.take_first::<String>("icon") {
            Some(entry) if !entry.is_empty() => Some(container.read_bytes(&entry)?),
            _ => None,
        };
        let has_keywords = root
            .take_first::<String>("has keywords")
            .is_some_and(|flag| parse_flag(&flag));

        let keywords = if has_keywords {
            root.remove_all(KEYWORD)
                .into_iter()
                .filter_map(|value| value.into_typed::<KeywordRecord>().ok())
                .collect()
        } else {
            Vec::new()
        };

        let name = name.strip_suffix(GAME_SUFFIX).unwrap_or(name);
        debug!(game = name, %version, keywords = keywords.len(), "loaded game");

        Ok(Self {
            version: PackageVersion::new(name, version),
            installer_group,
            position_hint,
            icon,
            has_keywords,
            keywords,
            extra: root,
            skipped: parser.take_skipped(),
        })
    }

    /// Package name without its suffix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.version.name
    }

    /// A field from [`Game::extra`] as text.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "yes")
}

/// Resolve `include file:` lines and drop `#` comment lines.
///
/// An included entry is inserted at the directive's indentation.
pub fn expand_includes<C: Container + ?Sized>(
    container: &C,
    text: &str,
    max_depth: usize,
    depth: usize,
) -> LoadResult<String> {
    let mut out = String::with_capacity(text.len());
    for (i, raw) in text.split('\n').enumerate() {
        let line = Line::new(i + 1, raw);
        let body = line.body().trim_start();
        if body.starts_with('#') {
            continue;
        }

        let Some(target) = body.strip_prefix(INCLUDE_DIRECTIVE) else {
            out.push_str(raw);
            out.push('\n');
            continue;
        };

        let target = target.trim();
        if depth >= max_depth {
            return Err(LoadError::Parse {
                entry: target.to_string(),
                source: ParseError::DepthExceeded {
                    line: line.number,
                    max: max_depth,
                },
            });
        }

        let included = container.read_text(target)?;
        let included = expand_includes(container, &included, max_depth, depth + 1)?;
        let indent = &raw[..line.depth];
        for included_line in included.lines() {
            if !included_line.trim().is_empty() {
                out.push_str(indent);
                out.push_str(included_line);
            }
            out.push('\n');
        }
    }
    Ok(out)
}
