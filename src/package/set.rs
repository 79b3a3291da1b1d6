//! The set aggregate.
//!
//! A set package holds:
//!
//! - `set`: the set file itself (required)
//! - `*.mse-symbol`: symbol definitions, same text format
//! - `image*`: card art and other images, kept as raw bytes
//!
//! The set file's root store is consumed field by field: the well-known
//! keys become typed fields of [`Set`], every `card` and `keyword` block is
//! collected in order, and whatever is left is kept in [`Set::extra`].

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::container::{Container, DirectoryContainer};
use super::game::Game;
use crate::core::{LoadError, LoadResult, ParseConfig, ParseError, Store, Value};
use crate::parser::Parser;
use crate::records::{CardRecord, KeywordRecord, CARD, KEYWORD};

/// Name of the set file entry.
pub const SET_ENTRY: &str = "set";

/// Suffix of symbol entries.
pub const SYMBOL_SUFFIX: &str = ".mse-symbol";

/// Prefix of image entries.
pub const IMAGE_PREFIX: &str = "image";

/// A decoded set package.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Set {
    /// Name of the game package the set is for.
    pub game: String,

    /// Name of the default stylesheet.
    pub stylesheet: String,

    /// Version of the program that wrote the set.
    pub mse_version: String,

    /// Set-wide styling options.
    pub styling: Store,

    /// Cards, in file order.
    pub cards: Vec<CardRecord>,

    /// Custom keywords, in file order.
    pub keywords: Vec<KeywordRecord>,

    /// Image entries by entry name.
    pub images: FxHashMap<String, Vec<u8>>,

    /// Parsed symbol entries by entry name.
    pub symbols: FxHashMap<String, Store>,

    /// Root fields not consumed above (`set info`, `version control`, ...).
    pub extra: Store,

    /// Card and keyword records that failed to decode and were left out.
    #[serde(skip)]
    pub skipped: Vec<ParseError>,
}

impl Set {
    /// Assemble a set from the root store of a decoded set file.
    ///
    /// Fails if `game`, `stylesheet` or `mse version` is missing.
    pub fn from_store(mut root: Store) -> LoadResult<Self> {
        let game = take_text(&mut root, "game")?;
        let stylesheet = take_text(&mut root, "stylesheet")?;
        let mse_version = take_text(&mut root, "mse version")?;

        let styling = match root.remove_first("styling") {
            Some(Value::Map(styling)) => styling,
            Some(other) => {
                debug!(kind = other.kind_name(), "set styling is not a block, ignoring");
                Store::new()
            }
            None => Store::new(),
        };

        let cards = root
            .remove_all(CARD)
            .into_iter()
            .filter_map(|value| match value {
                Value::Card(card) => Some(card),
                other => {
                    warn!(kind = other.kind_name(), "ignoring `card` entry that is not a block");
                    None
                }
            })
            .collect();

        let keywords = root
            .remove_all(KEYWORD)
            .into_iter()
            .filter_map(|value| match value {
                Value::Keyword(keyword) => Some(keyword),
                other => {
                    warn!(kind = other.kind_name(), "ignoring `keyword` entry that is not a block");
                    None
                }
            })
            .collect();

        Ok(Self {
            game,
            stylesheet,
            mse_version,
            styling,
            cards,
            keywords,
            images: FxHashMap::default(),
            symbols: FxHashMap::default(),
            extra: root,
            skipped: Vec::new(),
        })
    }

    /// Decode a set file's text.
    pub fn parse(text: &str, config: &ParseConfig) -> LoadResult<Self> {
        let mut parser = Parser::new(config.clone());
        let root = parser.parse(text).map_err(|source| LoadError::Parse {
            entry: SET_ENTRY.to_string(),
            source,
        })?;
        let mut set = Self::from_store(root)?;
        set.skipped = parser.take_skipped();
        Ok(set)
    }

    /// Load a set package from a container.
    pub fn load<C: Container + ?Sized>(container: &C, config: &ParseConfig) -> LoadResult<Self> {
        let text = container.read_text(SET_ENTRY)?;
        let mut set = Self::parse(&text, config)?;

        let names = container.entry_names().map_err(|source| LoadError::Io {
            entry: String::from("*"),
            source,
        })?;
        let mut parser = Parser::new(config.clone());
        for name in names {
            if name.ends_with(SYMBOL_SUFFIX) {
                let text = container.read_text(&name)?;
                let symbol = parser.parse(&text).map_err(|source| LoadError::Parse {
                    entry: name.clone(),
                    source,
                })?;
                set.symbols.insert(name, symbol);
            } else if name.starts_with(IMAGE_PREFIX) {
                let bytes = container.read_bytes(&name)?;
                set.images.insert(name, bytes);
            }
        }
        set.skipped.extend(parser.take_skipped());

        debug!(
            game = %set.game,
            cards = set.cards.len(),
            keywords = set.keywords.len(),
            images = set.images.len(),
            symbols = set.symbols.len(),
            skipped = set.skipped.len(),
            "loaded set"
        );
        Ok(set)
    }

    /// Load an unpacked set package from a directory.
    pub fn open(path: impl AsRef<Path>, config: &ParseConfig) -> LoadResult<Self> {
        Self::load(&DirectoryContainer::new(path.as_ref()), config)
    }

    /// The `set info` block (title, description, symbol, ...).
    #[must_use]
    pub fn set_info(&self) -> Option<&Store> {
        self.extra.get_first::<Store>("set info")
    }

    /// The set title from `set info`.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.set_info().and_then(|info| info.get_str("title"))
    }

    /// Image bytes referenced by a card's `image` field.
    #[must_use]
    pub fn card_image(&self, card: &CardRecord) -> Option<&[u8]> {
        card.image()
            .and_then(|name| self.images.get(name))
            .map(Vec::as_slice)
    }

    /// Cards whose game field `name` equals `value`.
    pub fn cards_where<'a>(
        &'a self,
        name: &'a str,
        value: &'a str,
    ) -> impl Iterator<Item = &'a CardRecord> + 'a {
        self.cards
            .iter()
            .filter(move |card| card.field(name) == Some(value))
    }

    /// Is this set written for `game`?
    #[must_use]
    pub fn uses_game(&self, game: &Game) -> bool {
        self.game.eq_ignore_ascii_case(&game.version.name)
    }
}

fn take_text(root: &mut Store, key: &'static str) -> LoadResult<String> {
    root.take_first::<String>(key)
        .ok_or(LoadError::MissingField(key))
}
