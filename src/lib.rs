//! # mse-set
//!
//! Reader for Magic Set Editor set packages.
//!
//! A set package is a container of named entries. The `set` entry is a
//! tab-indented text file of `title: value` records; this crate decodes it
//! into an ordered, typed store and assembles a [`Set`] from it.
//!
//! ## Design Principles
//!
//! 1. **Order-Preserving**: Keys repeat (`card`, `keyword`) and their order
//!    matters, so stores are ordered multimaps, never hash maps.
//!
//! 2. **Schema-Free**: Game-specific card fields are kept as text under
//!    their own titles. No game definition is needed to read a set.
//!
//! 3. **Typed Scalars**: Values are classified as color, timestamp or text
//!    into a closed [`Value`] enum.
//!
//! ## Modules
//!
//! - `core`: values, the ordered store, errors, configuration
//! - `text`: line classification, record splitting, scalar classification
//! - `parser`: the recursive structure builder
//! - `records`: card and keyword decoders
//! - `package`: containers, the set aggregate, game packages
//!
//! ## Example
//!
//! ```
//! use mse_set::{MemoryContainer, ParseConfig, Set};
//!
//! let container = MemoryContainer::new().with_entry(
//!     "set",
//!     "mse version: 2.0.0\ngame: magic\nstylesheet: m15\ncard:\n\tname: Goblin\n",
//! );
//! let set = Set::load(&container, &ParseConfig::default()).unwrap();
//!
//! assert_eq!(set.game, "magic");
//! assert_eq!(set.cards[0].field("name"), Some("Goblin"));
//! ```

pub mod core;
pub mod package;
pub mod parser;
pub mod records;
pub mod text;

// Re-export commonly used types
pub use crate::core::{
    BareLinePolicy, Color, Entry, ErrorKind, FromValue, LoadError, LoadResult, ParseConfig,
    ParseError, ParseResult, RecordErrorPolicy, Store, Timestamp, Value,
};

pub use crate::parser::{parse, Parser};

pub use crate::records::{CardRecord, KeywordRecord};

pub use crate::package::{
    Container, DirectoryContainer, Game, MemoryContainer, PackageVersion, Set,
};
