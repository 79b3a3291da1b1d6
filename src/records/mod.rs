//! Specialized records: cards and keywords.
//!
//! These are the two block shapes that repeat inside a set and get their
//! own decoders instead of generic recursion.
//!
//! ## Key Types
//!
//! - `CardRecord`: fixed card fields plus an open bag of game fields
//! - `KeywordRecord`: the closed keyword field set

pub mod card;
pub mod keyword;

pub use card::CardRecord;
pub use keyword::KeywordRecord;

/// Title of a card block.
pub const CARD: &str = "card";

/// Title of a keyword block.
pub const KEYWORD: &str = "keyword";
