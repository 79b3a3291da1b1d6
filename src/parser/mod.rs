//! Decoding text into stores.
//!
//! `Parser` is the entry point; `parse` is a shorthand using the default
//! configuration.

pub mod builder;

pub use builder::{parse, Parser};
