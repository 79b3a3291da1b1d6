//! Core types: values, the ordered store, errors, configuration.
//!
//! Everything the decoder produces is built from these. They carry no
//! knowledge of the text format itself.

pub mod config;
pub mod error;
pub mod store;
pub mod value;

pub use config::{BareLinePolicy, ParseConfig, RecordErrorPolicy};
pub use error::{ErrorKind, LoadError, LoadResult, ParseError, ParseResult};
pub use store::{Entry, Store};
pub use value::{Color, FromValue, Timestamp, Value};
