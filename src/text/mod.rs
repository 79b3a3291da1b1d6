//! Text layer: lines, records, and scalars.
//!
//! ## Key Types
//!
//! - `Line`: one line with its tab depth
//! - `RawRecord`: a title with its uninterpreted value
//!
//! Nothing here recurses; nested values are handed back as text for the
//! parser to decode.

pub mod line;
pub mod scalar;
pub mod splitter;

pub use line::{lines, normalize, outdent, Line};
pub use scalar::{classify, parse_color, parse_timestamp};
pub use splitter::{is_record_block, split, RawRecord};
