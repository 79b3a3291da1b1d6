//! Typed values stored in a [`Store`].
//!
//! Every value decoded from a set file is one of six kinds:
//!
//! - `String`: plain text (titles, rule text, numbers, booleans)
//! - `Color`: an `rgb(r,g,b)` literal
//! - `Timestamp`: a `YYYY-MM-DD HH:MM:SS` literal
//! - `Map`: an indented block of nested records
//! - `Card`: a `card` block
//! - `Keyword`: a `keyword` block
//!
//! Numbers and booleans are deliberately left as text; the format does not
//! tag them and only the game definition knows how to read them.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::store::Store;
use crate::records::{CardRecord, KeywordRecord};

/// Calendar date-time with second precision and no timezone.
pub type Timestamp = NaiveDateTime;

/// An RGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// A decoded value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Plain text, trimmed of surrounding whitespace.
    String(String),
    /// `rgb(r,g,b)` literal.
    Color(Color),
    /// `YYYY-MM-DD HH:MM:SS` literal.
    Timestamp(Timestamp),
    /// Nested block of records.
    Map(Store),
    /// A `card` block.
    Card(CardRecord),
    /// A `keyword` block.
    Keyword(KeywordRecord),
}

impl Value {
    /// Name of this value's kind, for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Color(_) => "color",
            Value::Timestamp(_) => "timestamp",
            Value::Map(_) => "map",
            Value::Card(_) => "card",
            Value::Keyword(_) => "keyword",
        }
    }

    /// Get as text if this is a String value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as color if this is a Color value.
    #[must_use]
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Get as timestamp if this is a Timestamp value.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Get as nested store if this is a Map value.
    #[must_use]
    pub fn as_map(&self) -> Option<&Store> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get as card if this is a Card value.
    #[must_use]
    pub fn as_card(&self) -> Option<&CardRecord> {
        match self {
            Value::Card(c) => Some(c),
            _ => None,
        }
    }

    /// Get as keyword if this is a Keyword value.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&KeywordRecord> {
        match self {
            Value::Keyword(k) => Some(k),
            _ => None,
        }
    }

    /// Convert into the concrete type `T`, handing the value back on mismatch.
    pub fn into_typed<T: FromValue>(self) -> Result<T, Value> {
        T::from_value(self)
    }
}

/// Conversion from a [`Value`] to one of its payload types.
///
/// This is what makes `Store::get_first::<T>` a lenient typed probe: a
/// variant mismatch is reported as `None`, not as an error.
pub trait FromValue: Sized {
    /// Borrow the payload if `value` holds this type.
    fn from_ref(value: &Value) -> Option<&Self>;

    /// Take the payload if `value` holds this type, otherwise return it.
    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! from_value {
    ($ty:ty, $variant:ident) => {
        impl FromValue for $ty {
            fn from_ref(value: &Value) -> Option<&Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v)
            }
        }
    };
}

from_value!(String, String);
from_value!(Color, Color);
from_value!(Timestamp, Timestamp);
from_value!(Store, Map);
from_value!(CardRecord, Card);
from_value!(KeywordRecord, Keyword);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap()
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::new(255, 0, 17).to_string(), "rgb(255,0,17)");
    }

    #[test]
    fn test_accessors_match_variant() {
        let text: Value = "hello".into();
        assert_eq!(text.as_str(), Some("hello"));
        assert_eq!(text.as_color(), None);
        assert_eq!(text.kind_name(), "string");

        let color: Value = Color::new(1, 2, 3).into();
        assert_eq!(color.as_color(), Some(Color::new(1, 2, 3)));
        assert_eq!(color.as_str(), None);

        let time: Value = ts().into();
        assert_eq!(time.as_timestamp(), Some(ts()));
        assert!(time.as_map().is_none());
    }

    #[test]
    fn test_from_ref_is_lenient() {
        let value = Value::Color(Color::new(9, 9, 9));
        assert!(<String as FromValue>::from_ref(&value).is_none());
        assert_eq!(
            <Color as FromValue>::from_ref(&value),
            Some(&Color::new(9, 9, 9))
        );
    }

    #[test]
    fn test_into_typed_returns_value_on_mismatch() {
        let value = Value::String("5".into());
        let back = value.clone().into_typed::<Color>().unwrap_err();
        assert_eq!(back, value);
        assert_eq!(value.into_typed::<String>().unwrap(), "5");
    }

    #[test]
    fn test_serialization() {
        let value = Value::Color(Color::new(10, 20, 30));
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
