//! Ordered key-value store.
//!
//! The set format repeats keys freely (`card`, `keyword`, `symbol part`,
//! ...) and the order of repeated keys is meaningful, so the store is an
//! insertion-ordered list of entries rather than a map.
//!
//! Lookups go through a key index that is built lazily on first use. Pushes
//! keep an existing index up to date; removals drop it so the next lookup
//! rebuilds it.
//!
//! ## Extraction
//!
//! Callers that know some of the fields consume them with the destructive
//! operations ([`Store::remove_first`], [`Store::take_first`],
//! [`Store::remove_all`]) and keep whatever is left as passthrough data.
//! [`Store::remainder`] does the same without touching the original.

use std::slice;
use std::sync::OnceLock;
use std::vec;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::value::{FromValue, Value};

type KeyIndex = FxHashMap<String, SmallVec<[usize; 4]>>;

/// One `(key, value)` pair of a [`Store`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: Value,
}

/// Insertion-ordered multimap from titles to typed values.
///
/// ## Example
///
/// ```
/// use mse_set::{Store, Value};
///
/// let mut store = Store::new();
/// store.push("keyword", "Flying");
/// store.push("game", "magic");
/// store.push("keyword", "Haste");
///
/// assert_eq!(store.get_first::<String>("game").map(String::as_str), Some("magic"));
/// assert_eq!(store.find_all("keyword").count(), 2);
///
/// let keywords = store.remove_all("keyword");
/// assert_eq!(keywords[0], Value::from("Flying"));
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store {
    entries: Vec<Entry>,
    #[serde(skip)]
    index: OnceLock<KeyIndex>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: OnceLock::new(),
        }
    }

    /// Number of entries, counting repeated keys separately.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry after all existing ones.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if let Some(index) = self.index.get_mut() {
            index.entry(key.clone()).or_default().push(self.entries.len());
        }
        self.entries.push(Entry {
            key,
            value: value.into(),
        });
    }

    /// First value stored under `key`, of any kind.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        let pos = *self.positions(key).first()?;
        Some(&self.entries[pos].value)
    }

    /// First value stored under `key`, if it has type `T`.
    ///
    /// Returns `None` when the key is missing and also when the first
    /// entry for the key holds a different kind of value.
    #[must_use]
    pub fn get_first<T: FromValue>(&self, key: &str) -> Option<&T> {
        self.get(key).and_then(T::from_ref)
    }

    /// First value under `key` as text.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Check if any entry has this key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        !self.positions(key).is_empty()
    }

    /// All values under `key`, in source order.
    pub fn find_all<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Value> + 'a {
        self.positions(key)
            .iter()
            .map(move |&pos| &self.entries[pos].value)
    }

    /// Remove and return the first value under `key`.
    pub fn remove_first(&mut self, key: &str) -> Option<Value> {
        let pos = *self.positions(key).first()?;
        let entry = self.entries.remove(pos);
        self.index.take();
        Some(entry.value)
    }

    /// Remove and return the first value under `key` if it has type `T`.
    ///
    /// A value of another kind is left in place.
    pub fn take_first<T: FromValue>(&mut self, key: &str) -> Option<T> {
        let pos = *self.positions(key).first()?;
        T::from_ref(&self.entries[pos].value)?;
        let entry = self.entries.remove(pos);
        self.index.take();
        T::from_value(entry.value).ok()
    }

    /// Remove every value under `key`, returning them in source order.
    pub fn remove_all(&mut self, key: &str) -> Vec<Value> {
        if !self.contains_key(key) {
            return Vec::new();
        }

        let (taken, kept): (Vec<Entry>, Vec<Entry>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.key == key);
        self.entries = kept;
        self.index.take();
        taken.into_iter().map(|e| e.value).collect()
    }

    /// A fresh store holding every entry whose key is not in `consumed`.
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn remainder(&self, consumed: &[&str]) -> Store {
        self.entries
            .iter()
            .filter(|e| !consumed.contains(&e.key.as_str()))
            .cloned()
            .collect()
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Iterate over keys in order, repeated keys included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// All entries as a slice.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn positions(&self, key: &str) -> &[usize] {
        self.index
            .get_or_init(|| build_index(&self.entries))
            .get(key)
            .map_or(&[], |p| p.as_slice())
    }
}

fn build_index(entries: &[Entry]) -> KeyIndex {
    let mut index = KeyIndex::default();
    for (pos, entry) in entries.iter().enumerate() {
        index.entry(entry.key.clone()).or_default().push(pos);
    }
    index
}

// The index is a cache; equality only looks at entries.
impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Store {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Store::new();
        store.extend(iter);
        store
    }
}

impl FromIterator<Entry> for Store {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            index: OnceLock::new(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Store {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}

impl IntoIterator for Store {
    type Item = Entry;
    type IntoIter = vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = &'a Entry;
    type IntoIter = slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
