//! Container access.
//!
//! A package is a set of named entries. How they are stored (zip archive,
//! unpacked directory, memory) is up to the [`Container`] implementation;
//! the loaders only list entries and read them.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use crate::core::{LoadError, LoadResult};
use crate::text::normalize;

/// A source of named package entries.
pub trait Container {
    /// Names of all entries.
    fn entry_names(&self) -> io::Result<Vec<String>>;

    /// Open an entry for reading.
    ///
    /// A missing entry must be reported as [`io::ErrorKind::NotFound`].
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>>;

    /// Read an entry's bytes.
    fn read_bytes(&self, name: &str) -> LoadResult<Vec<u8>> {
        let mut reader = self.open(name).map_err(|e| entry_error(name, e))?;
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| entry_error(name, e))?;
        Ok(bytes)
    }

    /// Read an entry as UTF-8 text with normalized line endings.
    fn read_text(&self, name: &str) -> LoadResult<String> {
        let bytes = self.read_bytes(name)?;
        let text = String::from_utf8(bytes).map_err(|source| LoadError::InvalidText {
            entry: name.to_string(),
            source,
        })?;
        Ok(normalize(&text).into_owned())
    }
}

fn entry_error(name: &str, err: io::Error) -> LoadError {
    if err.kind() == io::ErrorKind::NotFound {
        LoadError::MissingEntry(name.to_string())
    } else {
        LoadError::Io {
            entry: name.to_string(),
            source: err,
        }
    }
}

/// Entries held in memory.
///
/// Useful for tests, and for callers that extract an archive themselves.
#[derive(Clone, Debug, Default)]
pub struct MemoryContainer {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryContainer {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), bytes.into());
    }

    /// Add an entry (builder pattern).
    #[must_use]
    pub fn with_entry(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Container for MemoryContainer {
    fn entry_names(&self) -> io::Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        let bytes = self
            .entries
            .get(name)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))?;
        Ok(Box::new(Cursor::new(bytes.as_slice())))
    }
}

/// Entries stored as files in one directory (an unpacked package).
#[derive(Clone, Debug)]
pub struct DirectoryContainer {
    root: PathBuf,
}

impl DirectoryContainer {
    /// Use `root` as the package directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The package directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Container for DirectoryContainer {
    fn entry_names(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for dir_entry in fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = dir_entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        // Entry names are flat; refuse anything that would leave the root.
        if name.is_empty() || name.contains(|c| c == '/' || c == '\\') || name == ".." {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid entry name {name:?}"),
            ));
        }
        Ok(Box::new(File::open(self.root.join(name))?))
    }
}
