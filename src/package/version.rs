//! Package names and versions.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A package name with its version string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageVersion {
    pub name: String,
    pub version: String,
}

impl PackageVersion {
    /// Create a package version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Can something built against `self` use `available`?
    ///
    /// True when both name the same package (ASCII case-insensitive) and
    /// `available` is at least as new as `self`.
    #[must_use]
    pub fn compatible_with(&self, available: &PackageVersion) -> bool {
        self.name.eq_ignore_ascii_case(&available.name)
            && compare_versions(&self.version, &available.version) != Ordering::Greater
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Compare version strings component by component.
///
/// Components are separated by `.` or `-`. Two numeric components compare
/// as numbers, anything else compares as text. A version that is a prefix
/// of another is older (`2.0` < `2.0.1`).
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let is_sep = |c: char| c == '.' || c == '-';
    let mut left = a.trim().split(is_sep);
    let mut right = b.trim().split(is_sep);

    loop {
        let ord = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(x), Some(y)) => match (x.parse::<u64>(), y.parse::<u64>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            },
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}
