//! Packages: containers, sets, and games.
//!
//! ## Key Types
//!
//! - `Container`: named entries (`MemoryContainer`, `DirectoryContainer`)
//! - `Set`: a decoded set package
//! - `Game`: a decoded game package header
//! - `PackageVersion`: package name and version, with compatibility checks

pub mod container;
pub mod game;
pub mod set;
pub mod version;

pub use container::{Container, DirectoryContainer, MemoryContainer};
pub use game::{expand_includes, Game};
pub use set::Set;
pub use version::{compare_versions, PackageVersion};
