//! Domain logic - pure version rules independent of git operations

pub mod prerelease;
pub mod version;

pub use prerelease::Identifier;
pub use version::{MajorMinor, Version, VersionPart};
