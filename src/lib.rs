pub mod analyzer;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logger;
pub mod resolver;

pub use config::ResolverConfig;
pub use domain::{MajorMinor, Version, VersionPart};
pub use error::{GitverError, Result};
pub use logger::{Level, Logger};
