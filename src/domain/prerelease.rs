//! Pre-release identifier handling for semantic versioning
//!
//! A pre-release is a dot-separated sequence of identifiers, each either
//! numeric (no leading zeros) or alphanumeric.
//! According to semver.org: https://semver.org/#spec-item-9

use crate::error::{GitverError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A single pre-release identifier.
///
/// Numeric identifiers carry no leading zeros and compare numerically;
/// alphanumeric identifiers compare by ASCII byte order and always rank
/// above any numeric identifier (semver.org spec item 11).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// All-digit identifier, e.g. the "1" in "beta.1"
    Numeric(u64),
    /// Identifier containing at least one letter or hyphen, e.g. "beta"
    AlphaNumeric(String),
}

impl Identifier {
    /// Parse a single pre-release identifier.
    ///
    /// Accepts `[0-9A-Za-z-]+`; an all-digit identifier must not have a
    /// leading zero and becomes [Identifier::Numeric].
    ///
    /// # Arguments
    /// * `s` - String to parse
    ///
    /// # Returns
    /// * `Ok(Identifier)` - Parsed identifier
    /// * `Err` - If the string is empty, non-ASCII, has a leading zero, or
    ///   contains characters outside `[0-9A-Za-z-]`
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Whether this identifier is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Identifier::Numeric(_))
    }
}

impl FromStr for Identifier {
    type Err = GitverError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(GitverError::version("empty pre-release identifier"));
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
            return Err(GitverError::version(format!(
                "invalid pre-release identifier: '{}'",
                s
            )));
        }

        if s.bytes().all(|b| b.is_ascii_digit()) {
            if s.len() > 1 && s.starts_with('0') {
                return Err(GitverError::version(format!(
                    "numeric pre-release identifier has a leading zero: '{}'",
                    s
                )));
            }
            let value = s.parse::<u64>().map_err(|_| {
                GitverError::version(format!("numeric pre-release identifier too large: '{}'", s))
            })?;
            Ok(Identifier::Numeric(value))
        } else {
            Ok(Identifier::AlphaNumeric(s.to_string()))
        }
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => a.cmp(b),
            (Identifier::Numeric(_), Identifier::AlphaNumeric(_)) => Ordering::Less,
            (Identifier::AlphaNumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::AlphaNumeric(a), Identifier::AlphaNumeric(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// Render a dot-joined identifier sequence, e.g. `["alpha", 0]` -> "alpha.0".
pub fn join(identifiers: &[Identifier]) -> String {
    identifiers
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
