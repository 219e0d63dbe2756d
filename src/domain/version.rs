use crate::domain::prerelease::{self, Identifier};
use crate::error::{GitverError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

// The semver.org 2.0 reference grammar, restricted to ASCII digit classes.
const VERSION_PATTERN: &str = r"^(?P<major>0|[1-9][0-9]*)\.(?P<minor>0|[1-9][0-9]*)\.(?P<patch>0|[1-9][0-9]*)(?:-(?P<pre>(?:0|[1-9][0-9]*|[0-9]*[A-Za-z-][0-9A-Za-z-]*)(?:\.(?:0|[1-9][0-9]*|[0-9]*[A-Za-z-][0-9A-Za-z-]*))*))?(?:\+(?P<build>[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version pattern is well-formed"))
}

/// Semantic version representation per SemVer 2.0
///
/// Equality and ordering implement spec item 11 precedence: build metadata
/// never participates, and a pre-release ranks below the release with the
/// same major.minor.patch. All derivation operators return new values.
#[derive(Debug, Clone)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Vec<Identifier>,
    pub build_metadata: Vec<String>,
}

impl Version {
    /// Create a release version with no pre-release and no build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre_release: Vec::new(),
            build_metadata: Vec::new(),
        }
    }

    /// The version used when history carries no version tag: a 0.0.0
    /// pre-release over the given identifiers (a release 0.0.0 when the
    /// identifier list is empty).
    pub fn initial(pre_release: &[Identifier]) -> Self {
        Version {
            major: 0,
            minor: 0,
            patch: 0,
            pre_release: pre_release.to_vec(),
            build_metadata: Vec::new(),
        }
    }

    /// Parse a SemVer 2.0 string.
    ///
    /// The grammar is exact: no leading 'v', no leading zeros on numeric
    /// identifiers, no empty identifiers, ASCII only.
    pub fn parse(text: &str) -> Result<Self> {
        let captures = version_regex().captures(text).ok_or_else(|| {
            GitverError::version(format!("'{}' is not a valid SemVer 2.0 version", text))
        })?;

        let number = |name: &str| -> Result<u64> {
            captures[name].parse::<u64>().map_err(|_| {
                GitverError::version(format!(
                    "version component '{}' in '{}' is too large",
                    &captures[name], text
                ))
            })
        };

        let pre_release = match captures.name("pre") {
            Some(m) => m
                .as_str()
                .split('.')
                .map(Identifier::parse)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        let build_metadata = match captures.name("build") {
            Some(m) => m.as_str().split('.').map(|s| s.to_string()).collect(),
            None => Vec::new(),
        };

        Ok(Version {
            major: number("major")?,
            minor: number("minor")?,
            patch: number("patch")?,
            pre_release,
            build_metadata,
        })
    }

    /// Parse a tag name as a version.
    ///
    /// The name must begin with `tag_prefix` (the empty prefix matches
    /// anything); the remainder must be a SemVer 2.0 version. Returns
    /// `None` for names that do not qualify - the caller decides whether
    /// that is worth a diagnostic.
    pub fn from_tag(tag: &str, tag_prefix: &str) -> Option<Self> {
        let rest = tag.strip_prefix(tag_prefix)?;
        Self::parse(rest).ok()
    }

    /// Whether this version carries pre-release identifiers.
    pub fn is_pre_release(&self) -> bool {
        !self.pre_release.is_empty()
    }

    /// Fold a commit height into the version.
    ///
    /// Height 0 returns the version unchanged. A pre-release gains the
    /// height as one more numeric identifier. A release is bumped at
    /// `auto_increment`, gains `default_pre_release_identifiers`, and then
    /// the height. Build metadata does not survive a non-zero fold; the
    /// resolver reattaches it afterwards.
    pub fn with_height(
        &self,
        height: u64,
        auto_increment: VersionPart,
        default_pre_release_identifiers: &[Identifier],
    ) -> Self {
        if height == 0 {
            return self.clone();
        }

        if self.is_pre_release() {
            let mut pre_release = self.pre_release.clone();
            pre_release.push(Identifier::Numeric(height));
            return Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch,
                pre_release,
                build_metadata: Vec::new(),
            };
        }

        let (major, minor, patch) = match auto_increment {
            VersionPart::Major => (self.major + 1, 0, 0),
            VersionPart::Minor => (self.major, self.minor + 1, 0),
            VersionPart::Patch => (self.major, self.minor, self.patch + 1),
        };

        let mut pre_release = default_pre_release_identifiers.to_vec();
        pre_release.push(Identifier::Numeric(height));

        Version {
            major,
            minor,
            patch,
            pre_release,
            build_metadata: Vec::new(),
        }
    }

    /// Replace the build metadata with the dot-split identifiers of `text`.
    ///
    /// An empty `text` is a no-op. Each identifier must match
    /// `[0-9A-Za-z-]+` (leading zeros are allowed in build metadata).
    pub fn with_build_metadata(&self, text: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(self.clone());
        }

        let mut build_metadata = Vec::new();
        for identifier in text.split('.') {
            if identifier.is_empty()
                || !identifier
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-')
            {
                return Err(GitverError::build_metadata(format!(
                    "'{}' - identifiers must be non-empty and limited to [0-9A-Za-z-]",
                    text
                )));
            }
            build_metadata.push(identifier.to_string());
        }

        Ok(Version {
            build_metadata,
            ..self.clone()
        })
    }

    /// Raise the version to a minimum major.minor floor.
    ///
    /// A version at or above the floor is returned unchanged (build
    /// metadata included). Below it, the result is `min.major.min.minor.0`
    /// with the default identifiers as pre-release and no build metadata -
    /// metadata attached to the unraised version would misstate what was
    /// built.
    pub fn satisfying(
        &self,
        min: MajorMinor,
        default_pre_release_identifiers: &[Identifier],
    ) -> Self {
        if (self.major, self.minor) >= (min.major, min.minor) {
            return self.clone();
        }

        Version {
            major: min.major,
            minor: min.minor,
            patch: 0,
            pre_release: default_pre_release_identifiers.to_vec(),
            build_metadata: Vec::new(),
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(
                || match (self.pre_release.is_empty(), other.pre_release.is_empty()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => self.pre_release.cmp(&other.pre_release),
                },
            )
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", prerelease::join(&self.pre_release))?;
        }
        if !self.build_metadata.is_empty() {
            write!(f, "+{}", self.build_metadata.join("."))?;
        }
        Ok(())
    }
}

/// Version part incremented when commits exist above the base version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionPart {
    Major,
    Minor,
    #[default]
    Patch,
}

impl FromStr for VersionPart {
    type Err = GitverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(VersionPart::Major),
            "minor" => Ok(VersionPart::Minor),
            "patch" => Ok(VersionPart::Patch),
            other => Err(GitverError::config(format!(
                "unknown auto-increment part '{}' - expected major, minor or patch",
                other
            ))),
        }
    }
}

/// Lower-bound gate on (major, minor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MajorMinor {
    pub major: u64,
    pub minor: u64,
}

impl MajorMinor {
    pub fn new(major: u64, minor: u64) -> Self {
        MajorMinor { major, minor }
    }
}

impl FromStr for MajorMinor {
    type Err = GitverError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 2 {
            return Err(GitverError::config(format!(
                "invalid minimum major.minor '{}' - expected a pair like 2.0",
                s
            )));
        }

        let number = |part: &str| -> Result<u64> {
            part.parse::<u64>().map_err(|_| {
                GitverError::config(format!("invalid minimum major.minor component '{}'", part))
            })
        };

        Ok(MajorMinor {
            major: number(parts[0])?,
            minor: number(parts[1])?,
        })
    }
}

impl fmt::Display for MajorMinor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Version {
        Version::parse(text).unwrap()
    }

    fn alpha_zero() -> Vec<Identifier> {
        vec![
            Identifier::AlphaNumeric("alpha".to_string()),
            Identifier::Numeric(0),
        ]
    }

    #[test]
    fn test_parse_release() {
        let version = v("1.2.3");
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 2);
        assert_eq!(version.patch, 3);
        assert!(version.pre_release.is_empty());
        assert!(version.build_metadata.is_empty());
    }

    #[test]
    fn test_parse_pre_release_and_build() {
        let version = v("1.0.0-beta.1+exp.sha-5114f85");
        assert_eq!(
            version.pre_release,
            vec![
                Identifier::AlphaNumeric("beta".to_string()),
                Identifier::Numeric(1)
            ]
        );
        assert_eq!(
            version.build_metadata,
            vec!["exp".to_string(), "sha-5114f85".to_string()]
        );
    }

    #[test]
    fn test_parse_rejects_v_prefix() {
        assert!(Version::parse("v1.2.3").is_err());
        assert!(Version::parse("V1.2.3").is_err());
    }

    #[test]
    fn test_parse_rejects_leading_zeros() {
        assert!(Version::parse("01.2.3").is_err());
        assert!(Version::parse("1.02.3").is_err());
        assert!(Version::parse("1.2.03").is_err());
        assert!(Version::parse("1.2.3-01").is_err());
    }

    #[test]
    fn test_parse_allows_leading_zeros_in_build_metadata() {
        let version = v("1.2.3+001");
        assert_eq!(version.build_metadata, vec!["001".to_string()]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
        assert!(Version::parse("1.2.3-").is_err());
        assert!(Version::parse("1.2.3-a..b").is_err());
        assert!(Version::parse("1.2.3+").is_err());
        assert!(Version::parse("1.2.3-caf\u{e9}").is_err());
        assert!(Version::parse(" 1.2.3").is_err());
        assert!(Version::parse("").is_err());
    }

    #[test]
    fn test_render_round_trip() {
        let inputs = [
            "0.0.0",
            "1.2.3",
            "10.20.30",
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-0.3.7",
            "1.0.0-x-y-z.--",
            "1.2.3+meta",
            "1.2.3+meta.001",
            "1.0.0-beta.11+exp.sha-5114f85",
        ];
        for input in inputs {
            assert_eq!(v(input).to_string(), input);
        }
    }

    #[test]
    fn test_from_tag_with_prefix() {
        assert_eq!(Version::from_tag("v1.2.3", "v"), Some(v("1.2.3")));
        assert_eq!(Version::from_tag("1.2.3", ""), Some(v("1.2.3")));
        assert_eq!(Version::from_tag("release-2.0.0", "release-"), Some(v("2.0.0")));
    }

    #[test]
    fn test_from_tag_rejects_missing_prefix() {
        assert_eq!(Version::from_tag("1.2.3", "v"), None);
        assert_eq!(Version::from_tag("v1.2.3", ""), None);
        assert_eq!(Version::from_tag("not-a-version", ""), None);
    }

    #[test]
    fn test_precedence_chain() {
        // The worked example from semver.org spec item 11
        let chain = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
        ];
        for pair in chain.windows(2) {
            assert!(
                v(pair[0]) < v(pair[1]),
                "{} should be lower than {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_major_minor_patch_precedence() {
        assert!(v("1.0.0") < v("2.0.0"));
        assert!(v("2.0.0") < v("2.1.0"));
        assert!(v("2.1.0") < v("2.1.1"));
    }

    #[test]
    fn test_build_metadata_ignored_in_precedence() {
        assert_eq!(v("1.2.3"), v("1.2.3+build.42"));
        assert_eq!(
            v("1.2.3+a").cmp(&v("1.2.3+b")),
            std::cmp::Ordering::Equal
        );
        assert_eq!(v("1.0.0-alpha+001"), v("1.0.0-alpha+999"));
    }

    #[test]
    fn test_with_height_zero_is_identity() {
        let version = v("1.2.3-beta.1+meta");
        let folded = version.with_height(0, VersionPart::Patch, &alpha_zero());
        assert_eq!(folded.to_string(), "1.2.3-beta.1+meta");
    }

    #[test]
    fn test_with_height_appends_to_pre_release() {
        let version = v("1.2.3-beta.1");
        let folded = version.with_height(4, VersionPart::Minor, &alpha_zero());
        assert_eq!(folded.to_string(), "1.2.3-beta.1.4");
    }

    #[test]
    fn test_with_height_bumps_release() {
        let version = v("1.2.3");
        assert_eq!(
            version
                .with_height(2, VersionPart::Patch, &alpha_zero())
                .to_string(),
            "1.2.4-alpha.0.2"
        );
        assert_eq!(
            version
                .with_height(2, VersionPart::Minor, &alpha_zero())
                .to_string(),
            "1.3.0-alpha.0.2"
        );
        assert_eq!(
            version
                .with_height(2, VersionPart::Major, &alpha_zero())
                .to_string(),
            "2.0.0-alpha.0.2"
        );
    }

    #[test]
    fn test_with_height_empty_default_identifiers() {
        let version = v("1.2.3");
        let folded = version.with_height(5, VersionPart::Patch, &[]);
        assert_eq!(folded.to_string(), "1.2.4-5");
    }

    #[test]
    fn test_with_height_drops_build_metadata() {
        let version = v("1.2.3+meta");
        let folded = version.with_height(1, VersionPart::Patch, &alpha_zero());
        assert_eq!(folded.to_string(), "1.2.4-alpha.0.1");
    }

    #[test]
    fn test_with_build_metadata() {
        let version = v("1.2.3").with_build_metadata("abc.def").unwrap();
        assert_eq!(version.to_string(), "1.2.3+abc.def");
    }

    #[test]
    fn test_with_build_metadata_empty_is_noop() {
        let version = v("1.2.3").with_build_metadata("").unwrap();
        assert_eq!(version.to_string(), "1.2.3");
    }

    #[test]
    fn test_with_build_metadata_invalid() {
        assert!(v("1.2.3").with_build_metadata("a..b").is_err());
        assert!(v("1.2.3").with_build_metadata("a_b").is_err());
        assert!(v("1.2.3").with_build_metadata(".").is_err());
    }

    #[test]
    fn test_satisfying_at_or_above_floor() {
        let version = v("2.1.0+meta");
        let raised = version.satisfying(MajorMinor::new(2, 0), &alpha_zero());
        assert_eq!(raised.to_string(), "2.1.0+meta");

        let exact = v("2.0.0").satisfying(MajorMinor::new(2, 0), &alpha_zero());
        assert_eq!(exact.to_string(), "2.0.0");
    }

    #[test]
    fn test_satisfying_below_floor() {
        let version = v("1.9.7+meta");
        let raised = version.satisfying(MajorMinor::new(2, 0), &alpha_zero());
        assert_eq!(raised.to_string(), "2.0.0-alpha.0");
    }

    #[test]
    fn test_satisfying_below_floor_empty_identifiers() {
        let raised = v("0.1.0").satisfying(MajorMinor::new(1, 0), &[]);
        assert_eq!(raised.to_string(), "1.0.0");
    }

    #[test]
    fn test_satisfying_same_major_lower_minor() {
        let raised = v("2.1.0").satisfying(MajorMinor::new(2, 5), &alpha_zero());
        assert_eq!(raised.to_string(), "2.5.0-alpha.0");
    }

    #[test]
    fn test_initial() {
        assert_eq!(Version::initial(&alpha_zero()).to_string(), "0.0.0-alpha.0");
        assert_eq!(Version::initial(&[]).to_string(), "0.0.0");
    }

    #[test]
    fn test_version_part_parse() {
        assert_eq!("major".parse::<VersionPart>().unwrap(), VersionPart::Major);
        assert_eq!("MINOR".parse::<VersionPart>().unwrap(), VersionPart::Minor);
        assert_eq!("patch".parse::<VersionPart>().unwrap(), VersionPart::Patch);
        assert!("nano".parse::<VersionPart>().is_err());
        assert_eq!(VersionPart::default(), VersionPart::Patch);
    }

    #[test]
    fn test_major_minor_parse() {
        assert_eq!("2.0".parse::<MajorMinor>().unwrap(), MajorMinor::new(2, 0));
        assert_eq!(
            "10.42".parse::<MajorMinor>().unwrap(),
            MajorMinor::new(10, 42)
        );
        assert!("2".parse::<MajorMinor>().is_err());
        assert!("2.0.0".parse::<MajorMinor>().is_err());
        assert!("a.b".parse::<MajorMinor>().is_err());
        assert!("".parse::<MajorMinor>().is_err());
    }

    #[test]
    fn test_major_minor_display() {
        assert_eq!(MajorMinor::new(2, 0).to_string(), "2.0");
    }
}
