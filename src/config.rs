use crate::domain::{Identifier, MajorMinor, VersionPart};
use crate::error::{GitverError, Result};
use std::path::PathBuf;

/// Everything the resolver needs to compute a version.
///
/// The output is a pure function of the repository state and this
/// configuration; there is no ambient input.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Directory the repository is discovered from, walking upwards
    pub work_dir: PathBuf,

    /// Prefix stripped from tag names before parsing (default empty)
    pub tag_prefix: String,

    /// Lower bound applied to the computed (major, minor)
    pub min_major_minor: MajorMinor,

    /// Build metadata attached to the computed version (empty for none)
    pub build_metadata: String,

    /// Version part bumped when commits exist above a release tag
    pub auto_increment: VersionPart,

    /// Pre-release identifiers used when no version tag is found and when
    /// bumping a release
    pub default_pre_release_identifiers: Vec<Identifier>,

    /// Do not fold commit height into the computed version
    pub ignore_height: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            work_dir: PathBuf::from("."),
            tag_prefix: String::new(),
            min_major_minor: MajorMinor::default(),
            build_metadata: String::new(),
            auto_increment: VersionPart::default(),
            default_pre_release_identifiers: default_pre_release_identifiers(),
            ignore_height: false,
        }
    }
}

/// The built-in default pre-release identifiers: `alpha.0`.
pub fn default_pre_release_identifiers() -> Vec<Identifier> {
    vec![
        Identifier::AlphaNumeric("alpha".to_string()),
        Identifier::Numeric(0),
    ]
}

/// Parse a pre-release identifier list from flag text.
///
/// Identifiers may be separated by `.` or `,` (the default `alpha.0` is
/// written with a dot). Every identifier must be valid in a SemVer
/// pre-release.
pub fn parse_identifiers(text: &str) -> Result<Vec<Identifier>> {
    text.split([',', '.'])
        .map(|part| {
            Identifier::parse(part).map_err(|_| {
                GitverError::config(format!(
                    "invalid pre-release identifier '{}' in '{}'",
                    part, text
                ))
            })
        })
        .collect()
}

/// Resolve the default pre-release identifiers from the two flags.
///
/// `--default-pre-release-identifiers` wins; the deprecated
/// `--default-pre-release-phase` produces `<phase>.0`; with neither, the
/// built-in `alpha.0` applies.
pub fn identifiers_from_flags(
    identifiers: Option<&str>,
    phase: Option<&str>,
) -> Result<Vec<Identifier>> {
    if let Some(text) = identifiers {
        return parse_identifiers(text);
    }

    if let Some(phase) = phase {
        let phase = Identifier::parse(phase).map_err(|_| {
            GitverError::config(format!("invalid pre-release phase '{}'", phase))
        })?;
        return Ok(vec![phase, Identifier::Numeric(0)]);
    }

    Ok(default_pre_release_identifiers())
}

impl ResolverConfig {
    /// Build a configuration from raw CLI flag values, validating each.
    #[allow(clippy::too_many_arguments)]
    pub fn from_flags(
        work_dir: PathBuf,
        auto_increment: Option<&str>,
        build_metadata: Option<&str>,
        default_pre_release_identifiers: Option<&str>,
        default_pre_release_phase: Option<&str>,
        ignore_height: bool,
        minimum_major_minor: Option<&str>,
        tag_prefix: Option<&str>,
    ) -> Result<Self> {
        let auto_increment = match auto_increment {
            Some(text) => text.parse()?,
            None => VersionPart::default(),
        };

        let min_major_minor = match minimum_major_minor {
            Some(text) => text.parse()?,
            None => MajorMinor::default(),
        };

        Ok(ResolverConfig {
            work_dir,
            tag_prefix: tag_prefix.unwrap_or("").to_string(),
            min_major_minor,
            build_metadata: build_metadata.unwrap_or("").to_string(),
            auto_increment,
            default_pre_release_identifiers: identifiers_from_flags(
                default_pre_release_identifiers,
                default_pre_release_phase,
            )?,
            ignore_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.work_dir, PathBuf::from("."));
        assert_eq!(config.tag_prefix, "");
        assert_eq!(config.min_major_minor, MajorMinor::new(0, 0));
        assert_eq!(config.auto_increment, VersionPart::Patch);
        assert!(!config.ignore_height);
        assert_eq!(
            config.default_pre_release_identifiers,
            default_pre_release_identifiers()
        );
    }

    #[test]
    fn test_parse_identifiers_dot_separated() {
        let ids = parse_identifiers("alpha.0").unwrap();
        assert_eq!(ids, default_pre_release_identifiers());
    }

    #[test]
    fn test_parse_identifiers_comma_separated() {
        let ids = parse_identifiers("beta,1").unwrap();
        assert_eq!(
            ids,
            vec![
                Identifier::AlphaNumeric("beta".to_string()),
                Identifier::Numeric(1)
            ]
        );
    }

    #[test]
    fn test_parse_identifiers_invalid() {
        assert!(parse_identifiers("").is_err());
        assert!(parse_identifiers("alpha..0").is_err());
        assert!(parse_identifiers("01").is_err());
        assert!(parse_identifiers("pre_view").is_err());
    }

    #[test]
    fn test_identifiers_flag_wins_over_phase() {
        let ids = identifiers_from_flags(Some("rc.1"), Some("preview")).unwrap();
        assert_eq!(
            ids,
            vec![
                Identifier::AlphaNumeric("rc".to_string()),
                Identifier::Numeric(1)
            ]
        );
    }

    #[test]
    fn test_phase_produces_phase_dot_zero() {
        let ids = identifiers_from_flags(None, Some("preview")).unwrap();
        assert_eq!(
            ids,
            vec![
                Identifier::AlphaNumeric("preview".to_string()),
                Identifier::Numeric(0)
            ]
        );
    }

    #[test]
    fn test_phase_invalid() {
        assert!(identifiers_from_flags(None, Some("pre.view")).is_err());
        assert!(identifiers_from_flags(None, Some("")).is_err());
    }

    #[test]
    fn test_neither_flag_uses_builtin_default() {
        let ids = identifiers_from_flags(None, None).unwrap();
        assert_eq!(ids, default_pre_release_identifiers());
    }

    #[test]
    fn test_from_flags() {
        let config = ResolverConfig::from_flags(
            PathBuf::from("/some/dir"),
            Some("minor"),
            Some("abc.def"),
            None,
            None,
            true,
            Some("2.0"),
            Some("v"),
        )
        .unwrap();

        assert_eq!(config.auto_increment, VersionPart::Minor);
        assert_eq!(config.build_metadata, "abc.def");
        assert_eq!(config.min_major_minor, MajorMinor::new(2, 0));
        assert_eq!(config.tag_prefix, "v");
        assert!(config.ignore_height);
    }

    #[test]
    fn test_from_flags_invalid_values() {
        let invalid_increment = ResolverConfig::from_flags(
            PathBuf::from("."),
            Some("mega"),
            None,
            None,
            None,
            false,
            None,
            None,
        );
        assert!(invalid_increment.is_err());

        let invalid_minimum = ResolverConfig::from_flags(
            PathBuf::from("."),
            None,
            None,
            None,
            None,
            false,
            Some("2"),
            None,
        );
        assert!(invalid_minimum.is_err());
    }
}
