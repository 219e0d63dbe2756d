//! Version resolution: orchestrates the Git adapter, the candidate search
//! and the version derivation into a single result.
//!
//! The repository handle is scoped to candidate selection; every
//! derivation step (height folding, build metadata, minimum floor) runs on
//! plain values after the handle is released.

use crate::analyzer::{find_candidates, Candidate, TagVersion};
use crate::config::ResolverConfig;
use crate::domain::Version;
use crate::error::{GitverError, Result};
use crate::git::{Git2Repository, Repository};
use crate::logger::{Level, Logger};

/// Compute the version for the repository containing `config.work_dir`.
///
/// A directory outside any Git repository and a repository whose HEAD has
/// no commits are first-class outcomes, not errors: both produce the
/// default pre-release version (with a warn and an info diagnostic
/// respectively). Configuration problems and Git I/O failures are fatal.
pub fn resolve(config: &ResolverConfig, log: &dyn Logger) -> Result<Version> {
    let candidate = match Git2Repository::try_open(&config.work_dir)? {
        Some(repo) => select_candidate(&repo, config, log)?,
        None => {
            log.warn(&format!(
                "'{}' is not in a Git repository, using default version {}",
                config.work_dir.display(),
                Version::initial(&config.default_pre_release_identifiers)
            ));
            None
        }
    };

    derive_version(candidate, config, log)
}

/// As [resolve], but over an already-open repository (any [Repository]
/// implementation, including [crate::git::MockRepository]).
pub fn resolve_with_repository<R: Repository>(
    repo: &R,
    config: &ResolverConfig,
    log: &dyn Logger,
) -> Result<Version> {
    let candidate = select_candidate(repo, config, log)?;
    derive_version(candidate, config, log)
}

/// Find and rank candidates, returning the winning one.
///
/// Returns `None` when HEAD is unborn or history yields nothing to rank;
/// the caller falls back to the default version. Ranking sorts by
/// `(version ascending, index descending)` and takes the last element:
/// the highest version wins, and among equal versions the
/// earliest-discovered candidate - the one nearest HEAD in first-parent
/// discovery order - wins.
pub fn select_candidate<R: Repository>(
    repo: &R,
    config: &ResolverConfig,
    log: &dyn Logger,
) -> Result<Option<Candidate>> {
    let head = match repo.head_commit() {
        Ok(head) => head,
        Err(GitverError::UnbornHead) => {
            log.info(&format!(
                "HEAD has no commits, using default version {}",
                Version::initial(&config.default_pre_release_identifiers)
            ));
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let tag_versions = index_tags(repo.tags()?, &config.tag_prefix, log);
    let mut candidates = find_candidates(
        repo,
        head,
        &tag_versions,
        &config.default_pre_release_identifiers,
        log,
    )?;

    candidates.sort_by(|a, b| a.version.cmp(&b.version).then_with(|| b.index.cmp(&a.index)));

    let selected = match candidates.pop() {
        Some(candidate) => candidate,
        None => return Ok(None),
    };

    if selected.tag.is_empty() {
        log.info(&format!(
            "no version tag found in history, using default version {}",
            selected.version
        ));
    }
    if log.enabled(Level::Debug) {
        log.debug(&format!("selected {}", selected));
    }

    Ok(Some(selected))
}

/// Parse tag names against the configured prefix into the tag-version
/// index. Non-parsing tags are dropped with a debug diagnostic.
fn index_tags(
    tags: Vec<(String, git2::Oid)>,
    tag_prefix: &str,
    log: &dyn Logger,
) -> Vec<TagVersion> {
    let mut tag_versions = Vec::new();
    for (name, commit) in tags {
        match Version::from_tag(&name, tag_prefix) {
            Some(version) => tag_versions.push(TagVersion {
                name,
                commit,
                version,
            }),
            None => {
                if log.enabled(Level::Debug) {
                    log.debug(&format!(
                        "ignoring tag '{}' (not a SemVer 2.0 version with prefix '{}')",
                        name, tag_prefix
                    ));
                }
            }
        }
    }
    tag_versions
}

/// Fold the selected candidate into the final version: height, then build
/// metadata, then the minimum major.minor floor.
fn derive_version(
    candidate: Option<Candidate>,
    config: &ResolverConfig,
    log: &dyn Logger,
) -> Result<Version> {
    let version = match candidate {
        Some(candidate) => {
            if config.ignore_height || candidate.height == 0 {
                candidate.version
            } else {
                candidate.version.with_height(
                    candidate.height,
                    config.auto_increment,
                    &config.default_pre_release_identifiers,
                )
            }
        }
        None => Version::initial(&config.default_pre_release_identifiers),
    };

    let version = version.with_build_metadata(&config.build_metadata)?;

    let satisfied = version.satisfying(
        config.min_major_minor,
        &config.default_pre_release_identifiers,
    );
    if satisfied != version {
        log.warn(&format!(
            "computed version {} is below the minimum {}, using {}",
            version, config.min_major_minor, satisfied
        ));
    }

    Ok(satisfied)
}
