use crate::domain::{Identifier, Version};
use crate::error::Result;
use crate::git::Repository;
use crate::logger::{Level, Logger};
use git2::Oid;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A tag whose name parsed as a version, with its target commit.
#[derive(Debug, Clone)]
pub struct TagVersion {
    pub name: String,
    pub commit: Oid,
    pub version: Version,
}

/// A version source found in history, considered for selection.
///
/// `tag` is empty when the candidate was synthesized at a root commit
/// reached without any version tag. `index` is the insertion order within
/// one search and is the deterministic tie-breaker between candidates
/// carrying equal versions.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub commit: Oid,
    pub height: u64,
    pub tag: String,
    pub version: Version,
    pub index: usize,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let commit = self.commit.to_string();
        let short = &commit[..commit.len().min(7)];
        if self.tag.is_empty() {
            write!(f, "{} at {} (height {}, no tag)", self.version, short, self.height)
        } else {
            write!(
                f,
                "{} at {} (tag '{}', height {})",
                self.version, short, self.tag, self.height
            )
        }
    }
}

/// Walk ancestors of `head` and collect version candidates.
///
/// The traversal is depth-first over a LIFO frontier, pushing parents in
/// reverse recorded order so the first parent is explored first. A commit
/// carrying version tags yields one candidate per tag and is not descended
/// into; a root commit reached without any version tag yields a synthetic
/// candidate one edge further down, over `default_pre_release_identifiers`.
///
/// Heights are edge counts along the discovery path. Each commit is
/// processed at most once, so the search terminates and the candidate list
/// (including indices) is identical for identical inputs.
pub fn find_candidates<R: Repository>(
    repo: &R,
    head: Oid,
    tag_versions: &[TagVersion],
    default_pre_release_identifiers: &[Identifier],
    log: &dyn Logger,
) -> Result<Vec<Candidate>> {
    let mut by_commit: HashMap<Oid, Vec<&TagVersion>> = HashMap::new();
    for tag_version in tag_versions {
        by_commit
            .entry(tag_version.commit)
            .or_default()
            .push(tag_version);
    }

    let mut candidates: Vec<Candidate> = Vec::new();
    let mut visited: HashSet<Oid> = HashSet::new();
    let mut frontier: Vec<(Oid, u64)> = vec![(head, 0)];

    while let Some((commit, height)) = frontier.pop() {
        if !visited.insert(commit) {
            continue;
        }

        if let Some(tagged) = by_commit.get(&commit) {
            for tag_version in tagged {
                let candidate = Candidate {
                    commit,
                    height,
                    tag: tag_version.name.clone(),
                    version: tag_version.version.clone(),
                    index: candidates.len(),
                };
                if log.enabled(Level::Debug) {
                    log.debug(&format!("found {}", candidate));
                }
                candidates.push(candidate);
            }
            continue;
        }

        let parents = repo.parents_of(commit)?;
        if parents.is_empty() {
            // The untagged root itself counts as one step: the synthetic
            // candidate sits beneath it, so a single-commit history has
            // height 1.
            let candidate = Candidate {
                commit,
                height: height + 1,
                tag: String::new(),
                version: Version::initial(default_pre_release_identifiers),
                index: candidates.len(),
            };
            if log.enabled(Level::Debug) {
                log.debug(&format!("found {}", candidate));
            }
            candidates.push(candidate);
        } else {
            for parent in parents.into_iter().rev() {
                frontier.push((parent, height + 1));
            }
        }
    }

    if log.enabled(Level::Trace) {
        log.trace(&format!(
            "walked {} commits, found {} candidates",
            visited.len(),
            candidates.len()
        ));
    }

    Ok(candidates)
}
