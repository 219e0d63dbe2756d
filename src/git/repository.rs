use crate::error::{GitverError, Result};
use git2::{ErrorCode, ObjectType, Oid, Repository as Git2Repo};
use std::path::Path;

/// Concrete implementation of the Repository trait using the git2 library
///
/// Wraps `git2::Repository` and maps its errors onto `GitverError`. The
/// handle is read-only for our purposes: nothing here writes to the
/// repository or talks to a remote.
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Discover and open the repository containing `path`.
    ///
    /// Probes `path` for a `.git` entry and walks up parent directories
    /// until one is found or the filesystem root is exceeded.
    ///
    /// # Arguments
    /// * `path` - Directory to start the discovery from
    ///
    /// # Returns
    /// * `Ok(Some(Git2Repository))` - Successfully opened repository
    /// * `Ok(None)` - No ancestor of `path` is a Git repository
    /// * `Err` - The probe itself failed (I/O, permissions, corruption)
    pub fn try_open<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        match Git2Repo::discover(path) {
            Ok(repo) => Ok(Some(Git2Repository { repo })),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitverError::Git(e)),
        }
    }

    /// Wrap an existing git2::Repository.
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn head_commit(&self) -> Result<Oid> {
        match self.repo.head() {
            Ok(head) => Ok(head.peel_to_commit().map_err(GitverError::Git)?.id()),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Err(GitverError::UnbornHead)
            }
            Err(e) => Err(GitverError::Git(e)),
        }
    }

    fn tags(&self) -> Result<Vec<(String, Oid)>> {
        let names = self.repo.tag_names(None)?;

        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(reference) => reference,
                Err(_) => continue,
            };

            // Annotated tags peel through the tag object to the commit;
            // tags on trees or blobs are not version-bearing.
            if let Ok(target) = reference.peel(ObjectType::Commit) {
                tags.push((name.to_string(), target.id()));
            }
        }

        Ok(tags)
    }

    fn parents_of(&self, commit: Oid) -> Result<Vec<Oid>> {
        let commit = self.repo.find_commit(commit)?;
        Ok(commit.parent_ids().collect())
    }
}
