//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the three Git
//! capabilities the resolver needs: the HEAD commit, the tag set, and
//! parent traversal. The concrete implementations are:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory commit graph for testing
//!
//! Code that walks history should depend on the [Repository] trait rather
//! than a concrete implementation, so tests can substitute an in-memory
//! graph without touching the filesystem.
//!
//! ```rust
//! use gitver::git::{MockRepository, Repository};
//! use git2::Oid;
//!
//! let mut repo = MockRepository::new();
//! let root = Oid::from_bytes(&[1; 20]).unwrap();
//! repo.add_commit(root, &[]);
//! repo.add_tag("v1.0.0", root);
//! repo.set_head(root);
//!
//! assert_eq!(repo.head_commit().unwrap(), root);
//! assert!(repo.parents_of(root).unwrap().is_empty());
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Read-only view of a Git repository's commit graph and tags.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying failures (like `git2::Error`) to [crate::error::GitverError]
/// variants; an empty repository reports
/// [crate::error::GitverError::UnbornHead] from [Repository::head_commit].
pub trait Repository {
    /// Get the commit id at HEAD.
    ///
    /// # Returns
    /// * `Ok(Oid)` - Object id of the HEAD commit (detached HEAD included)
    /// * `Err(GitverError::UnbornHead)` - The current branch has no commits
    /// * `Err` - Any other Git error
    fn head_commit(&self) -> Result<Oid>;

    /// Get every tag with its peeled target commit id.
    ///
    /// Annotated tags peel to the tagged commit; lightweight tags point at
    /// it directly. Tags whose target is not a commit are omitted.
    ///
    /// # Returns
    /// * `Ok(Vec<(String, Oid)>)` - (tag name, target commit id) pairs
    /// * `Err` - If there's a Git error
    fn tags(&self) -> Result<Vec<(String, Oid)>>;

    /// Get the parents of a commit in recorded order, first parent first.
    ///
    /// # Arguments
    /// * `commit` - Object id of the commit to inspect
    ///
    /// # Returns
    /// * `Ok(Vec<Oid>)` - Parent commit ids (empty for a root commit)
    /// * `Err` - If the commit doesn't exist or there's a Git error
    fn parents_of(&self, commit: Oid) -> Result<Vec<Oid>>;
}
