use crate::error::{GitverError, Result};
use crate::git::Repository;
use git2::Oid;
use std::collections::HashMap;

/// Mock implementation of the Repository trait for testing
///
/// Simulates a commit graph without requiring an actual Git repository:
/// commits with their parent lists, tags, and a HEAD pointer are stored in
/// memory. This enables fast, deterministic tests of history traversal
/// without file system operations.
///
/// Tag insertion order is preserved and is the order [Repository::tags]
/// reports, so tests exercising tie-breaking get stable candidate indices.
///
/// ```rust
/// use gitver::git::{MockRepository, Repository};
/// use git2::Oid;
///
/// let root = Oid::from_bytes(&[1; 20]).unwrap();
/// let tip = Oid::from_bytes(&[2; 20]).unwrap();
///
/// let mut repo = MockRepository::new();
/// repo.add_commit(root, &[]);
/// repo.add_commit(tip, &[root]);
/// repo.add_tag("v1.0.0", root);
/// repo.set_head(tip);
///
/// assert_eq!(repo.parents_of(tip).unwrap(), vec![root]);
/// assert_eq!(repo.tags().unwrap(), vec![("v1.0.0".to_string(), root)]);
/// ```
pub struct MockRepository {
    /// Map of commit ids to their parent ids, first parent first
    parents: HashMap<Oid, Vec<Oid>>,
    /// Tags as (name, target commit id), in insertion order
    tags: Vec<(String, Oid)>,
    /// Current HEAD commit, `None` for an unborn branch
    head: Option<Oid>,
}

impl MockRepository {
    /// Create a new empty mock repository with an unborn HEAD.
    pub fn new() -> Self {
        MockRepository {
            parents: HashMap::new(),
            tags: Vec::new(),
            head: None,
        }
    }

    /// Add a commit with the given parents (first parent first).
    ///
    /// # Arguments
    /// * `oid` - Object id of the new commit
    /// * `parents` - Parent commit ids in recorded order
    pub fn add_commit(&mut self, oid: Oid, parents: &[Oid]) {
        self.parents.insert(oid, parents.to_vec());
    }

    /// Add a tag pointing at a commit.
    ///
    /// # Arguments
    /// * `name` - The tag name (e.g. "v1.0.0")
    /// * `oid` - The commit the tag points at
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.push((name.into(), oid));
    }

    /// Point HEAD at a commit.
    pub fn set_head(&mut self, oid: Oid) {
        self.head = Some(oid);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn head_commit(&self) -> Result<Oid> {
        self.head.ok_or(GitverError::UnbornHead)
    }

    fn tags(&self) -> Result<Vec<(String, Oid)>> {
        Ok(self.tags.clone())
    }

    fn parents_of(&self, commit: Oid) -> Result<Vec<Oid>> {
        self.parents.get(&commit).cloned().ok_or_else(|| {
            GitverError::Git(git2::Error::from_str(&format!(
                "commit {} not found",
                commit
            )))
        })
    }
}
