use std::collections::HashSet;

use gitlite_hash::ObjectId;
use gitlite_object::{Commit, ObjectType};
use gitlite_repository::Repository;

use crate::WalkError;

/// Iterator over a commit chain, following only first parents.
///
/// From a starting commit, yields `(id, commit)` pairs and advances to the
/// first `parent` header; the walk ends when a commit has no parent. Merge
/// commits present only their first parent. A revisited id means the on-disk
/// history contains a cycle and ends the walk with an error.
pub struct HistoryWalk<'a> {
    repo: &'a Repository,
    cursor: Option<ObjectId>,
    seen: HashSet<ObjectId>,
}

impl<'a> HistoryWalk<'a> {
    /// Start a walk at the given commit id.
    pub fn new(repo: &'a Repository, start: ObjectId) -> Self {
        Self {
            repo,
            cursor: Some(start),
            seen: HashSet::new(),
        }
    }

    fn step(&mut self, oid: ObjectId) -> Result<(ObjectId, Commit), WalkError> {
        if !self.seen.insert(oid) {
            return Err(WalkError::Cycle(oid.to_hex()));
        }
        let payload = self.repo.read_kind(&oid, ObjectType::Commit)?;
        let commit = Commit::parse(&payload)?;
        self.cursor = commit.first_parent()?;
        Ok((oid, commit))
    }
}

impl Iterator for HistoryWalk<'_> {
    type Item = Result<(ObjectId, Commit), WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.cursor.take()?;
        match self.step(oid) {
            Ok(item) => Some(Ok(item)),
            Err(e) => {
                // A failed step terminates the walk.
                self.cursor = None;
                Some(Err(e))
            }
        }
    }
}
