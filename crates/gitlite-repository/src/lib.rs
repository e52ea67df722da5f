//! Repository discovery, initialization, and central access for the gitlite
//! subsystems.
//!
//! A repository is a pair `(worktree, gitdir)` with `gitdir = worktree/.git`.
//! The handle owns the loose object store and the ref store and is passed
//! explicitly to every operation; there is no global state.

mod discover;
mod error;
mod init;
mod worktree;

pub use error::RepoError;
pub use worktree::IgnorePredicate;

use std::path::{Path, PathBuf};

use gitlite_hash::ObjectId;
use gitlite_loose::LooseObjectStore;
use gitlite_object::ObjectType;
use gitlite_ref::FilesRefStore;

pub struct Repository {
    /// Root of the working tree.
    work_tree: PathBuf,
    /// Path to the .git directory.
    git_dir: PathBuf,
    /// Loose object store under `.git/objects`.
    store: LooseObjectStore,
    /// Reference store over `.git`.
    refs: FilesRefStore,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("work_tree", &self.work_tree)
            .field("git_dir", &self.git_dir)
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Open an existing repository whose working tree root is `path`.
    ///
    /// Fails with [`RepoError::NotARepository`] if `path/.git` does not
    /// exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let work_tree = absolutize(path.as_ref())?;
        let git_dir = work_tree.join(".git");
        if !git_dir.is_dir() {
            return Err(RepoError::NotARepository(work_tree));
        }
        Ok(Self::from_parts(work_tree, git_dir))
    }

    /// Discover a repository starting from `start`, climbing parent
    /// directories until one contains `.git`.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, RepoError> {
        let work_tree = discover::discover_work_tree(start.as_ref())?;
        let git_dir = work_tree.join(".git");
        Ok(Self::from_parts(work_tree, git_dir))
    }

    /// Initialize a new repository at `path` and open it.
    ///
    /// Re-initializing an existing repository is a safe no-op.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let work_tree = absolutize(path.as_ref())?;
        let git_dir = work_tree.join(".git");
        init::init_repository(&git_dir)?;
        Ok(Self::from_parts(work_tree, git_dir))
    }

    fn from_parts(work_tree: PathBuf, git_dir: PathBuf) -> Self {
        let store = LooseObjectStore::open(git_dir.join("objects"));
        let refs = FilesRefStore::new(&git_dir);
        Self {
            work_tree,
            git_dir,
            store,
            refs,
        }
    }

    /// Root of the working tree.
    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    /// Path to the .git directory.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// The loose object store.
    pub fn store(&self) -> &LooseObjectStore {
        &self.store
    }

    /// The reference store.
    pub fn refs(&self) -> &FilesRefStore {
        &self.refs
    }

    /// Resolve a symbolic name to an object id.
    ///
    /// Follows HEAD and ref indirections, then parses the result as a hex
    /// key.
    pub fn resolve(&self, name: &str) -> Result<ObjectId, RepoError> {
        let hex = self.refs.resolve(name, true)?;
        Ok(ObjectId::from_hex(&hex)?)
    }

    /// Read an object's payload, requiring a specific kind.
    ///
    /// The read is digest-verified; a kind other than `expected` is a
    /// [`RepoError::KindMismatch`], a missing object a
    /// [`RepoError::MissingObject`].
    pub fn read_kind(
        &self,
        oid: &ObjectId,
        expected: ObjectType,
    ) -> Result<Vec<u8>, RepoError> {
        let (actual, payload) = self
            .store
            .read_verified(oid)?
            .ok_or_else(|| RepoError::MissingObject(oid.to_hex()))?;
        if actual != expected {
            return Err(RepoError::KindMismatch { expected, actual });
        }
        Ok(payload)
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, RepoError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
