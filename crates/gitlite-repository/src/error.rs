use std::path::PathBuf;

use gitlite_object::ObjectType;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("not a gitlite repository: {0}")]
    NotARepository(PathBuf),

    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("object not found: {0}")]
    MissingObject(String),

    #[error("expected a {expected} object, got {actual}")]
    KindMismatch {
        expected: ObjectType,
        actual: ObjectType,
    },

    #[error("object {0} ends before its declared size")]
    TruncatedObject(String),

    #[error("non-unicode file name in working tree: {0}")]
    InvalidFileName(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Loose(#[from] gitlite_loose::LooseError),

    #[error(transparent)]
    Object(#[from] gitlite_object::ObjectError),

    #[error(transparent)]
    Ref(#[from] gitlite_ref::RefError),

    #[error(transparent)]
    Hash(#[from] gitlite_hash::HashError),
}
