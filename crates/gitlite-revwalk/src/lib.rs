//! First-parent history traversal for gitlite.

mod walk;

pub use walk::HistoryWalk;

/// Errors from history traversal.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("commit chain revisits {0}; history must not contain cycles")]
    Cycle(String),

    #[error(transparent)]
    Repo(#[from] gitlite_repository::RepoError),

    #[error(transparent)]
    Object(#[from] gitlite_object::ObjectError),
}
