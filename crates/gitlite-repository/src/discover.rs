use std::path::{Path, PathBuf};

use crate::RepoError;

/// Find the working tree root containing `.git`, starting at `start` and
/// climbing parent directories.
pub fn discover_work_tree(start: &Path) -> Result<PathBuf, RepoError> {
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir()?.join(start)
    };

    let mut current = start.as_path();
    loop {
        if current.join(".git").is_dir() {
            return Ok(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return Err(RepoError::NotARepository(start)),
        }
    }
}
