//! Symbolic name resolution for gitlite.
//!
//! Turns a symbolic name — the literal `HEAD`, a ref path like
//! `refs/heads/master`, or a full hex id — into a 40-character object key by
//! following textual ref indirections on disk.

use std::fs;
use std::path::{Path, PathBuf};

use gitlite_hash::ObjectId;

/// Maximum number of indirections followed before giving up.
const MAX_DEPTH: u32 = 8;

/// Errors from reference operations.
#[derive(Debug, thiserror::Error)]
pub enum RefError {
    #[error("reference chain for '{name}' exceeds {MAX_DEPTH} indirections")]
    RefLoop { name: String },

    #[error("HEAD is missing or unreadable: {source}")]
    MissingHead {
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Loose reference store over a `.git` directory.
///
/// Refs are text files holding either a 40-hex key or a `ref: <path>`
/// pointer; HEAD lives at the top of the directory.
pub struct FilesRefStore {
    git_dir: PathBuf,
}

impl FilesRefStore {
    pub fn new(git_dir: impl AsRef<Path>) -> Self {
        Self {
            git_dir: git_dir.as_ref().to_path_buf(),
        }
    }

    /// Resolve a symbolic name to an object key.
    ///
    /// Rules, in order:
    /// 1. `HEAD` reads `.git/HEAD`; a `ref: ` prefix recurses on the target,
    ///    anything else is a detached key and is returned directly.
    /// 2. A name that exists as a file under `.git` (e.g.
    ///    `refs/heads/master`) reads its first line; with `follow`, the line
    ///    is resolved again, otherwise returned as-is.
    /// 3. Anything else is returned verbatim — the caller is expected to
    ///    have supplied a full 40-hex key. Neither length nor hex-ness is
    ///    validated here, and short prefixes are not expanded.
    pub fn resolve(&self, name: &str, follow: bool) -> Result<String, RefError> {
        self.resolve_at_depth(name, follow, 0)
    }

    fn resolve_at_depth(&self, name: &str, follow: bool, depth: u32) -> Result<String, RefError> {
        if depth > MAX_DEPTH {
            return Err(RefError::RefLoop {
                name: name.to_string(),
            });
        }

        if name == "HEAD" {
            let line = first_line(&self.head_path())
                .map_err(|source| RefError::MissingHead { source })?;
            return match line.strip_prefix("ref: ") {
                Some(target) => self.resolve_at_depth(target, follow, depth + 1),
                None => Ok(line),
            };
        }

        let path = self.git_dir.join(name);
        if path.is_file() {
            let line = first_line(&path)?;
            return if follow {
                self.resolve_at_depth(&line, follow, depth + 1)
            } else {
                Ok(line)
            };
        }

        Ok(name.to_string())
    }

    /// Point HEAD directly at a commit (detached).
    pub fn set_head_detached(&self, oid: &ObjectId) -> Result<(), RefError> {
        fs::write(self.head_path(), format!("{}\n", oid.to_hex()))?;
        Ok(())
    }

    /// Path to the HEAD file.
    pub fn head_path(&self) -> PathBuf {
        self.git_dir.join("HEAD")
    }
}

/// Read the first line of a text file, without its trailing newline.
fn first_line(path: &Path) -> Result<String, std::io::Error> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .split_once('\n')
        .map(|(line, _)| line.to_string())
        .unwrap_or(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const KEY: &str = "ce013625030ba8dba906f756967f9e9ca394464a";

    fn git_dir() -> (TempDir, FilesRefStore) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("refs/heads")).unwrap();
        let store = FilesRefStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn head_through_branch_ref() {
        let (dir, store) = git_dir();
        fs::write(dir.path().join("HEAD"), "ref: refs/heads/master\n").unwrap();
        fs::write(dir.path().join("refs/heads/master"), format!("{KEY}\n")).unwrap();

        assert_eq!(store.resolve("HEAD", true).unwrap(), KEY);
    }

    #[test]
    fn detached_head() {
        let (dir, store) = git_dir();
        fs::write(dir.path().join("HEAD"), format!("{KEY}\n")).unwrap();
        assert_eq!(store.resolve("HEAD", true).unwrap(), KEY);
    }

    #[test]
    fn ref_path_resolves() {
        let (dir, store) = git_dir();
        fs::write(dir.path().join("refs/heads/master"), format!("{KEY}\n")).unwrap();
        assert_eq!(store.resolve("refs/heads/master", true).unwrap(), KEY);
    }

    #[test]
    fn no_follow_returns_ref_content() {
        let (dir, store) = git_dir();
        fs::write(
            dir.path().join("refs/heads/master"),
            "refs/heads/other\n",
        )
        .unwrap();
        assert_eq!(
            store.resolve("refs/heads/master", false).unwrap(),
            "refs/heads/other"
        );
    }

    #[test]
    fn unknown_name_returned_verbatim() {
        let (_dir, store) = git_dir();
        assert_eq!(store.resolve(KEY, true).unwrap(), KEY);
    }

    #[test]
    fn missing_head_errors() {
        let (_dir, store) = git_dir();
        assert!(matches!(
            store.resolve("HEAD", true),
            Err(RefError::MissingHead { .. })
        ));
    }

    #[test]
    fn self_referential_chain_is_a_loop() {
        let (dir, store) = git_dir();
        // A ref whose content names itself re-resolves forever.
        fs::write(
            dir.path().join("refs/heads/master"),
            "refs/heads/master\n",
        )
        .unwrap();
        assert!(matches!(
            store.resolve("refs/heads/master", true),
            Err(RefError::RefLoop { .. })
        ));
    }

    #[test]
    fn set_head_detached_writes_key_and_newline() {
        let (dir, store) = git_dir();
        let oid = ObjectId::from_hex(KEY).unwrap();
        store.set_head_detached(&oid).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("HEAD")).unwrap(),
            format!("{KEY}\n")
        );
        assert_eq!(store.resolve("HEAD", true).unwrap(), KEY);
    }

    #[test]
    fn first_line_without_trailing_newline() {
        let (dir, store) = git_dir();
        fs::write(dir.path().join("refs/heads/master"), KEY).unwrap();
        assert_eq!(store.resolve("refs/heads/master", true).unwrap(), KEY);
    }
}
