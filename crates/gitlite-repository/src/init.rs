use std::fs;
use std::path::Path;

use crate::RepoError;

const DEFAULT_CONFIG: &str =
    "[core]\n\trepositoryformatversion = 0\n\tfilemode = true\n\tbare = false\n\tlogallrefupdates = true\n";

const DEFAULT_HEAD: &str = "ref: refs/heads/master\n";

/// Create the `.git` skeleton:
///
/// - `objects/`
/// - `refs/heads/`, `refs/tags/`
/// - `branches/`
/// - `config` (default core section)
/// - `HEAD` pointing at `refs/heads/master`
///
/// If the directory already holds a repository (HEAD exists), nothing is
/// touched.
pub fn init_repository(git_dir: &Path) -> Result<(), RepoError> {
    if git_dir.exists() && !git_dir.is_dir() {
        return Err(RepoError::NotADirectory(git_dir.to_path_buf()));
    }
    if git_dir.join("HEAD").is_file() {
        return Ok(());
    }

    fs::create_dir_all(git_dir.join("objects"))?;
    fs::create_dir_all(git_dir.join("refs").join("heads"))?;
    fs::create_dir_all(git_dir.join("refs").join("tags"))?;
    fs::create_dir_all(git_dir.join("branches"))?;

    fs::write(git_dir.join("config"), DEFAULT_CONFIG)?;
    fs::write(git_dir.join("HEAD"), DEFAULT_HEAD)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_skeleton() {
        let dir = TempDir::new().unwrap();
        let git_dir = dir.path().join(".git");
        init_repository(&git_dir).unwrap();

        assert!(git_dir.join("objects").is_dir());
        assert!(git_dir.join("refs/heads").is_dir());
        assert!(git_dir.join("refs/tags").is_dir());
        assert!(git_dir.join("branches").is_dir());
        assert_eq!(
            fs::read_to_string(git_dir.join("HEAD")).unwrap(),
            "ref: refs/heads/master\n"
        );
        assert!(fs::read_to_string(git_dir.join("config"))
            .unwrap()
            .contains("repositoryformatversion = 0"));
    }

    #[test]
    fn reinit_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let git_dir = dir.path().join(".git");
        init_repository(&git_dir).unwrap();

        // Detach HEAD, then re-init; the existing state must survive.
        fs::write(
            git_dir.join("HEAD"),
            "ce013625030ba8dba906f756967f9e9ca394464a\n",
        )
        .unwrap();
        init_repository(&git_dir).unwrap();
        assert_eq!(
            fs::read_to_string(git_dir.join("HEAD")).unwrap(),
            "ce013625030ba8dba906f756967f9e9ca394464a\n"
        );
    }

    #[test]
    fn path_collision_errors() {
        let dir = TempDir::new().unwrap();
        let git_dir = dir.path().join(".git");
        fs::write(&git_dir, "a file, not a directory").unwrap();
        assert!(matches!(
            init_repository(&git_dir),
            Err(RepoError::NotADirectory(_))
        ));
    }
}
