use std::fs;
use std::path::Path;

use bstr::BString;
use gitlite_hash::ObjectId;
use gitlite_object::{FileMode, Object, ObjectType, Tree, TreeEntry};

use crate::{RepoError, Repository};

/// Caller-supplied ignore policy for the snapshot walk.
///
/// Names starting with `.` are always skipped regardless of the predicate;
/// no ignore-file parsing happens here.
pub type IgnorePredicate<'a> = &'a dyn Fn(&str) -> bool;

impl Repository {
    /// Snapshot a directory into the object store, returning the id of the
    /// tree object describing it.
    ///
    /// Subdirectories recurse (mode 40000), regular files become blobs
    /// (mode 100644), and other filesystem entries (symlinks, sockets, ...)
    /// are skipped. Entries sort by name bytes, so identical directory
    /// contents always produce the identical tree id.
    pub fn snapshot_tree(
        &self,
        dir: &Path,
        is_ignored: IgnorePredicate<'_>,
    ) -> Result<ObjectId, RepoError> {
        let mut entries = Vec::new();

        for dirent in fs::read_dir(dir)? {
            let dirent = dirent?;
            let name = dirent
                .file_name()
                .into_string()
                .map_err(|_| RepoError::InvalidFileName(dirent.path()))?;
            if name.starts_with('.') || is_ignored(&name) {
                continue;
            }

            let file_type = dirent.file_type()?;
            if file_type.is_dir() {
                let sub_oid = self.snapshot_tree(&dirent.path(), is_ignored)?;
                entries.push(TreeEntry {
                    mode: FileMode::Tree,
                    name: BString::from(name),
                    oid: sub_oid,
                });
            } else if file_type.is_file() {
                let data = fs::read(dirent.path())?;
                let blob_oid = self.store().write_raw(ObjectType::Blob, &data)?;
                entries.push(TreeEntry {
                    mode: FileMode::Regular,
                    name: BString::from(name),
                    oid: blob_oid,
                });
            }
        }

        let tree = Tree { entries };
        Ok(self.store().write(&Object::Tree(tree))?)
    }

    /// Restore a tree object into `base_path`.
    ///
    /// Directories are created idempotently; files are written with their
    /// blob payload, truncating whatever was there. Files present in
    /// `base_path` but absent from the tree are left alone.
    pub fn restore_tree(&self, tree_oid: &ObjectId, base_path: &Path) -> Result<(), RepoError> {
        let payload = self.read_kind(tree_oid, ObjectType::Tree)?;
        let tree = Tree::parse(&payload)?;

        for entry in &tree.entries {
            let name = String::from_utf8(entry.name.to_vec())
                .map_err(|_| RepoError::InvalidFileName(base_path.join("?")))?;
            let path = base_path.join(&name);

            if entry.mode.is_tree() {
                fs::create_dir_all(&path)?;
                self.restore_tree(&entry.oid, &path)?;
            } else {
                self.restore_blob(&entry.oid, &path)?;
            }
        }

        Ok(())
    }

    /// Write one blob's payload to `path`, truncating any existing file.
    ///
    /// The payload streams from the store in chunks, so a large file never
    /// sits in memory whole.
    fn restore_blob(&self, oid: &ObjectId, path: &Path) -> Result<(), RepoError> {
        let mut stream = self
            .store()
            .stream(oid)?
            .ok_or_else(|| RepoError::MissingObject(oid.to_hex()))?;
        if stream.object_type() != ObjectType::Blob {
            return Err(RepoError::KindMismatch {
                expected: ObjectType::Blob,
                actual: stream.object_type(),
            });
        }

        let mut file = fs::File::create(path)?;
        std::io::copy(&mut stream, &mut file)?;
        if stream.bytes_remaining() > 0 {
            return Err(RepoError::TruncatedObject(oid.to_hex()));
        }
        Ok(())
    }
}
