//! Hash-addressed object persistence.
//!
//! An object whose id is `abcd...` lives at `objects/ab/cd...`: the first
//! hex byte names a fanout directory, the remaining 38 characters the file.
//! Each file holds the zlib deflate of the object frame
//! `"<kind> <size>\0<payload>"` and is write-once — storing the same bytes
//! again finds the existing file and leaves the disk alone.

mod read;
mod stream;
mod write;

pub use stream::ObjectStream;

use std::path::{Path, PathBuf};

use gitlite_hash::ObjectId;

/// The loose object directory (`.git/objects/`).
pub struct LooseObjectStore {
    objects_dir: PathBuf,
    compression: flate2::Compression,
}

impl LooseObjectStore {
    /// Open the store rooted at `objects_dir`, compressing new objects at
    /// the maximum zlib level.
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        Self::with_compression_level(objects_dir, 9)
    }

    /// Open the store with an explicit zlib level (0–9).
    pub fn with_compression_level(objects_dir: impl AsRef<Path>, level: u32) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
            compression: flate2::Compression::new(level),
        }
    }

    /// Where an object with this id lives (or would live) on disk.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir.join(oid.loose_path())
    }

    /// Whether an object with this id has been stored.
    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }
}

/// Failure modes of the loose store.
#[derive(Debug, thiserror::Error)]
pub enum LooseError {
    /// The file exists but its contents are not a well-formed object.
    #[error("corrupt object {oid}: {reason}")]
    Corrupt { oid: String, reason: String },

    /// The zlib stream would not inflate.
    #[error("corrupt object {oid}: {source}")]
    Inflate {
        oid: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored bytes hash to a different id than the one they are filed
    /// under.
    #[error("object {oid} hashes to {actual}")]
    DigestMismatch { oid: String, actual: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Object(#[from] gitlite_object::ObjectError),

    #[error(transparent)]
    Hash(#[from] gitlite_hash::HashError),
}
