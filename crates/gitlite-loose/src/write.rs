use std::fs;
use std::io::Write;

use flate2::write::ZlibEncoder;
use gitlite_hash::hasher::Hasher;
use gitlite_hash::ObjectId;
use gitlite_object::{header, Object, ObjectType};
use tempfile::NamedTempFile;

use crate::{LooseError, LooseObjectStore};

impl LooseObjectStore {
    /// Store an object, returning its id.
    pub fn write(&self, obj: &Object) -> Result<ObjectId, LooseError> {
        let payload = obj.serialize_payload();
        self.write_raw(obj.object_type(), &payload)
    }

    /// Store a payload under its kind, returning the id it is filed under.
    ///
    /// The id derives from the frame, so storing the same bytes twice finds
    /// the first copy and returns without touching the disk. New objects
    /// appear in a single rename; a reader can never observe a half-written
    /// file.
    pub fn write_raw(
        &self,
        obj_type: ObjectType,
        payload: &[u8],
    ) -> Result<ObjectId, LooseError> {
        let oid = Self::hash_raw(obj_type, payload)?;
        let dest = self.object_path(&oid);
        if dest.is_file() {
            return Ok(oid);
        }

        let fanout = dest.parent().unwrap_or(&self.objects_dir);
        fs::create_dir_all(fanout)?;

        // Deflate into a scratch file in the same fanout directory, then
        // move it onto its final name.
        let tmp = NamedTempFile::new_in(fanout)?;
        let mut encoder = ZlibEncoder::new(tmp, self.compression);
        encoder.write_all(&header::write_header(obj_type, payload.len()))?;
        encoder.write_all(payload)?;
        let tmp = encoder.finish()?;

        match tmp.persist(&dest) {
            Ok(_) => Ok(oid),
            // Another writer stored the identical object first; the scratch
            // file is dropped and cleaned up.
            Err(_) if dest.is_file() => Ok(oid),
            Err(e) => Err(LooseError::Io(e.error)),
        }
    }

    /// The id a payload would be filed under, without storing anything.
    pub fn hash_raw(obj_type: ObjectType, payload: &[u8]) -> Result<ObjectId, LooseError> {
        Ok(Hasher::hash_object(obj_type.as_str(), payload)?)
    }
}
