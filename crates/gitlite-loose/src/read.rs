use std::fs;
use std::io::Read;

use flate2::read::ZlibDecoder;
use gitlite_hash::hasher::Hasher;
use gitlite_hash::ObjectId;
use gitlite_object::header;
use gitlite_object::ObjectType;

use crate::{LooseError, LooseObjectStore};

impl LooseObjectStore {
    /// Read an object by id, returning its kind and payload bytes.
    ///
    /// Parsing the payload is deferred to the caller, which typically wants
    /// to check the kind first. Returns `Ok(None)` if the object does not
    /// exist and `Err` if it exists but is corrupt.
    pub fn read(&self, oid: &ObjectId) -> Result<Option<(ObjectType, Vec<u8>)>, LooseError> {
        match self.load_frame(oid)? {
            Some(frame) => Ok(Some(split_frame(&frame, oid)?)),
            None => Ok(None),
        }
    }

    /// Read an object and verify its digest matches the id it was addressed
    /// by.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    pub fn read_verified(
        &self,
        oid: &ObjectId,
    ) -> Result<Option<(ObjectType, Vec<u8>)>, LooseError> {
        let frame = match self.load_frame(oid)? {
            Some(frame) => frame,
            None => return Ok(None),
        };

        // The digest covers the raw frame (header + payload).
        let actual = Hasher::digest(&frame)?;
        if actual != *oid {
            return Err(LooseError::DigestMismatch {
                oid: oid.to_hex(),
                actual: actual.to_hex(),
            });
        }

        Ok(Some(split_frame(&frame, oid)?))
    }

    /// Load and inflate the full frame for an object, or `None` if no file
    /// exists at its path.
    ///
    /// The file must be exactly one zlib stream; bytes left over after the
    /// stream end are corruption.
    fn load_frame(&self, oid: &ObjectId) -> Result<Option<Vec<u8>>, LooseError> {
        let compressed = match fs::read(self.object_path(oid)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut decoder = ZlibDecoder::new(compressed.as_slice());
        let mut frame = Vec::new();
        decoder
            .read_to_end(&mut frame)
            .map_err(|source| LooseError::Inflate {
                oid: oid.to_hex(),
                source,
            })?;
        if decoder.total_in() < compressed.len() as u64 {
            return Err(LooseError::Corrupt {
                oid: oid.to_hex(),
                reason: "trailing bytes after zlib stream".into(),
            });
        }
        Ok(Some(frame))
    }
}

/// Split a decompressed frame into kind and payload, checking the declared
/// size against the actual payload length.
fn split_frame(frame: &[u8], oid: &ObjectId) -> Result<(ObjectType, Vec<u8>), LooseError> {
    let (obj_type, declared, header_len) = header::parse_header(frame)?;
    let payload = &frame[header_len..];
    if payload.len() != declared {
        return Err(LooseError::Corrupt {
            oid: oid.to_hex(),
            reason: format!(
                "size mismatch: declared {}, got {}",
                declared,
                payload.len()
            ),
        });
    }
    Ok((obj_type, payload.to_vec()))
}
