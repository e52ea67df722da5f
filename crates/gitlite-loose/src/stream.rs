use std::fs::File;
use std::io::Read;

use flate2::read::ZlibDecoder;
use gitlite_hash::ObjectId;
use gitlite_object::header;
use gitlite_object::ObjectType;

use crate::{LooseError, LooseObjectStore};

/// Incremental reader over one stored object's payload.
///
/// The frame header is decoded eagerly, so kind and declared size are known
/// up front; payload bytes inflate lazily as the caller reads, bounding peak
/// memory for large blobs. Whatever payload came out of the decoder while
/// scanning for the header terminator is handed out first.
pub struct ObjectStream {
    obj_type: ObjectType,
    size: usize,
    /// Payload bytes inflated together with the header.
    carry: Vec<u8>,
    carry_pos: usize,
    decoder: ZlibDecoder<File>,
    served: usize,
}

impl ObjectStream {
    /// The object kind.
    pub fn object_type(&self) -> ObjectType {
        self.obj_type
    }

    /// The declared payload size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// How many payload bytes remain to be read.
    pub fn bytes_remaining(&self) -> usize {
        self.size - self.served
    }
}

impl Read for ObjectStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() || self.served == self.size {
            return Ok(0);
        }
        // Never hand out more than the declared payload size.
        let want = buf.len().min(self.size - self.served);

        // Drain the carry-over before touching the decoder again.
        if self.carry_pos < self.carry.len() {
            let take = want.min(self.carry.len() - self.carry_pos);
            buf[..take].copy_from_slice(&self.carry[self.carry_pos..self.carry_pos + take]);
            self.carry_pos += take;
            self.served += take;
            return Ok(take);
        }

        let n = self.decoder.read(&mut buf[..want])?;
        self.served += n;
        Ok(n)
    }
}

impl LooseObjectStore {
    /// Open an object for incremental payload reading.
    ///
    /// Returns `Ok(None)` when no object with this id is stored.
    pub fn stream(&self, oid: &ObjectId) -> Result<Option<ObjectStream>, LooseError> {
        let file = match File::open(self.object_path(oid)) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut decoder = ZlibDecoder::new(file);

        // Inflate forward until the header's null terminator shows up; what
        // follows it already belongs to the payload and becomes the carry.
        let mut scanned: Vec<u8> = Vec::with_capacity(32);
        loop {
            let mut chunk = [0u8; 32];
            let n = decoder
                .read(&mut chunk)
                .map_err(|source| LooseError::Inflate {
                    oid: oid.to_hex(),
                    source,
                })?;
            if n == 0 {
                return Err(LooseError::Corrupt {
                    oid: oid.to_hex(),
                    reason: "frame ends before header terminator".into(),
                });
            }
            scanned.extend_from_slice(&chunk[..n]);
            if scanned.contains(&0) {
                break;
            }
            if scanned.len() > 64 {
                return Err(LooseError::Corrupt {
                    oid: oid.to_hex(),
                    reason: "frame header unreasonably long".into(),
                });
            }
        }

        let (obj_type, size, header_len) = header::parse_header(&scanned)?;
        let carry = scanned.split_off(header_len);

        Ok(Some(ObjectStream {
            obj_type,
            size,
            carry,
            carry_pos: 0,
            decoder,
            served: 0,
        }))
    }
}
