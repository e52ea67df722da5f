use bstr::{BStr, BString, ByteSlice};
use gitlite_hash::ObjectId;

use crate::ObjectError;

/// A commit object: an ordered list of key/value headers plus a message.
///
/// Headers are kept as a sequence, not a map — order is significant for
/// round-trip hash stability and repeated keys (`parent`) are legal. Lookups
/// are linear scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub headers: Vec<(BString, BString)>,
    /// Everything after the blank line separating headers from the body.
    pub message: BString,
}

impl Commit {
    /// Build a commit with the canonical header order:
    /// `tree`, `parent`*, `author`, `committer`.
    ///
    /// `author` and `committer` are pre-formatted identity values
    /// (`Name <email> timestamp tz`).
    pub fn new(
        tree: &ObjectId,
        parents: &[ObjectId],
        author: BString,
        committer: BString,
        message: BString,
    ) -> Self {
        let mut headers = Vec::with_capacity(3 + parents.len());
        headers.push((BString::from("tree"), BString::from(tree.to_hex())));
        for parent in parents {
            headers.push((BString::from("parent"), BString::from(parent.to_hex())));
        }
        headers.push((BString::from("author"), author));
        headers.push((BString::from("committer"), committer));
        Self { headers, message }
    }

    /// Parse commit payload from raw bytes (no frame header).
    ///
    /// Headers are lines of `key SP value` up to a blank line; a line
    /// without a space continues the previous header's value (joined with a
    /// newline, preserving bytes). The message is everything after the blank
    /// line.
    pub fn parse(payload: &[u8]) -> Result<Self, ObjectError> {
        let mut headers: Vec<(BString, BString)> = Vec::new();
        let mut pos = 0;

        while pos < payload.len() {
            if payload[pos] == b'\n' {
                pos += 1;
                break;
            }

            let line_end = payload[pos..]
                .find_byte(b'\n')
                .map(|p| p + pos)
                .unwrap_or(payload.len());
            let line = &payload[pos..line_end];

            match line.find_byte(b' ') {
                Some(space_pos) => {
                    headers.push((
                        BString::from(&line[..space_pos]),
                        BString::from(&line[space_pos + 1..]),
                    ));
                }
                None => {
                    let (_, value) = headers.last_mut().ok_or_else(|| {
                        ObjectError::InvalidCommit(
                            "continuation line before any header".into(),
                        )
                    })?;
                    value.push(b'\n');
                    value.extend_from_slice(line);
                }
            }

            pos = line_end + 1;
        }

        Ok(Self {
            headers,
            message: BString::from(&payload[pos.min(payload.len())..]),
        })
    }

    /// Serialize commit payload: each header as `key SP value LF` in stored
    /// order, a blank line, then the raw message.
    pub fn serialize_payload(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (key, value) in &self.headers {
            out.extend_from_slice(key);
            out.push(b' ');
            out.extend_from_slice(value);
            out.push(b'\n');
        }
        out.push(b'\n');
        out.extend_from_slice(&self.message);
        out
    }

    /// First header value with the given key, if any (linear scan).
    pub fn header(&self, key: &str) -> Option<&BStr> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_bstr())
    }

    /// The id of the root tree this commit snapshots.
    pub fn tree(&self) -> Result<ObjectId, ObjectError> {
        let value = self
            .header("tree")
            .ok_or(ObjectError::MissingCommitField { field: "tree" })?;
        parse_oid_value(value)
    }

    /// All parent ids, in header order.
    pub fn parents(&self) -> Result<Vec<ObjectId>, ObjectError> {
        self.headers
            .iter()
            .filter(|(k, _)| k == "parent")
            .map(|(_, v)| parse_oid_value(v.as_bstr()))
            .collect()
    }

    /// The first parent id, or `None` for a root commit.
    pub fn first_parent(&self) -> Result<Option<ObjectId>, ObjectError> {
        match self.header("parent") {
            Some(value) => Ok(Some(parse_oid_value(value)?)),
            None => Ok(None),
        }
    }

    /// The raw author value, if present.
    pub fn author(&self) -> Option<&BStr> {
        self.header("author")
    }

    pub fn is_root(&self) -> bool {
        self.header("parent").is_none()
    }
}

fn parse_oid_value(value: &BStr) -> Result<ObjectId, ObjectError> {
    let hex = std::str::from_utf8(value)
        .map_err(|_| ObjectError::InvalidCommit("non-UTF-8 object id".into()))?;
    Ok(ObjectId::from_hex(hex)?)
}
