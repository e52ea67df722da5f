use bstr::{BStr, BString, ByteSlice, ByteVec};
use chrono::Utc;

use crate::{Result, UtilError};

/// A commit timestamp with timezone information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GitDate {
    /// Seconds since Unix epoch.
    pub timestamp: i64,
    /// Timezone offset in minutes from UTC (e.g., -300 for EST).
    pub tz_offset: i32,
}

/// Timezone offsets serialize as the decimal form C git uses: -0500 for EST.
fn tz_offset_to_minutes(tz: i32) -> i32 {
    let sign = if tz < 0 { -1 } else { 1 };
    let abs = tz.unsigned_abs() as i32;
    let hours = abs / 100;
    let mins = abs % 100;
    sign * (hours * 60 + mins)
}

fn minutes_to_tz_offset(minutes: i32) -> i32 {
    let sign = if minutes < 0 { -1 } else { 1 };
    let abs = minutes.unsigned_abs() as i32;
    let hours = abs / 60;
    let mins = abs % 60;
    sign * (hours * 100 + mins)
}

impl GitDate {
    /// Create a GitDate from a Unix timestamp and timezone offset in minutes.
    pub fn new(timestamp: i64, tz_offset_minutes: i32) -> Self {
        Self {
            timestamp,
            tz_offset: tz_offset_minutes,
        }
    }

    /// The current wall-clock time, expressed in UTC (offset `+0000`).
    pub fn now_utc() -> Self {
        Self {
            timestamp: Utc::now().timestamp(),
            tz_offset: 0,
        }
    }

    /// Parse the raw format: `"<timestamp> <+/-HHMM>"`.
    pub fn parse_raw(input: &str) -> Result<Self> {
        let input = input.trim();
        let (ts_str, tz_str) = input
            .split_once(' ')
            .ok_or_else(|| UtilError::DateParse(format!("not a raw date: {input:?}")))?;

        let timestamp: i64 = ts_str
            .parse()
            .map_err(|_| UtilError::DateParse(format!("invalid timestamp: {ts_str:?}")))?;

        let tz: i32 = tz_str
            .parse()
            .map_err(|_| UtilError::DateParse(format!("invalid timezone: {tz_str:?}")))?;

        Ok(Self {
            timestamp,
            tz_offset: tz_offset_to_minutes(tz),
        })
    }

    /// Format in the raw format: `"<timestamp> <+/-HHMM>"`.
    pub fn format_raw(&self) -> String {
        format!(
            "{} {:+05}",
            self.timestamp,
            minutes_to_tz_offset(self.tz_offset)
        )
    }
}

/// An identity plus timestamp, as it appears in `author`/`committer` headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: BString,
    pub email: BString,
    pub date: GitDate,
}

impl Signature {
    pub fn new(name: impl Into<BString>, email: impl Into<BString>, date: GitDate) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            date,
        }
    }

    /// Parse from the header format: `Name <email> timestamp tz`.
    pub fn parse(input: &BStr) -> Result<Self> {
        let input = input.as_bytes();

        // Find the last '>' to split off the date portion.
        let gt_pos = input
            .iter()
            .rposition(|&b| b == b'>')
            .ok_or_else(|| UtilError::DateParse("missing '>' in signature".into()))?;

        let lt_pos = input[..gt_pos]
            .iter()
            .rposition(|&b| b == b'<')
            .ok_or_else(|| UtilError::DateParse("missing '<' in signature".into()))?;

        let name = input[..lt_pos].trim();
        let email = &input[lt_pos + 1..gt_pos];

        let date_str = input[gt_pos + 1..].trim();
        let date_str = std::str::from_utf8(date_str)
            .map_err(|_| UtilError::DateParse("non-UTF-8 date in signature".into()))?;
        let date = GitDate::parse_raw(date_str)?;

        Ok(Self {
            name: BString::from(name),
            email: BString::from(email),
            date,
        })
    }

    /// Format in the canonical header format: `Name <email> timestamp tz`.
    pub fn to_bytes(&self) -> BString {
        let mut out = BString::new(Vec::new());
        out.push_str(&self.name);
        out.push_str(b" <");
        out.push_str(&self.email);
        out.push_str(b"> ");
        out.push_str(self.date.format_raw().as_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bstr::BStr;

    #[test]
    fn parse_raw_utc() {
        let date = GitDate::parse_raw("1234567890 +0000").unwrap();
        assert_eq!(date.timestamp, 1234567890);
        assert_eq!(date.tz_offset, 0);
    }

    #[test]
    fn parse_raw_negative_offset() {
        let date = GitDate::parse_raw("1234567890 -0530").unwrap();
        assert_eq!(date.tz_offset, -330);
        assert_eq!(date.format_raw(), "1234567890 -0530");
    }

    #[test]
    fn format_raw_pads_offset() {
        assert_eq!(GitDate::new(100, 0).format_raw(), "100 +0000");
        assert_eq!(GitDate::new(100, 120).format_raw(), "100 +0200");
    }

    #[test]
    fn parse_raw_rejects_garbage() {
        assert!(GitDate::parse_raw("").is_err());
        assert!(GitDate::parse_raw("notadate").is_err());
        assert!(GitDate::parse_raw("123 xyz").is_err());
    }

    #[test]
    fn now_utc_has_zero_offset() {
        let date = GitDate::now_utc();
        assert_eq!(date.tz_offset, 0);
        assert!(date.timestamp > 0);
    }

    #[test]
    fn signature_roundtrip() {
        let sig = Signature::new("User", "user@example.com", GitDate::new(1234567890, 0));
        let bytes = sig.to_bytes();
        assert_eq!(bytes, "User <user@example.com> 1234567890 +0000");

        let parsed = Signature::parse(bytes.as_bstr()).unwrap();
        assert_eq!(parsed, sig);
    }

    #[test]
    fn signature_parse_tolerates_spaced_name() {
        let sig =
            Signature::parse(BStr::new(b"John Q. Doe <john@example.com> 1000000000 +0100"))
                .unwrap();
        assert_eq!(sig.name, "John Q. Doe");
        assert_eq!(sig.email, "john@example.com");
        assert_eq!(sig.date.tz_offset, 60);
    }

    #[test]
    fn signature_parse_rejects_missing_email() {
        assert!(Signature::parse(BStr::new(b"no email here 100 +0000")).is_err());
    }
}
