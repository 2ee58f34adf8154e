use super::{HEADER_LEN, VERSION};
use crate::error::{CssError, Result};
use crate::model::{ScoreRecord, Timestamp};

/// Smallest possible record: two empty strings and two i64 fields.
const MIN_RECORD_LEN: usize = 2 + 16;

struct Cursor<'a> {
    buf: &'a [u8],
    off: usize,
}

impl<'a> Cursor<'a> {
    fn invalid(&self, reason: impl Into<String>) -> CssError {
        CssError::InvalidTargetHeader {
            offset: self.off,
            reason: reason.into(),
        }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.off
    }

    fn take<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        if self.remaining() < N {
            return Err(self.invalid(format!("file ends inside {what}")));
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.off..self.off + N]);
        self.off += N;
        Ok(out)
    }

    fn cstr(&mut self, what: &str) -> Result<String> {
        let rest = &self.buf[self.off..];
        let end = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| self.invalid(format!("unterminated {what}")))?;
        let s = String::from_utf8_lossy(&rest[..end]).into_owned();
        self.off += end + 1;
        Ok(s)
    }
}

/// Parse an existing highscores file; `legacy` is the raw timestamp meaning "unknown".
pub fn read_target(bytes: &[u8], legacy: i64) -> Result<Vec<ScoreRecord>> {
    let mut c = Cursor { buf: bytes, off: 0 };
    if bytes.len() < HEADER_LEN {
        return Err(c.invalid(format!("{} bytes is shorter than the header", bytes.len())));
    }

    let version = u32::from_le_bytes(c.take::<4>("version")?);
    if version != VERSION {
        return Err(CssError::InvalidTargetHeader {
            offset: 0,
            reason: format!("unsupported version {version}, expected {VERSION}"),
        });
    }
    let count = u32::from_le_bytes(c.take::<4>("count")?) as usize;
    if count.saturating_mul(MIN_RECORD_LEN) > c.remaining() {
        return Err(CssError::InvalidTargetHeader {
            offset: 4,
            reason: format!(
                "count {count} needs at least {} bytes, {} remain",
                count.saturating_mul(MIN_RECORD_LEN),
                c.remaining()
            ),
        });
    }

    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        let file_name = c.cstr("file name")?;
        let winner_name = c.cstr("winner name")?;
        let value = i64::from_le_bytes(c.take::<8>("value")?);
        let raw_ts = i64::from_le_bytes(c.take::<8>("timestamp")?);
        records.push(ScoreRecord {
            file_name,
            winner_name,
            value,
            timestamp: Timestamp::from_raw(raw_ts, legacy),
        });
    }

    if c.remaining() != 0 {
        return Err(c.invalid(format!(
            "{} trailing bytes after {count} records",
            c.remaining()
        )));
    }
    Ok(records)
}
