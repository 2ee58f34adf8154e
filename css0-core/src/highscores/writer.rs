use super::VERSION;
use crate::error::Result;
use crate::model::ScoreRecord;
use std::io::Write;

fn write_cstr(mut w: impl Write, s: &str) -> std::io::Result<()> {
    w.write_all(s.as_bytes())?;
    w.write_all(&[0])
}

fn record_count(len: usize) -> std::io::Result<u32> {
    u32::try_from(len).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{len} records do not fit the u32 count field"),
        )
    })
}

/// Serialize `records` in the order given; `legacy` is the raw value for `Timestamp::Legacy`.
pub fn write_to(mut w: impl Write, records: &[ScoreRecord], legacy: i64) -> std::io::Result<()> {
    let count = record_count(records.len())?;
    w.write_all(&VERSION.to_le_bytes())?;
    w.write_all(&count.to_le_bytes())?;
    for r in records {
        write_cstr(&mut w, &r.file_name)?;
        write_cstr(&mut w, &r.winner_name)?;
        w.write_all(&r.value.to_le_bytes())?;
        w.write_all(&r.timestamp.to_raw(legacy).to_le_bytes())?;
    }
    Ok(())
}

pub fn write_target_with(records: &[ScoreRecord], legacy: i64) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_to(&mut out, records, legacy)?;
    Ok(out)
}

pub fn write_target(records: &[ScoreRecord]) -> Result<Vec<u8>> {
    write_target_with(records, i64::MIN)
}
