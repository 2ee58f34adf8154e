use crate::archive::checksum::ChecksumReport;
use crate::archive::decode_archive_with;
use crate::error::{CssError, Result};
use crate::highscores::{reader::read_target, writer::write_to};
use crate::interchange::read_records_csv;
use crate::merge::merge;
use crate::model::{ScoreRecord, to_score_records};
use crate::options::Options;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the new records come from.
#[derive(Clone, Debug)]
pub enum Source {
    /// A `CSS0.DAT` archive.
    Archive(PathBuf),
    /// A CSV file with `filename,name,company_value,winner` columns.
    Csv(PathBuf),
}

#[derive(Clone, Debug, Default)]
pub struct BuildSummary {
    /// Records written to the output file.
    pub entries: usize,
    pub incoming: usize,
    /// Records read from the previous output file (0 unless merging).
    pub existing: usize,
    pub checksum: Option<ChecksumReport>,
}

/// Load `source` as highscore records.
pub fn load_records(
    source: &Source,
    opts: &Options,
) -> Result<(Vec<ScoreRecord>, Option<ChecksumReport>)> {
    match source {
        Source::Archive(path) => {
            let raw = fs::read(path)?;
            let decoded = decode_archive_with(&raw, opts)?;
            Ok((to_score_records(&decoded.rows), decoded.checksum))
        }
        Source::Csv(path) => {
            let f = BufReader::new(File::open(path)?);
            Ok((read_records_csv(f, opts.scale_factor)?, None))
        }
    }
}

/// Read the highscores file at `path`; a missing file is an empty set.
pub fn load_existing(path: &Path, opts: &Options) -> Result<Vec<ScoreRecord>> {
    if !path.exists() {
        debug!(path = %path.display(), "no existing highscores file");
        return Ok(Vec::new());
    }
    let bytes = fs::read(path)?;
    match read_target(&bytes, opts.legacy_timestamp) {
        Ok(records) => Ok(records),
        Err(e @ CssError::InvalidTargetHeader { .. }) if opts.ignore_invalid_target => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable highscores file");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Write `bytes` to a temp file beside `path`, then move it into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Produce (or update, when `opts.merge_enabled`) the highscores file at `out`.
pub fn build_highscores(source: &Source, out: &Path, opts: &Options) -> Result<BuildSummary> {
    let (incoming, checksum) = load_records(source, opts)?;
    let existing = if opts.merge_enabled {
        load_existing(out, opts)?
    } else {
        Vec::new()
    };

    let merged = merge(&existing, &incoming);
    let mut bytes = Vec::new();
    write_to(&mut bytes, &merged, opts.legacy_timestamp)?;
    write_atomic(out, &bytes)?;

    info!(
        path = %out.display(),
        entries = merged.len(),
        incoming = incoming.len(),
        existing = existing.len(),
        "highscores written"
    );
    Ok(BuildSummary {
        entries: merged.len(),
        incoming: incoming.len(),
        existing: existing.len(),
        checksum,
    })
}
