use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use css0_core::archive::checksum::{split_archive, verify};
use css0_core::error::{CssError, Result};
use css0_core::interchange::write_rows_csv;
use css0_core::{
    ChecksumPolicy, Options, ScoreRecord, Source, Timestamp, build_highscores, decode_archive_with,
    read_target,
};
use tracing::info;

fn checksum_policy(strict: bool) -> ChecksumPolicy {
    if strict {
        ChecksumPolicy::Strict
    } else {
        ChecksumPolicy::Warn
    }
}

fn sidecar(archive: &Path, suffix: &str) -> PathBuf {
    let stem = archive
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());
    archive.with_file_name(format!("{stem}.{suffix}"))
}

pub fn handle_decode(
    archive: PathBuf,
    out: Option<PathBuf>,
    strict_checksum: bool,
    keep_intermediate: bool,
) -> Result<()> {
    let opts = Options {
        checksum: checksum_policy(strict_checksum),
        ..Default::default()
    };
    let raw = fs::read(&archive)?;
    let decoded = decode_archive_with(&raw, &opts)?;

    if keep_intermediate {
        let decompressed = sidecar(&archive, "decompressed.bin");
        let decrypted = sidecar(&archive, "decrypted.bin");
        fs::write(&decompressed, &decoded.decompressed)?;
        fs::write(&decrypted, &decoded.plain)?;
        eprintln!("decode: wrote {}", decompressed.display());
        eprintln!("decode: wrote {}", decrypted.display());
    }

    match out {
        Some(path) => {
            let mut w = BufWriter::new(File::create(&path)?);
            write_rows_csv(&mut w, &decoded.rows)?;
            w.flush()?;
            eprintln!("decode: {} rows -> {}", decoded.rows.len(), path.display());
        }
        None => write_rows_csv(std::io::stdout().lock(), &decoded.rows)?,
    }
    Ok(())
}

pub fn handle_build(
    css0: Option<PathBuf>,
    input: Option<PathBuf>,
    out: PathBuf,
    merge: bool,
    scale: i64,
    strict_checksum: bool,
    ignore_invalid_target: bool,
) -> Result<()> {
    let source = match (css0, input) {
        (Some(p), _) => Source::Archive(p),
        (None, Some(p)) => Source::Csv(p),
        (None, None) => {
            return Err(CssError::Format(
                "one of --css0 or --input is required".to_string(),
            ));
        }
    };
    let opts = Options {
        scale_factor: scale,
        merge_enabled: merge,
        checksum: checksum_policy(strict_checksum),
        ignore_invalid_target,
        ..Default::default()
    };
    let summary = build_highscores(&source, &out, &opts)?;
    let verb = if merge { "merged and written" } else { "written" };
    eprintln!("build: highscores.dat {verb}: {}", out.display());
    eprintln!("build: entries: {}", summary.entries);
    Ok(())
}

fn format_row(r: &ScoreRecord) -> String {
    let ts = match r.timestamp {
        Timestamp::Legacy => "legacy".to_string(),
        Timestamp::At(t) => t.to_string(),
    };
    format!(
        "{:<24} {:<32} {:>16} {:>20}",
        r.file_name, r.winner_name, r.value, ts
    )
}

pub fn handle_list(highscores: PathBuf) -> Result<()> {
    let bytes = fs::read(&highscores)?;
    let records = read_target(&bytes, Options::default().legacy_timestamp)?;
    let mut out = std::io::stdout().lock();
    for r in &records {
        writeln!(out, "{}", format_row(r))?;
    }
    info!(count = records.len(), "listed highscores");
    Ok(())
}

pub fn handle_verify(archive: PathBuf) -> Result<()> {
    let raw = fs::read(&archive)?;
    let (body, stored) = split_archive(&raw)?;
    let report = verify(body, stored);
    if !report.matches {
        return Err(CssError::ChecksumMismatch {
            stored: report.stored,
            computed: report.computed,
        });
    }
    eprintln!("verify: OK ({:#010x})", report.computed);
    Ok(())
}
