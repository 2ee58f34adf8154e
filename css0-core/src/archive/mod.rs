//! Reading the `CSS0.DAT` scenario-progress archive.
//!
//! Raw bytes are `body || checksum_le32`. The body is RLE-compressed; once
//! expanded, every little-endian word is obfuscated. The plain buffer holds
//! four parallel tables of 128 slots (see [`tables`]).

pub mod checksum;
pub mod obfuscation;
pub mod rle;
pub mod tables;

use crate::error::{CssError, Result};
use crate::model::ScenarioRow;
use crate::options::{ChecksumPolicy, Options};
use checksum::ChecksumReport;
use tracing::{debug, warn};

/// Everything produced while decoding one archive.
#[derive(Debug, Clone)]
pub struct DecodedArchive {
    /// `None` when the checksum was skipped.
    pub checksum: Option<ChecksumReport>,
    /// RLE output, still obfuscated.
    pub decompressed: Vec<u8>,
    /// Deobfuscated table buffer.
    pub plain: Vec<u8>,
    pub rows: Vec<ScenarioRow>,
}

pub fn decode_archive_with(raw: &[u8], opts: &Options) -> Result<DecodedArchive> {
    let (body, stored) = checksum::split_archive(raw)?;

    let report = match opts.checksum {
        ChecksumPolicy::Skip => None,
        policy => {
            let r = checksum::verify(body, stored);
            if !r.matches {
                if policy == ChecksumPolicy::Strict {
                    return Err(CssError::ChecksumMismatch {
                        stored: r.stored,
                        computed: r.computed,
                    });
                }
                warn!(
                    stored = r.stored,
                    computed = r.computed,
                    "archive checksum mismatch, continuing"
                );
            }
            Some(r)
        }
    };

    let decompressed = rle::decompress(body)?;
    debug!(
        compressed = body.len(),
        decompressed = decompressed.len(),
        "rle: expanded archive body"
    );

    let mut plain = decompressed.clone();
    obfuscation::decode_words(&mut plain)?;

    let rows = tables::parse(&plain)?;
    debug!(
        slots = rows.len(),
        completed = rows.iter().filter(|r| !r.winner_name.is_empty()).count(),
        "tables: parsed scenario slots"
    );

    Ok(DecodedArchive {
        checksum: report,
        decompressed,
        plain,
        rows,
    })
}

/// Decode with default options: checksum mismatches are logged, not fatal.
pub fn decode_archive(raw: &[u8]) -> Result<Vec<ScenarioRow>> {
    Ok(decode_archive_with(raw, &Options::default())?.rows)
}
