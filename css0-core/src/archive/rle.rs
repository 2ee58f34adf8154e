use crate::archive::tables::TABLES_LEN;
use crate::error::{CssError, Result, Stage};
use tracing::debug;

const RUN_FLAG: u8 = 0x80;
const COUNT_MASK: u8 = 0x7F;

/// Expand an archive body into the fixed-size table buffer.
pub fn decompress(body: &[u8]) -> Result<Vec<u8>> {
    decompress_to(body, TABLES_LEN)
}

/// Expand `body` until exactly `expected` bytes have been produced.
///
/// Control byte `c`: with the high bit set, the next byte is repeated
/// `(c & 0x7F) + 1` times; otherwise the next `c + 1` bytes are copied.
pub fn decompress_to(body: &[u8], expected: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(expected);
    let mut pos = 0usize;

    while pos < body.len() && out.len() < expected {
        let ctrl_off = pos;
        let ctrl = body[pos];
        pos += 1;
        let count = usize::from(ctrl & COUNT_MASK) + 1;
        let src_need = if ctrl & RUN_FLAG != 0 { 1 } else { count };

        if body.len() - pos < src_need {
            return Err(CssError::TruncatedInput {
                stage: Stage::Rle,
                offset: ctrl_off,
                needed: src_need,
                available: body.len() - pos,
            });
        }
        if expected - out.len() < count {
            return Err(CssError::TruncatedInput {
                stage: Stage::Rle,
                offset: ctrl_off,
                needed: count,
                available: expected - out.len(),
            });
        }

        if ctrl & RUN_FLAG != 0 {
            out.resize(out.len() + count, body[pos]);
        } else {
            out.extend_from_slice(&body[pos..pos + count]);
        }
        pos += src_need;
    }

    if out.len() < expected {
        return Err(CssError::TruncatedInput {
            stage: Stage::Rle,
            offset: body.len(),
            needed: expected,
            available: out.len(),
        });
    }
    if pos < body.len() {
        debug!(
            unused = body.len() - pos,
            "rle: output complete before end of input"
        );
    }
    Ok(out)
}
