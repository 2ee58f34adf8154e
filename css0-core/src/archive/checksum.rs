use crate::error::{CssError, Result, Stage};

pub const CHECKSUM_LEN: usize = 4;
const CHECKSUM_BIAS: u32 = 120_001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumReport {
    pub matches: bool,
    pub stored: u32,
    pub computed: u32,
}

/// Split a raw archive into its compressed body and the trailing stored checksum.
pub fn split_archive(raw: &[u8]) -> Result<(&[u8], u32)> {
    if raw.len() < CHECKSUM_LEN {
        return Err(CssError::TruncatedInput {
            stage: Stage::Archive,
            offset: 0,
            needed: CHECKSUM_LEN,
            available: raw.len(),
        });
    }
    let (body, tail) = raw.split_at(raw.len() - CHECKSUM_LEN);
    let mut le = [0u8; CHECKSUM_LEN];
    le.copy_from_slice(tail);
    Ok((body, u32::from_le_bytes(le)))
}

pub fn compute(body: &[u8]) -> u32 {
    let mut total = 0u32;
    for &b in body {
        let low = (total as u8).wrapping_add(b);
        total = ((total & 0xFFFF_FF00) | u32::from(low)).rotate_left(3);
    }
    total.wrapping_add(CHECKSUM_BIAS)
}

pub fn verify(body: &[u8], stored: u32) -> ChecksumReport {
    let computed = compute(body);
    ChecksumReport {
        matches: computed == stored,
        stored,
        computed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_just_the_bias() {
        assert_eq!(compute(&[]), 120_001);
    }

    #[test]
    fn single_byte() {
        // 0x01 in the low byte, rotated left by 3 -> 0x08
        assert_eq!(compute(&[1]), 8 + 120_001);
    }

    #[test]
    fn low_byte_add_discards_carry() {
        // 0xFF -> 0x7F8; 0xF8 + 0x10 wraps to 0x08 and leaves 0x700 untouched.
        assert_eq!(compute(&[0xFF, 0x10]), 0x3840 + 120_001);
    }

    #[test]
    fn verify_reports_both_values() {
        let body = b"scenario progress";
        let good = compute(body);
        let ok = verify(body, good);
        assert!(ok.matches);
        let bad = verify(body, good ^ 1);
        assert!(!bad.matches);
        assert_eq!(bad.computed, good);
        assert_eq!(bad.stored, good ^ 1);
    }

    #[test]
    fn split_reads_trailing_le_word() {
        let raw = [0xAA, 0xBB, 0x78, 0x56, 0x34, 0x12];
        let (body, stored) = split_archive(&raw).unwrap();
        assert_eq!(body, &[0xAA, 0xBB]);
        assert_eq!(stored, 0x1234_5678);
    }

    #[test]
    fn split_rejects_short_input() {
        let err = split_archive(&[1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            CssError::TruncatedInput {
                stage: Stage::Archive,
                needed: 4,
                available: 3,
                ..
            }
        ));
    }
}
