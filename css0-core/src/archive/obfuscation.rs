use crate::error::{CssError, Result, Stage};

/// Additive key applied to every word.
pub const WORD_KEY: u32 = 0x3939_3939;
const ROTATE: u32 = 5;
const WORD: usize = 4;

fn check_len(buf: &[u8]) -> Result<()> {
    if buf.len() % WORD != 0 {
        let whole = buf.len() - buf.len() % WORD;
        return Err(CssError::TruncatedInput {
            stage: Stage::Deobfuscate,
            offset: whole,
            needed: WORD,
            available: buf.len() - whole,
        });
    }
    Ok(())
}

/// Deobfuscate in place: each little-endian word is rotated left by 5, then keyed.
pub fn decode_words(buf: &mut [u8]) -> Result<()> {
    check_len(buf)?;
    for chunk in buf.chunks_exact_mut(WORD) {
        let w = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let plain = w.rotate_left(ROTATE).wrapping_sub(WORD_KEY);
        chunk.copy_from_slice(&plain.to_le_bytes());
    }
    Ok(())
}

/// Inverse of [`decode_words`].
pub fn encode_words(buf: &mut [u8]) -> Result<()> {
    check_len(buf)?;
    for chunk in buf.chunks_exact_mut(WORD) {
        let w = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let cipher = w.wrapping_add(WORD_KEY).rotate_right(ROTATE);
        chunk.copy_from_slice(&cipher.to_le_bytes());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_word() {
        // plain 0 <- cipher rotr(0x39393939, 5)
        let cipher = WORD_KEY.rotate_right(5);
        let mut buf = cipher.to_le_bytes();
        decode_words(&mut buf).unwrap();
        assert_eq!(buf, [0, 0, 0, 0]);
    }

    #[test]
    fn subtraction_wraps() {
        // rotl(1, 5) = 32, 32 - key wraps below zero
        let mut buf = 1u32.to_le_bytes();
        decode_words(&mut buf).unwrap();
        assert_eq!(u32::from_le_bytes(buf), 32u32.wrapping_sub(WORD_KEY));
    }

    #[test]
    fn encode_then_decode_restores_buffer() {
        let original: Vec<u8> = (0..=255u8).cycle().take(1024).collect();
        let mut buf = original.clone();
        encode_words(&mut buf).unwrap();
        assert_ne!(buf, original);
        decode_words(&mut buf).unwrap();
        assert_eq!(buf, original);
    }

    #[test]
    fn rejects_partial_word() {
        let mut buf = [0u8; 6];
        let err = decode_words(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            CssError::TruncatedInput {
                stage: Stage::Deobfuscate,
                offset: 4,
                needed: 4,
                available: 2,
            }
        ));
        assert!(encode_words(&mut buf).is_err());
    }

    #[test]
    fn empty_buffer_is_fine() {
        let mut buf: [u8; 0] = [];
        decode_words(&mut buf).unwrap();
    }
}
