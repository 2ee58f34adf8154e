use std::fmt;
use thiserror::Error;

/// Decode stage a truncation is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Archive,
    Rle,
    Deobfuscate,
    Tables,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Archive => "archive",
            Stage::Rle => "rle",
            Stage::Deobfuscate => "deobfuscate",
            Stage::Tables => "tables",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum CssError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{stage}: truncated input at offset {offset:#x}: need {needed} bytes, have {available}")]
    TruncatedInput {
        stage: Stage,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("invalid highscores file at offset {offset:#x}: {reason}")]
    InvalidTargetHeader { offset: usize, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Format error: {0}")]
    Format(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, CssError>;
