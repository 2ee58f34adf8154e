use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "css0dev: CSS0.DAT scenario progress -> highscores.dat", long_about = None)]
pub struct Cli {
    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a CSS0.DAT archive to CSV
    Decode {
        archive: PathBuf,

        /// Output CSV (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Abort on checksum mismatch instead of warning
        #[arg(long)]
        strict_checksum: bool,

        /// Write the decompressed and deobfuscated buffers next to the archive
        #[arg(short, long)]
        keep_intermediate: bool,
    },

    /// Build or merge a highscores.dat (v2)
    Build {
        /// CSS0.DAT archive to read
        #[arg(long, conflicts_with = "input", required_unless_present = "input")]
        css0: Option<PathBuf>,

        /// CSV with filename,name,company_value,winner columns
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output highscores.dat
        #[arg(short, long)]
        out: PathBuf,

        /// Keep the better value per scenario from an existing output file
        #[arg(long)]
        merge: bool,

        /// Multiplier for CSV company values (10 converts display currency to internal units)
        #[arg(long, default_value_t = 1)]
        scale: i64,

        /// Abort on checksum mismatch instead of warning
        #[arg(long)]
        strict_checksum: bool,

        /// Treat an unreadable existing output as empty when merging
        #[arg(long)]
        ignore_invalid_target: bool,
    },

    /// Print the records of a highscores.dat
    List { highscores: PathBuf },

    /// Check an archive's trailing checksum
    Verify { archive: PathBuf },
}
