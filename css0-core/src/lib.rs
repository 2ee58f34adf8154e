#![forbid(unsafe_code)]

pub mod error;
pub mod options;

pub mod model;

pub mod archive;

pub mod highscores;

pub mod interchange;
pub mod merge;

pub mod convert;

// Re-exports: stable API surface
pub use archive::{DecodedArchive, decode_archive, decode_archive_with};
pub use convert::{BuildSummary, Source, build_highscores};
pub use highscores::reader::read_target;
pub use highscores::writer::{write_target, write_target_with};
pub use merge::merge;
pub use model::{ScenarioRow, ScoreRecord, Timestamp, to_score_records};
pub use options::{ChecksumPolicy, Options};
