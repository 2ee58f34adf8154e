/// What to do when the archive's trailing checksum does not match its body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChecksumPolicy {
    /// Log a warning and keep decoding.
    #[default]
    Warn,
    /// Abort with `ChecksumMismatch`.
    Strict,
    /// Do not compute the checksum at all.
    Skip,
}

/// Run configuration threaded through every pipeline call.
#[derive(Clone, Debug)]
pub struct Options {
    /// Multiplier applied to company values read from CSV. Archive values are
    /// already in internal units and are never scaled.
    pub scale_factor: i64,
    /// Raw timestamp written for records with no known completion time.
    pub legacy_timestamp: i64,
    /// Fold the new records into an existing highscores file instead of replacing it.
    pub merge_enabled: bool,
    pub checksum: ChecksumPolicy,
    /// Treat an unreadable existing highscores file as empty rather than failing.
    pub ignore_invalid_target: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            scale_factor: 1,
            legacy_timestamp: i64::MIN,
            merge_enabled: false,
            checksum: ChecksumPolicy::default(),
            ignore_invalid_target: false,
        }
    }
}
