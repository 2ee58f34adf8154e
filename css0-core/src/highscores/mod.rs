//! The `highscores.dat` v2 file this tool writes.
//!
//! ```text
//! u32 version (= 2)
//! u32 count
//! count x { cstr file_name, cstr winner_name, i64 value, i64 timestamp }
//! ```
//! Strings are UTF-8 followed by a single NUL; all integers little-endian.

pub mod reader;
pub mod writer;

pub const VERSION: u32 = 2;
pub const HEADER_LEN: usize = 8;
