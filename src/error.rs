//! Error type for `osm-cache`.
//!
//! Every fallible operation in this crate returns [`Result`]. There is no
//! per-entry recovery: a damaged index file, an out-of-range coordinate, or
//! an oversized payload all mean the caller's pass over the dataset cannot
//! produce a correct result and should treat the error as fatal (see
//! `SPEC_FULL.md` REDESIGN FLAGS for why this crate returns `Err` rather
//! than aborting the process itself).

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for `osm-cache` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing the cache's on-disk files.
///
/// Each variant carries a stable `OSMC-XXX` code for grepping logs.
#[derive(Error, Debug)]
pub enum Error {
    /// Index file length is not a multiple of its record size (OSMC-001).
    #[error(
        "[OSMC-001] damaged index file {path}: length {len} is not a multiple of record size {record_size}"
    )]
    DamagedIndexFile {
        /// Path to the offending file.
        path: PathBuf,
        /// Actual file length in bytes.
        len: usize,
        /// Expected record size in bytes.
        record_size: usize,
    },

    /// A payload record's size prefix claims more bytes than the file holds (OSMC-002).
    #[error("[OSMC-002] damaged payload file: record at offset {offset} is truncated")]
    DamagedPayloadFile {
        /// Byte offset of the truncated record's size prefix.
        offset: u64,
    },

    /// A coordinate overflows `i32` once scaled by 1e7 (OSMC-003).
    #[error("[OSMC-003] coordinate out of range: {axis} = {value} overflows i32 after scaling by 1e7")]
    CoordinateOverflow {
        /// Which axis overflowed (`"lat"` or `"lon"`).
        axis: &'static str,
        /// The original, unscaled value.
        value: f64,
    },

    /// An encoded payload is larger than `u32::MAX` bytes (OSMC-004).
    #[error("[OSMC-004] payload too large: {len} bytes exceeds u32::MAX")]
    PayloadTooLarge {
        /// The encoded payload length.
        len: usize,
    },

    /// A caller-supplied payload decoder rejected the stored bytes (OSMC-005).
    #[error("[OSMC-005] payload decode failed: {0}")]
    Decode(String),

    /// I/O error propagated from the filesystem (OSMC-006).
    #[error("[OSMC-006] I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the stable error code (e.g. `"OSMC-001"`).
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DamagedIndexFile { .. } => "OSMC-001",
            Self::DamagedPayloadFile { .. } => "OSMC-002",
            Self::CoordinateOverflow { .. } => "OSMC-003",
            Self::PayloadTooLarge { .. } => "OSMC-004",
            Self::Decode(_) => "OSMC-005",
            Self::Io(_) => "OSMC-006",
        }
    }
}
