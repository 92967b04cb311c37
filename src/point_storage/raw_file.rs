//! Dense, on-disk point storage indexed directly by id.
//!
//! Record `i` lives at byte offset `i * 8`; ids with no recorded point leave
//! filesystem holes that read back as zero, which doubles as the absent
//! sentinel.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use memmap2::Mmap;

use crate::error::Result;
use crate::record::LatLon;

/// Write-mode handle onto a dense point file.
pub struct RawFilePointStorageWriter {
    file: File,
    processed_points: u64,
}

impl RawFilePointStorageWriter {
    /// Creates (or reopens) the point file at `path`.
    ///
    /// Existing records survive a reopen — the file is never truncated, so a
    /// writer resumed across process restarts keeps everything already on
    /// disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be opened.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).write(true).open(path)?;
        Ok(Self {
            file,
            processed_points: 0,
        })
    }

    /// Writes the point for `id`, seeking to `id * 8` first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOverflow`](crate::Error::CoordinateOverflow)
    /// if either axis overflows, or [`Error::Io`](crate::Error::Io) on a
    /// write failure.
    pub fn add_point(&mut self, id: u64, lat: f64, lng: f64) -> Result<()> {
        let coord = LatLon::encode(lat, lng)?;
        let offset = id * LatLon::ENCODED_SIZE as u64;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(&coord.to_bytes())?;
        self.processed_points += 1;
        Ok(())
    }

    /// Number of points successfully written so far.
    #[must_use]
    pub fn processed_points(&self) -> u64 {
        self.processed_points
    }
}

enum Backing {
    Mapped(Mmap),
    File(File),
}

/// Read-mode handle onto a dense point file.
///
/// Uses a memory map where the platform supports it, falling back to
/// positioned reads otherwise — a performance choice only, not a semantic
/// one.
pub struct RawFilePointStorageReader {
    backing: Backing,
}

impl RawFilePointStorageReader {
    /// Opens an existing point file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        // An empty file cannot be mapped; also nothing to read.
        let backing = if len == 0 {
            Backing::File(file)
        } else {
            // SAFETY: the file is exclusively owned by this reader for its
            // lifetime and is never mutated concurrently (single-writer,
            // single-reader discipline enforced by the caller per
            // SPEC_FULL.md §5).
            match unsafe { Mmap::map(&file) } {
                Ok(mmap) => Backing::Mapped(mmap),
                Err(_) => Backing::File(file),
            }
        };

        Ok(Self { backing })
    }

    /// Reads the point stored for `id`.
    ///
    /// Returns `None` (and logs an error) if the record is the zero
    /// sentinel, since dense storage cannot distinguish "absent" from a
    /// true `(0, 0)` point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) on a read failure.
    pub fn get_point(&mut self, id: u64) -> Result<Option<(f64, f64)>> {
        let offset = id as usize * LatLon::ENCODED_SIZE;

        let bytes = match &mut self.backing {
            Backing::Mapped(mmap) => {
                if offset + LatLon::ENCODED_SIZE > mmap.len() {
                    return Ok(None);
                }
                let mut buf = [0u8; LatLon::ENCODED_SIZE];
                buf.copy_from_slice(&mmap[offset..offset + LatLon::ENCODED_SIZE]);
                buf
            }
            Backing::File(file) => {
                let len = file.metadata()?.len();
                if offset as u64 + LatLon::ENCODED_SIZE as u64 > len {
                    return Ok(None);
                }
                file.seek(SeekFrom::Start(offset as u64))?;
                let mut buf = [0u8; LatLon::ENCODED_SIZE];
                file.read_exact(&mut buf)?;
                buf
            }
        };

        let coord = LatLon::from_bytes(&bytes);
        if coord.is_absent() {
            tracing::error!(id, "point absent (zero-sentinel) in raw file point storage");
            return Ok(None);
        }
        Ok(Some(coord.decode()))
    }
}
