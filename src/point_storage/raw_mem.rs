//! Dense, fully in-RAM point storage.
//!
//! The file backing this strategy is only ever read in full (on open) or
//! written in full (on drop) — during a pass, every [`RawMemPointStorageWriter::add_point`]
//! touches RAM only.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::record::LatLon;

/// Write-mode handle onto an in-RAM dense point array.
///
/// Requires `capacity * 8` bytes of address space. The default capacity,
/// `u32::MAX as usize`, covers the entire OSM node-id space at the time of
/// design (`SPEC_FULL.md` §4.3.2) and needs ~32 GiB — intended for machines
/// sized for the workload, not for casual use.
pub struct RawMemPointStorageWriter {
    points: Vec<LatLon>,
    path: PathBuf,
    processed_points: u64,
}

impl RawMemPointStorageWriter {
    /// Capacity covering the full 32-bit id space, matching the source
    /// design's sizing rationale.
    pub const DEFAULT_CAPACITY: usize = u32::MAX as usize;

    /// Allocates a fresh array sized for [`Self::DEFAULT_CAPACITY`] ids.
    ///
    /// # Errors
    ///
    /// This constructor cannot fail on its own; the `Result` is kept for
    /// symmetry with the other point-storage writers and to leave room for
    /// a future fallible-allocation path.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_with_capacity(path, Self::DEFAULT_CAPACITY)
    }

    /// Like [`Self::create`], with a caller-chosen capacity.
    ///
    /// Exists so tests can exercise this strategy without allocating 32 GiB.
    ///
    /// # Errors
    ///
    /// See [`Self::create`].
    pub fn create_with_capacity<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Self> {
        Ok(Self {
            points: vec![LatLon::ABSENT; capacity],
            path: path.as_ref().to_path_buf(),
            processed_points: 0,
        })
    }

    /// Stores the point for `id` directly at `points[id]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOverflow`](crate::Error::CoordinateOverflow)
    /// if either axis overflows.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range for this writer's capacity.
    pub fn add_point(&mut self, id: u64, lat: f64, lng: f64) -> Result<()> {
        let coord = LatLon::encode(lat, lng)?;
        self.points[id as usize] = coord;
        self.processed_points += 1;
        Ok(())
    }

    /// Number of points successfully written so far.
    #[must_use]
    pub fn processed_points(&self) -> u64 {
        self.processed_points
    }

    fn flush_to_disk(&self) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        for point in &self.points {
            writer.write_all(&point.to_bytes())?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Drop for RawMemPointStorageWriter {
    fn drop(&mut self) {
        if let Err(err) = self.flush_to_disk() {
            tracing::error!(
                ?err,
                path = %self.path.display(),
                "failed to snapshot raw-mem point storage to disk"
            );
        }
    }
}

/// Read-mode handle onto an in-RAM dense point array, restored from disk.
pub struct RawMemPointStorageReader {
    points: Vec<LatLon>,
}

impl RawMemPointStorageReader {
    /// Reads the entire snapshot file into memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DamagedIndexFile`](crate::Error::DamagedIndexFile) if
    /// the file length is not a multiple of 8, or
    /// [`Error::Io`](crate::Error::Io) if it cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;

        if data.len() % LatLon::ENCODED_SIZE != 0 {
            return Err(crate::Error::DamagedIndexFile {
                path: path.to_path_buf(),
                len: data.len(),
                record_size: LatLon::ENCODED_SIZE,
            });
        }

        let count = data.len() / LatLon::ENCODED_SIZE;
        let mut points = Vec::with_capacity(count);
        for i in 0..count {
            let start = i * LatLon::ENCODED_SIZE;
            points.push(LatLon::from_bytes(&data[start..start + LatLon::ENCODED_SIZE]));
        }

        Ok(Self { points })
    }

    /// Reads the point stored for `id` directly from `points[id]`.
    ///
    /// Returns `None` (and logs an error) for the zero sentinel, same as
    /// [`super::RawFilePointStorageReader::get_point`].
    #[must_use]
    pub fn get_point(&self, id: u64) -> Option<(f64, f64)> {
        let coord = *self.points.get(id as usize)?;
        if coord.is_absent() {
            tracing::error!(id, "point absent (zero-sentinel) in raw mem point storage");
            return None;
        }
        Some(coord.decode())
    }
}
