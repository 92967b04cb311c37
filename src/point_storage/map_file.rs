//! Sparse, hash-map-indexed point storage.
//!
//! Unlike [`super::raw_file`]/[`super::raw_mem`], no filler records are ever
//! written — only ids that actually have a point take space, at the cost of
//! a full in-memory hash map on the read side.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::record::{LatLon, LatLonPos};

fn short_path(base: &Path) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(".short");
    PathBuf::from(path)
}

/// Write-mode handle onto a sparse point file.
///
/// Appends one [`LatLonPos`] record per [`Self::add_point`] call; keeps no
/// in-memory index of its own.
pub struct MapFilePointStorageWriter {
    file: BufWriter<File>,
    processed_points: u64,
}

impl MapFilePointStorageWriter {
    /// Creates (or appends to) the sparse point file at `base.short`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be opened.
    pub fn create<P: AsRef<Path>>(base: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(short_path(base.as_ref()))?;
        Ok(Self {
            file: BufWriter::new(file),
            processed_points: 0,
        })
    }

    /// Appends an `(id, lat, lon)` record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOverflow`](crate::Error::CoordinateOverflow)
    /// if either axis overflows, or [`Error::Io`](crate::Error::Io) on a
    /// write failure.
    pub fn add_point(&mut self, id: u64, lat: f64, lng: f64) -> Result<()> {
        let coord = LatLon::encode(lat, lng)?;
        let record = LatLonPos::new(id, coord);
        self.file.write_all(&record.to_bytes())?;
        self.processed_points += 1;
        Ok(())
    }

    /// Number of points successfully written so far.
    #[must_use]
    pub fn processed_points(&self) -> u64 {
        self.processed_points
    }

    /// Flushes buffered writes to disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the flush fails.
    pub fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }
}

impl Drop for MapFilePointStorageWriter {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            tracing::error!(?err, "failed to flush sparse point storage on drop");
        }
    }
}

/// Read-mode handle onto a sparse point file, loaded entirely into a hash map.
pub struct MapFilePointStorageReader {
    points: FxHashMap<u64, LatLon>,
}

impl MapFilePointStorageReader {
    /// Reads every record from `base.short` into memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DamagedIndexFile`](crate::Error::DamagedIndexFile) if
    /// the file length is not a multiple of 16, or
    /// [`Error::Io`](crate::Error::Io) if it cannot be read.
    pub fn open<P: AsRef<Path>>(base: P) -> Result<Self> {
        let path = short_path(base.as_ref());
        let data = std::fs::read(&path)?;

        if data.len() % LatLonPos::ENCODED_SIZE != 0 {
            return Err(crate::Error::DamagedIndexFile {
                path,
                len: data.len(),
                record_size: LatLonPos::ENCODED_SIZE,
            });
        }

        let count = data.len() / LatLonPos::ENCODED_SIZE;
        let mut points = FxHashMap::with_capacity_and_hasher(count, Default::default());
        for i in 0..count {
            let start = i * LatLonPos::ENCODED_SIZE;
            let record =
                LatLonPos::from_bytes(&data[start..start + LatLonPos::ENCODED_SIZE]);
            points.insert(record.pos, record.coord());
        }

        Ok(Self { points })
    }

    /// Looks up the point stored for `id`.
    ///
    /// Unlike the dense strategies, a miss here is a genuine "no record was
    /// ever written for this id" and is not logged — every id not present in
    /// the input is expected to miss.
    #[must_use]
    pub fn get_point(&self, id: u64) -> Option<(f64, f64)> {
        self.points.get(&id).map(|coord| coord.decode())
    }

    /// Number of points loaded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no points were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
