//! Offset index mapping `u64` ids to fixed-size values.
//!
//! # File Format
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  key: u64  │  value: V (ENCODED_SIZE) │   × N, tightly packed
//! └──────────────────────────────────────┘
//! ```
//!
//! No header, no checksum: total length must be a multiple of
//! `8 + V::ENCODED_SIZE`, or the file is considered damaged
//! ([`Error::DamagedIndexFile`]).
//!
//! Mode is fixed at construction via two distinct types, [`IndexWriter`] and
//! [`IndexReader`], rather than a runtime flag (`SPEC_FULL.md` §9).

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::index_value::IndexValue;

/// Number of pending entries after which [`IndexWriter::add`] flushes automatically.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 1024;

/// Write-mode handle onto an index file.
///
/// Accumulates `(key, value)` pairs in memory and flushes them in batches.
/// Dropping a writer with unflushed entries still persists them — forgetting
/// to call [`IndexWriter::write_all`] is safe, but relying on it silently
/// hides flush errors (they are logged via `tracing::error!` instead of
/// propagated, since `Drop` cannot return a `Result`).
pub struct IndexWriter<V: IndexValue> {
    file: BufWriter<File>,
    pending: Vec<(u64, V)>,
    flush_threshold: usize,
}

impl<V: IndexValue> IndexWriter<V> {
    /// Creates (or appends to) an index file with the default flush threshold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_with_flush_threshold(path, DEFAULT_FLUSH_THRESHOLD)
    }

    /// Like [`Self::create`], with a caller-chosen flush threshold.
    ///
    /// Exposed mainly so tests can exercise the flush-batch boundary without
    /// writing thousands of real entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened.
    pub fn create_with_flush_threshold<P: AsRef<Path>>(
        path: P,
        flush_threshold: usize,
    ) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: BufWriter::new(file),
            pending: Vec::new(),
            flush_threshold,
        })
    }

    /// Appends `(key, value)` to the pending buffer, flushing if the
    /// threshold is exceeded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if an automatic flush fails.
    pub fn add(&mut self, key: u64, value: V) -> Result<()> {
        self.pending.push((key, value));
        if self.pending.len() >= self.flush_threshold {
            self.write_all()?;
        }
        Ok(())
    }

    /// Flushes all pending entries to disk in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the write fails.
    pub fn write_all(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let mut buf = Vec::with_capacity(self.pending.len() * (8 + V::ENCODED_SIZE));
        for (key, value) in &self.pending {
            buf.extend_from_slice(&key.to_le_bytes());
            value.encode_le(&mut buf);
        }
        self.file.write_all(&buf)?;
        self.file.flush()?;
        self.pending.clear();
        Ok(())
    }
}

impl<V: IndexValue> Drop for IndexWriter<V> {
    fn drop(&mut self) {
        if let Err(err) = self.write_all() {
            tracing::error!(?err, "failed to flush index file on drop");
        }
    }
}

/// Read-mode handle onto an index file: the whole file loaded and sorted.
pub struct IndexReader<V: IndexValue> {
    entries: Vec<(u64, V)>,
}

impl<V: IndexValue> IndexReader<V> {
    /// Loads the entire index file into memory and sorts it ascending by
    /// `(key, value)`.
    ///
    /// # Errors
    ///
    /// - [`Error::DamagedIndexFile`] if the file length is not a multiple of
    ///   the record size.
    /// - [`Error::Io`] if the file cannot be read.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;

        let record_size = 8 + V::ENCODED_SIZE;
        if data.len() % record_size != 0 {
            return Err(Error::DamagedIndexFile {
                path: path.to_path_buf(),
                len: data.len(),
                record_size,
            });
        }

        let count = data.len() / record_size;
        let mut entries = Vec::with_capacity(count);
        for i in 0..count {
            let start = i * record_size;
            let key = u64::from_le_bytes(
                data[start..start + 8]
                    .try_into()
                    .expect("slice is exactly 8 bytes"),
            );
            let value = V::decode_le(&data[start + 8..start + record_size]);
            entries.push((key, value));
        }

        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

        Ok(Self { entries })
    }

    /// Returns the value of the first entry (smallest value) matching `key`,
    /// via lower-bound binary search.
    #[must_use]
    pub fn get_value_by_key(&self, key: u64) -> Option<V> {
        let start = self.entries.partition_point(|(k, _)| *k < key);
        self.entries
            .get(start)
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Invokes `visitor` for every entry matching `key`, in ascending-value
    /// order. Stops early if `visitor` returns `true`.
    pub fn for_each_by_key<F: FnMut(V) -> bool>(&self, key: u64, mut visitor: F) {
        let start = self.entries.partition_point(|(k, _)| *k < key);
        for &(k, v) in &self.entries[start..] {
            if k != key {
                break;
            }
            if visitor(v) {
                break;
            }
        }
    }

    /// Number of loaded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the index has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod index_file_tests;
