//! Three interchangeable strategies for storing `id -> (lat, lon)`.
//!
//! Each strategy trades memory, disk I/O, and input density differently; the
//! caller picks one per generator pass based on dataset coverage:
//!
//! - [`raw_file`] — dense, on-disk, memory-mapped reads. No RAM cost, but
//!   requires `max_id * 8` bytes of disk (sparse file, so mostly free on
//!   filesystems that support holes).
//! - [`raw_mem`] — dense, fully in RAM. Fastest, but requires the entire id
//!   space resident (`SPEC_FULL.md` §4.3.2 notes this needs ~32 GiB for the
//!   full OSM node-id space).
//! - [`map_file`] — sparse, hash-map indexed. Best when only a small subset
//!   of the id space is populated.

mod map_file;
mod raw_file;
mod raw_mem;

#[cfg(test)]
mod raw_mem_tests;

pub use map_file::{MapFilePointStorageReader, MapFilePointStorageWriter};
pub use raw_file::{RawFilePointStorageReader, RawFilePointStorageWriter};
pub use raw_mem::{RawMemPointStorageReader, RawMemPointStorageWriter};
