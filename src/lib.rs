//! Intermediate on-disk cache for OSM element data, used during bulk import
//! to hold node/way/relation payloads and coordinates between the pass that
//! reads a source extract and the pass that assembles output geometry.
//!
//! Three independent pieces, meant to be composed by the caller:
//!
//! - [`IndexWriter`]/[`IndexReader`] — a generic `u64 -> V` offset table.
//! - [`ElementCacheWriter`]/[`ElementCacheReader`] — variable-length element
//!   payloads, built on top of an index file.
//! - [`point_storage`] — three interchangeable `id -> (lat, lon)` strategies.
//!
//! None of these synchronize internally; a writer and a reader for the same
//! files are never open at once, and each type is used from a single thread
//! at a time.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod element_cache;
mod error;
mod index_file;
mod index_value;
mod point_storage;
mod record;

pub use element_cache::{Decode, ElementCacheReader, ElementCacheWriter, Encode};
pub use error::{Error, Result};
pub use index_file::{IndexReader, IndexWriter, DEFAULT_FLUSH_THRESHOLD};
pub use index_value::IndexValue;
pub use point_storage::{
    MapFilePointStorageReader, MapFilePointStorageWriter, RawFilePointStorageReader,
    RawFilePointStorageWriter, RawMemPointStorageReader, RawMemPointStorageWriter,
};
pub use record::{LatLon, LatLonPos, COORD_SCALE};
