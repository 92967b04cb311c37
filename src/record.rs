//! Fixed-point coordinate records shared by the point-storage strategies.
//!
//! # Format
//!
//! ```text
//! LatLon:    [lat:i32][lon:i32]                 8 bytes
//! LatLonPos: [pos:u64][lat:i32][lon:i32]        16 bytes
//! ```
//!
//! Both are little-endian regardless of host architecture (`SPEC_FULL.md`
//! Open Questions).

use crate::error::{Error, Result};

/// Fixed-point scale factor: ~1.1cm precision at the equator.
pub const COORD_SCALE: f64 = 10_000_000.0;

/// A packed `(lat, lon)` coordinate, fixed-point encoded at 1e7.
///
/// `(0, 0)` is the sentinel "absent" value used by the dense point-storage
/// strategies. This conflates with the real point on the equator at the
/// prime meridian — a known limitation inherited from the source design,
/// not fixed here (`SPEC_FULL.md` §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LatLon {
    /// Latitude, scaled by [`COORD_SCALE`] and truncated to `i32`.
    pub lat: i32,
    /// Longitude, scaled by [`COORD_SCALE`] and truncated to `i32`.
    pub lon: i32,
}

impl LatLon {
    /// Encoded size on disk, in bytes.
    pub const ENCODED_SIZE: usize = 8;

    /// The sentinel value meaning "no point stored here".
    pub const ABSENT: LatLon = LatLon { lat: 0, lon: 0 };

    /// Encodes a `(lat, lon)` pair, truncating each axis to fixed-point `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOverflow`] if either axis overflows `i32`
    /// once scaled.
    pub fn encode(lat: f64, lon: f64) -> Result<Self> {
        Ok(Self {
            lat: encode_axis("lat", lat)?,
            lon: encode_axis("lon", lon)?,
        })
    }

    /// Decodes back to floating-point degrees.
    #[must_use]
    pub fn decode(self) -> (f64, f64) {
        (decode_axis(self.lat), decode_axis(self.lon))
    }

    /// Returns `true` if this is the zero-sentinel "absent" value.
    #[must_use]
    pub fn is_absent(self) -> bool {
        self == Self::ABSENT
    }

    /// Serializes to the 8-byte on-disk record.
    #[must_use]
    pub fn to_bytes(self) -> [u8; Self::ENCODED_SIZE] {
        let mut buf = [0u8; Self::ENCODED_SIZE];
        buf[0..4].copy_from_slice(&self.lat.to_le_bytes());
        buf[4..8].copy_from_slice(&self.lon.to_le_bytes());
        buf
    }

    /// Deserializes from an 8-byte slice.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len() != Self::ENCODED_SIZE`.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let lat = i32::from_le_bytes(bytes[0..4].try_into().expect("slice is exactly 4 bytes"));
        let lon = i32::from_le_bytes(bytes[4..8].try_into().expect("slice is exactly 4 bytes"));
        Self { lat, lon }
    }
}

/// A sparse coordinate record carrying the OSM id it belongs to.
///
/// Used by [`crate::MapFilePointStorageWriter`]/[`crate::MapFilePointStorageReader`]
/// where only a small subset of the id space is populated and a dense array
/// would waste memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatLonPos {
    /// The OSM element id this coordinate belongs to.
    pub pos: u64,
    /// Latitude, fixed-point encoded.
    pub lat: i32,
    /// Longitude, fixed-point encoded.
    pub lon: i32,
}

impl LatLonPos {
    /// Encoded size on disk, in bytes.
    pub const ENCODED_SIZE: usize = 16;

    /// Builds a record pairing an id with a coordinate.
    #[must_use]
    pub fn new(pos: u64, coord: LatLon) -> Self {
        Self {
            pos,
            lat: coord.lat,
            lon: coord.lon,
        }
    }

    /// The coordinate carried by this record, without the id.
    #[must_use]
    pub fn coord(self) -> LatLon {
        LatLon {
            lat: self.lat,
            lon: self.lon,
        }
    }

    /// Serializes to the 16-byte on-disk record.
    #[must_use]
    pub fn to_bytes(self) -> [u8; Self::ENCODED_SIZE] {
        let mut buf = [0u8; Self::ENCODED_SIZE];
        buf[0..8].copy_from_slice(&self.pos.to_le_bytes());
        buf[8..12].copy_from_slice(&self.lat.to_le_bytes());
        buf[12..16].copy_from_slice(&self.lon.to_le_bytes());
        buf
    }

    /// Deserializes from a 16-byte slice.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len() != Self::ENCODED_SIZE`.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let pos = u64::from_le_bytes(bytes[0..8].try_into().expect("slice is exactly 8 bytes"));
        let lat = i32::from_le_bytes(bytes[8..12].try_into().expect("slice is exactly 4 bytes"));
        let lon = i32::from_le_bytes(bytes[12..16].try_into().expect("slice is exactly 4 bytes"));
        Self { pos, lat, lon }
    }
}

fn encode_axis(axis: &'static str, value: f64) -> Result<i32> {
    let scaled = (value * COORD_SCALE).trunc();
    if scaled > f64::from(i32::MAX) || scaled < f64::from(i32::MIN) {
        return Err(Error::CoordinateOverflow { axis, value });
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(scaled as i32)
}

fn decode_axis(value: i32) -> f64 {
    f64::from(value) / COORD_SCALE
}

#[cfg(test)]
mod record_tests {
    use super::*;

    #[test]
    fn round_trip_within_osm_range() {
        for &(lat, lon) in &[
            (55.7558, 37.6173), // Moscow
            (-33.8688, 151.2093), // Sydney
            (0.0, 0.0),
            (89.999_999, -179.999_999),
        ] {
            let coord = LatLon::encode(lat, lon).unwrap();
            let (decoded_lat, decoded_lon) = coord.decode();
            assert!((decoded_lat - lat).abs() <= 1e-7 + 1e-9);
            assert!((decoded_lon - lon).abs() <= 1e-7 + 1e-9);
        }
    }

    #[test]
    fn byte_round_trip() {
        let coord = LatLon::encode(12.5, -45.25).unwrap();
        let bytes = coord.to_bytes();
        assert_eq!(LatLon::from_bytes(&bytes), coord);

        let pos = LatLonPos::new(10_000_000_000, coord);
        let bytes = pos.to_bytes();
        assert_eq!(LatLonPos::from_bytes(&bytes), pos);
    }

    #[test]
    fn overflow_is_rejected() {
        let err = LatLon::encode(300.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            Error::CoordinateOverflow { axis: "lat", .. }
        ));
    }

    #[test]
    fn zero_is_the_absent_sentinel() {
        assert!(LatLon::ABSENT.is_absent());
        assert!(LatLon::encode(0.0, 0.0).unwrap().is_absent());
        assert!(!LatLon::encode(1.0, 0.0).unwrap().is_absent());
    }
}
