use super::*;

const TEST_CAPACITY: usize = 64;

#[test]
fn round_trip_across_drop_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("points.mem");

    {
        let mut writer =
            RawMemPointStorageWriter::create_with_capacity(&path, TEST_CAPACITY).unwrap();
        writer.add_point(5, 55.7558, 37.6173).unwrap();
        writer.add_point(40, -33.8688, 151.2093).unwrap();
    }

    let reader = RawMemPointStorageReader::open(&path).unwrap();
    let (lat, lon) = reader.get_point(5).unwrap();
    assert!((lat - 55.7558).abs() <= 1e-7 + 1e-9);
    assert!((lon - 37.6173).abs() <= 1e-7 + 1e-9);

    let (lat, lon) = reader.get_point(40).unwrap();
    assert!((lat - (-33.8688)).abs() <= 1e-7 + 1e-9);
    assert!((lon - 151.2093).abs() <= 1e-7 + 1e-9);

    assert!(reader.get_point(6).is_none());
}

#[test]
fn out_of_range_id_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("points.mem");

    {
        let _writer =
            RawMemPointStorageWriter::create_with_capacity(&path, TEST_CAPACITY).unwrap();
    }

    let reader = RawMemPointStorageReader::open(&path).unwrap();
    assert!(reader.get_point(TEST_CAPACITY as u64 + 1).is_none());
}

#[test]
fn corrupted_snapshot_is_detected() {
    use std::io::Write as _;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("points.mem");

    {
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[1, 2, 3]).unwrap();
    }

    let err = RawMemPointStorageReader::open(&path).unwrap_err();
    assert!(matches!(err, crate::Error::DamagedIndexFile { .. }));
}
