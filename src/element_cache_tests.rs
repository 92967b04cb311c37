use super::*;

struct Bytes(Vec<u8>);

impl Encode for Bytes {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.0);
    }
}

impl Decode for Bytes {
    fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(Bytes(bytes.to_vec()))
    }
}

#[test]
fn s2_payload_round_trip_without_preload() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("payloads");

    {
        let mut writer = ElementCacheWriter::create(&base).unwrap();
        writer.write(1, &Bytes(b"alpha".to_vec())).unwrap();
        writer.write(1_000_000, &Bytes(b"beta".to_vec())).unwrap();
        writer.write(42, &Bytes(b"gamma delta".to_vec())).unwrap();
        writer.save_offsets().unwrap();
    }

    let mut reader = ElementCacheReader::open(&base, false).unwrap();
    assert_eq!(reader.read::<Bytes>(1).unwrap().unwrap().0, b"alpha");
    assert_eq!(reader.read::<Bytes>(1_000_000).unwrap().unwrap().0, b"beta");
    assert_eq!(
        reader.read::<Bytes>(42).unwrap().unwrap().0,
        b"gamma delta"
    );
    assert!(reader.read::<Bytes>(7).unwrap().is_none());
}

#[test]
fn s3_preload_matches_non_preload() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("payloads");

    {
        let mut writer = ElementCacheWriter::create(&base).unwrap();
        writer.write(1, &Bytes(b"alpha".to_vec())).unwrap();
        writer.write(1_000_000, &Bytes(b"beta".to_vec())).unwrap();
        writer.write(42, &Bytes(b"gamma delta".to_vec())).unwrap();
        writer.save_offsets().unwrap();
    }

    let mut no_preload = ElementCacheReader::open(&base, false).unwrap();
    let mut preload = ElementCacheReader::open(&base, true).unwrap();

    for id in [1u64, 1_000_000, 42] {
        let a = no_preload.read::<Bytes>(id).unwrap().unwrap().0;
        let b = preload.read::<Bytes>(id).unwrap().unwrap().0;
        assert_eq!(a, b);
    }
}

#[test]
fn duplicate_ids_keep_the_earliest_write() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("dup");

    {
        let mut writer = ElementCacheWriter::create(&base).unwrap();
        writer.write(1, &Bytes(b"A".to_vec())).unwrap();
        writer.write(1, &Bytes(b"B".to_vec())).unwrap();
        writer.save_offsets().unwrap();
    }

    let mut reader = ElementCacheReader::open(&base, false).unwrap();
    assert_eq!(reader.read::<Bytes>(1).unwrap().unwrap().0, b"A");
}

proptest::proptest! {
    #[test]
    fn round_trip_is_byte_exact_for_distinct_ids(
        payloads in proptest::collection::vec(proptest::collection::vec(proptest::prelude::any::<u8>(), 0..64), 1..30)
    ) {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("prop");

        {
            let mut writer = ElementCacheWriter::create(&base).unwrap();
            for (i, payload) in payloads.iter().enumerate() {
                writer.write(i as u64, &Bytes(payload.clone())).unwrap();
            }
        }

        let mut reader = ElementCacheReader::open(&base, false).unwrap();
        for (i, payload) in payloads.iter().enumerate() {
            let got = reader.read::<Bytes>(i as u64).unwrap().unwrap().0;
            prop_assert_eq!(&got, payload);
        }
    }
}
