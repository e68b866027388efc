#[cfg(test)]
mod compression_tests {
    use proptest::prelude::*;
    use smartzip_core::compression::{codec, codec_by_name, compress, decompress, Algorithm, CompressionError};

    fn any_algorithm() -> impl Strategy<Value = Algorithm> {
        prop::sample::select(Algorithm::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn roundtrip_law_holds_for_every_codec(
            alg in any_algorithm(),
            data in prop::collection::vec(any::<u8>(), 0..4096),
        ) {
            let packed = compress(alg, &data).unwrap();
            prop_assert_eq!(decompress(alg, &packed).unwrap(), data);
        }
    }

    #[test]
    fn empty_input_roundtrips() {
        for alg in Algorithm::ALL {
            let packed = compress(alg, b"").unwrap();
            assert!(decompress(alg, &packed).unwrap().is_empty(), "{alg} lost the empty input");
        }
    }

    #[test]
    fn repetitive_input_roundtrips_and_shrinks() {
        let data = vec![b'z'; 256 * 1024];
        for alg in Algorithm::ALL {
            let packed = compress(alg, &data).unwrap();
            assert_eq!(decompress(alg, &packed).unwrap(), data, "{alg}");
            if alg != Algorithm::Skip {
                assert!(packed.len() < data.len() / 10, "{alg} barely compressed repetitive data");
            }
        }
    }

    #[test]
    fn skip_is_identity() {
        let data = b"stored verbatim".to_vec();
        assert_eq!(compress(Algorithm::Skip, &data).unwrap(), data);
    }

    #[test]
    fn lzma_writes_xz_container_and_lz4_writes_frames() {
        let xz = compress(Algorithm::Lzma, b"hello").unwrap();
        assert_eq!(&xz[..6], &[0xFD, b'7', b'z', b'X', b'Z', 0x00]);
        let lz4 = compress(Algorithm::Lz4, b"hello").unwrap();
        assert_eq!(&lz4[..4], &[0x04, 0x22, 0x4D, 0x18]);
    }

    #[test]
    fn corrupt_input_names_the_codec() {
        let garbage = [0xde, 0xad, 0xbe, 0xef, 0x00, 0x11, 0x22, 0x33];
        for alg in Algorithm::ALL.into_iter().filter(|a| *a != Algorithm::Skip) {
            match decompress(alg, &garbage) {
                Err(CompressionError::DecompressFailed { codec, .. }) => assert_eq!(codec, alg.name()),
                other => panic!("{alg}: expected DecompressFailed, got {other:?}"),
            }
        }
    }

    #[test]
    fn names_and_aliases_resolve() {
        assert_eq!("BZIP2".parse::<Algorithm>().unwrap(), Algorithm::Bz2);
        assert_eq!("xz".parse::<Algorithm>().unwrap(), Algorithm::Lzma);
        assert_eq!("SKIP".parse::<Algorithm>().unwrap(), Algorithm::Skip);
        assert_eq!(codec_by_name("zstd").unwrap().algorithm(), Algorithm::Zstd);
        assert!(matches!(
            "lzo".parse::<Algorithm>(),
            Err(CompressionError::UnknownAlgorithm { name }) if name == "lzo"
        ));
        for alg in Algorithm::ALL {
            assert_eq!(alg.name().parse::<Algorithm>().unwrap(), alg);
            assert_eq!(codec(alg).algorithm(), alg);
        }
    }
}
