#[cfg(test)]
mod features_tests {
    use proptest::prelude::*;
    use smartzip_core::features::{detect_content_type, extract, shannon_entropy, ContentClass};

    proptest! {
        #[test]
        fn entropy_stays_within_bounds(data in prop::collection::vec(any::<u8>(), 0..8192)) {
            let h = shannon_entropy(&data);
            prop_assert!((0.0..=8.0).contains(&h), "entropy {} out of range", h);
        }

        #[test]
        fn extraction_is_deterministic(data in prop::collection::vec(any::<u8>(), 0..2048)) {
            prop_assert_eq!(extract("x.bin", &data), extract("x.bin", &data));
        }
    }

    #[test]
    fn every_byte_once_is_eight_bits() {
        let data: Vec<u8> = (0..=255u8).collect();
        assert_eq!(shannon_entropy(&data), 8.0);
    }

    #[test]
    fn single_repeated_byte_and_empty_are_zero() {
        assert_eq!(shannon_entropy(&[0u8; 10]), 0.0);
        assert_eq!(shannon_entropy(b""), 0.0);
    }

    #[test]
    fn ten_zero_bytes_vector() {
        let fv = extract("zeros.bin", &[0u8; 10]);
        assert_eq!(fv.entropy, 0.0);
        assert_eq!(fv.size, 10);
        assert_eq!(fv.content_class, ContentClass::Binary);
        assert_eq!(fv.mime, "application/octet-stream");
    }

    #[test]
    fn classes_from_extension_table() {
        assert_eq!(detect_content_type("data.json", b"[]").1, ContentClass::Json);
        assert_eq!(detect_content_type("clip.mp4", b"").1, ContentClass::Media);
        assert_eq!(detect_content_type("notes.txt", &[0xff, 0x00]).1, ContentClass::Text);
        assert_eq!(detect_content_type("archive.zip", b"PK").1, ContentClass::Binary);
    }

    #[test]
    fn unknown_extension_falls_back_to_sniffing() {
        assert_eq!(
            detect_content_type("Makefile", b"all:\n\tcargo build\n"),
            ("text/plain".to_string(), ContentClass::Text)
        );
        assert_eq!(detect_content_type("blob.xyz", &[0x00, 0x01]).1, ContentClass::Binary);
        assert_eq!(detect_content_type("empty.xyz", b"").1, ContentClass::Binary);
    }
}
