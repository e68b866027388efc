#[cfg(test)]
mod selector_tests {
    use std::fs;

    use proptest::prelude::*;
    use smartzip_core::compression::Algorithm;
    use smartzip_core::features::{ContentClass, FeatureVector};
    use smartzip_core::recovery::ThresholdHistory;
    use smartzip_core::selector::{choose_algorithm, select, Decision, ThresholdConfig, ThresholdStore};

    fn any_thresholds() -> impl Strategy<Value = ThresholdConfig> {
        (0.0f64..8.0, 0u64..50_000_000).prop_map(|(e, s)| ThresholdConfig::new(e, s))
    }

    proptest! {
        #[test]
        fn high_entropy_always_skips(entropy in 7.5001f64..=8.0, size in any::<u64>(), t in any_thresholds()) {
            prop_assert_eq!(choose_algorithm(entropy, size, &t), Algorithm::Skip);
        }

        #[test]
        fn selection_is_deterministic(entropy in 0.0f64..=8.0, size in 0u64..100_000_000, t in any_thresholds()) {
            prop_assert_eq!(choose_algorithm(entropy, size, &t), choose_algorithm(entropy, size, &t));
        }

        #[test]
        fn above_entropy_threshold_is_brotli(size in any::<u64>()) {
            let t = ThresholdConfig::new(3.0, 5_000_000);
            prop_assert_eq!(choose_algorithm(3.2, size, &t), Algorithm::Brotli);
        }
    }

    #[test]
    fn entropy_7_6_is_skip_for_any_size() {
        let t = ThresholdConfig::default();
        for size in [0, 1, 999, 50_000, 5_000_001, u64::MAX] {
            assert_eq!(choose_algorithm(7.6, size, &t), Algorithm::Skip);
        }
    }

    #[test]
    fn content_class_does_not_change_the_choice() {
        let t = ThresholdConfig::default();
        let text = FeatureVector::new(2.0, 20_000, ContentClass::Text, "text/plain");
        let media = FeatureVector::new(2.0, 20_000, ContentClass::Media, "image/png");
        assert_eq!(select(&text, &t), Algorithm::Bz2);
        assert_eq!(select(&media, &t), Algorithm::Bz2);
    }

    #[test]
    fn decision_carries_thresholds_in_force() {
        let t = ThresholdConfig::new(2.8, 2_000_000);
        let fv = FeatureVector::new(3.0, 3_000_000, ContentClass::Binary, "application/octet-stream");
        let d = Decision::decide("big.bin", fv, &t);
        assert_eq!(d.algorithm, Algorithm::Brotli);
        assert_eq!(d.entropy_threshold_used, 2.8);
        assert_eq!(d.size_threshold_used, 2_000_000);
    }

    #[test]
    fn missing_or_corrupt_threshold_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smartzip_thresholds.json");
        assert_eq!(ThresholdStore::open(&path, None).current(), ThresholdConfig::default());

        fs::write(&path, b"{\"entropy_threshold\": ").unwrap();
        assert_eq!(ThresholdStore::open(&path, None).current(), ThresholdConfig::default());
    }

    #[test]
    fn installed_thresholds_persist_and_are_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smartzip_thresholds.json");
        let history_path = dir.path().join("threshold_history.jsonl");

        let store = ThresholdStore::open(&path, Some(ThresholdHistory::new(&history_path)));
        store.install(ThresholdConfig::new(4.2, 10_000_000), "operator", None).unwrap();

        let reopened = ThresholdStore::open(&path, None);
        assert_eq!(reopened.current(), ThresholdConfig::new(4.2, 10_000_000));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'), "threshold file should be pretty-printed");

        let history = ThresholdHistory::new(&history_path).load().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].config(), ThresholdConfig::new(4.2, 10_000_000));
        assert_eq!(history[0].source.as_deref(), Some("operator"));
    }

    #[test]
    fn readers_never_see_a_torn_pair() {
        let store = ThresholdStore::in_memory(ThresholdConfig::new(2.0, 2));
        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..200u64 {
                    let v = 2.0 + (i % 5) as f64;
                    store.install(ThresholdConfig::new(v, v as u64), "operator", None).unwrap();
                }
            });
            for _ in 0..2 {
                s.spawn(|| {
                    for _ in 0..2_000 {
                        let cfg = store.current();
                        assert_eq!(cfg.entropy_threshold as u64, cfg.size_threshold);
                    }
                });
            }
        });
        assert_eq!(store.snapshot().version, 200);
    }
}
