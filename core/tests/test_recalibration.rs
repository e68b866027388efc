#[cfg(test)]
mod recalibration_tests {
    use proptest::prelude::*;
    use smartzip_core::catalog::{MetadataCatalog, NewEntry};
    use smartzip_core::compression::Algorithm;
    use smartzip_core::features::{ContentClass, FeatureVector};
    use smartzip_core::recalibration::{
        propose, replay_accuracy, Observation, ObservationSource, Recalibrator, Strategy,
    };
    use smartzip_core::recovery::{DecisionLog, LogRecord};
    use smartzip_core::selector::{Decision, ThresholdConfig, ThresholdStore};
    use proptest::strategy::Strategy as _;

    fn any_observation() -> impl proptest::strategy::Strategy<Value = Observation> {
        (
            0.0f64..=8.0,
            0u64..30_000_000,
            prop::sample::select(Algorithm::ALL.to_vec()),
        )
            .prop_map(|(e, s, a)| Observation::new(e, s, a))
    }

    fn window() -> Vec<Observation> {
        vec![
            Observation::new(3.8, 50_000, Algorithm::Zstd),
            Observation::new(3.0, 7_000_000, Algorithm::Zstd),
            Observation::new(4.5, 10, Algorithm::Brotli),
            Observation::new(0.0, 10, Algorithm::Gzip),
        ]
    }

    /// A log record for `o`; `forced` marks an operator override.
    fn logged(file_name: String, o: &Observation, forced: bool) -> LogRecord {
        let fv = FeatureVector::new(o.entropy, o.size, ContentClass::Binary, "application/octet-stream");
        let d = Decision::forced(file_name, o.algorithm, fv, &ThresholdConfig::default());
        let mut rec = LogRecord::from_outcome(&d, 1, 0.5, 0.0);
        rec.forced = forced;
        rec
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn never_less_accurate_than_current(
            obs in prop::collection::vec(any_observation(), 3..40),
            e in 0.0f64..8.0,
            s in 0u64..30_000_000,
            smoothing in any::<bool>(),
        ) {
            let current = ThresholdConfig::new(e, s);
            let strategy = if smoothing { Strategy::Smoothing } else { Strategy::GridSearch };
            let out = propose(&obs, current, strategy, ObservationSource::Supplied);
            let before = replay_accuracy(&obs, &current);
            let after = replay_accuracy(&obs, &out.thresholds);
            prop_assert!(after >= before, "{} < {}", after, before);
            prop_assert!((0.0..=1.0).contains(&out.confidence));
        }

        #[test]
        fn proposal_is_deterministic(obs in prop::collection::vec(any_observation(), 0..20)) {
            let current = ThresholdConfig::default();
            let a = propose(&obs, current, Strategy::GridSearch, ObservationSource::Supplied);
            let b = propose(&obs, current, Strategy::GridSearch, ObservationSource::Supplied);
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn fewer_than_three_records_change_nothing() {
        let store = ThresholdStore::in_memory(ThresholdConfig::default());
        let out = Recalibrator::new(&store)
            .run_on(&window()[..2], Strategy::GridSearch, ObservationSource::Supplied)
            .unwrap();
        assert_eq!(out.thresholds, ThresholdConfig::default());
        assert_eq!(out.confidence, 0.0);
        assert!(!out.installed);
        assert_eq!(store.snapshot().version, 0);
    }

    #[test]
    fn grid_search_picks_first_perfect_pair() {
        let store = ThresholdStore::in_memory(ThresholdConfig::default());
        let rc = Recalibrator::new(&store);

        let out = rc.run_on(&window(), Strategy::GridSearch, ObservationSource::Supplied).unwrap();
        assert_eq!(out.thresholds, ThresholdConfig::new(3.8, 10_000_000));
        assert_eq!(out.confidence, 1.0);
        assert!(out.baseline_accuracy < 1.0);
        assert!(out.installed);
        assert_eq!(store.current(), ThresholdConfig::new(3.8, 10_000_000));

        let again = rc.run_on(&window(), Strategy::GridSearch, ObservationSource::Supplied).unwrap();
        assert!(!again.installed);
        assert_eq!(again.thresholds, out.thresholds);
        assert_eq!(store.snapshot().version, 1);
    }

    #[test]
    fn worse_grid_candidate_is_discarded() {
        // Only reachable with an entropy threshold outside the grid.
        let current = ThresholdConfig::new(6.0, 5_000_000);
        let obs = vec![
            Observation::new(5.5, 50_000, Algorithm::Zstd),
            Observation::new(5.8, 60_000, Algorithm::Zstd),
            Observation::new(5.2, 70_000, Algorithm::Zstd),
        ];
        let out = propose(&obs, current, Strategy::GridSearch, ObservationSource::Supplied);
        assert_eq!(out.thresholds, current);
        assert_eq!(out.confidence, 1.0);
        assert!(!out.changed());
    }

    #[test]
    fn smoothing_blends_toward_medians() {
        let current = ThresholdConfig::new(3.5, 5_000_000);
        let obs = vec![
            Observation::new(0.0, 10, Algorithm::Gzip),
            Observation::new(0.5, 20, Algorithm::Gzip),
            Observation::new(1.0, 30, Algorithm::Gzip),
        ];
        let out = propose(&obs, current, Strategy::Smoothing, ObservationSource::Supplied);
        assert!((out.thresholds.entropy_threshold - (0.7 * 3.5 + 0.3 * 0.5)).abs() < 1e-12);
        assert_eq!(out.thresholds.size_threshold, 3_500_006);
        assert_eq!(out.confidence, 1.0);
    }

    #[test]
    fn decision_log_is_preferred_source() {
        let dir = tempfile::tempdir().unwrap();
        let log = DecisionLog::new(dir.path().join("adaptive_log.jsonl"));
        let t = ThresholdConfig::default();
        for (i, o) in window().iter().enumerate() {
            log.append(&logged(format!("f{i}"), o, false)).unwrap();
        }

        let store = ThresholdStore::in_memory(t);
        let rc = Recalibrator::new(&store).with_log(&log);
        let (obs, source) = rc.load_window(500).unwrap();
        assert_eq!(source, ObservationSource::DecisionLog);
        assert_eq!(obs, window());

        let (tail, _) = rc.load_window(2).unwrap();
        assert_eq!(tail, window()[2..].to_vec());

        let out = rc.run(500, Strategy::GridSearch).unwrap();
        assert_eq!(out.source, ObservationSource::DecisionLog);
        assert_eq!(out.thresholds, ThresholdConfig::new(3.8, 10_000_000));
    }

    #[test]
    fn forced_records_do_not_steer_recalibration() {
        let dir = tempfile::tempdir().unwrap();
        let log = DecisionLog::new(dir.path().join("adaptive_log.jsonl"));
        for (i, o) in window().iter().enumerate() {
            log.append(&logged(format!("f{i}"), o, false)).unwrap();
            // operator pushed the same shape of file to lzma
            let pushed = Observation::new(o.entropy, o.size, Algorithm::Lzma);
            log.append(&logged(format!("forced{i}"), &pushed, true)).unwrap();
        }

        let store = ThresholdStore::in_memory(ThresholdConfig::default());
        let rc = Recalibrator::new(&store).with_log(&log);
        let (obs, source) = rc.load_window(500).unwrap();
        assert_eq!(source, ObservationSource::DecisionLog);
        assert_eq!(obs, window());

        let (tail, _) = rc.load_window(1).unwrap();
        assert_eq!(tail, window()[3..].to_vec());

        let out = rc.run(500, Strategy::GridSearch).unwrap();
        assert_eq!(out.thresholds, ThresholdConfig::new(3.8, 10_000_000));
        assert_eq!(out.confidence, 1.0);
    }

    #[test]
    fn empty_log_falls_back_to_catalog_rows() {
        let dir = tempfile::tempdir().unwrap();
        let log = DecisionLog::new(dir.path().join("adaptive_log.jsonl"));
        let catalog = MetadataCatalog::open(dir.path().join("smartzip_catalog.db")).unwrap();
        for (i, o) in window().iter().enumerate() {
            let fv = FeatureVector::new(o.entropy, o.size, ContentClass::Binary, "application/octet-stream");
            catalog
                .record(&NewEntry::from_store(format!("f{i}"), "h", &fv, o.algorithm, o.size / 2))
                .unwrap();
        }

        let store = ThresholdStore::in_memory(ThresholdConfig::default());
        let rc = Recalibrator::new(&store).with_log(&log).with_catalog(&catalog);
        let (obs, source) = rc.load_window(500).unwrap();
        assert_eq!(source, ObservationSource::Catalog);
        assert_eq!(obs, window());
    }

    #[test]
    fn legacy_log_lines_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adaptive_log.jsonl");
        std::fs::write(
            &path,
            concat!(
                "{\"file_entropy\": 3.0, \"file_size\": 200, \"type\": \"text/plain\", \"algo\": \"zstd\", \"timestamp\": 1.0}\n",
                "{\"entropy_threshold\": 3.5, \"size_threshold\": 5000000, \"timestamp\": 2.0}\n",
                "not json\n",
                "{\"entropy\": 7.9, \"original_size\": 10, \"algorithm\": \"skip\", \"timestamp\": 3.0}\n",
                "{\"entropy\": 1.0, \"size\"",
            ),
        )
        .unwrap();

        let records = DecisionLog::new(&path).load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].algorithm, Algorithm::Zstd);
        assert_eq!(records[0].size, 200);
        assert_eq!(records[0].mime, "text/plain");
        assert_eq!(records[1].algorithm, Algorithm::Skip);
    }

    #[test]
    fn strategy_names_parse() {
        assert_eq!("grid".parse::<Strategy>().unwrap(), Strategy::GridSearch);
        assert_eq!("Smoothing".parse::<Strategy>().unwrap(), Strategy::Smoothing);
        assert!("annealing".parse::<Strategy>().is_err());
    }
}
